//! XML serialization
//!
//! Renders an [`Element`] tree as indented UTF-8 text in the layout the
//! build server stores its own configuration in.

use super::element::Element;
use crate::view::errors::{Result, ViewError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use sha2::{Digest, Sha256};

const INDENT: usize = 2;

/// A generated view document paired with the view name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlView {
    /// View name, also used as the output file name
    pub name: String,
    /// Document root
    pub root: Element,
}

impl XmlView {
    /// Wraps a generated root element.
    #[must_use]
    pub fn new(name: impl Into<String>, root: Element) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Serializes the document with an XML declaration and two-space indent.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Xml`] if the writer fails.
    pub fn output(&self) -> Result<String> {
        to_string(&self.root)
    }

    /// Hex SHA-256 of [`output`][Self::output], used to detect unchanged views.
    ///
    /// # Errors
    ///
    /// Propagates serialization errors.
    pub fn digest(&self) -> Result<String> {
        Ok(digest(self.output()?.as_bytes()))
    }
}

/// Hex SHA-256 of `bytes`.
#[must_use]
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Serializes `root` as a standalone document.
///
/// # Errors
///
/// Returns [`ViewError::Xml`] if the writer fails or produces invalid UTF-8.
pub fn to_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root)?;

    let mut text = String::from_utf8(writer.into_inner())
        .map_err(|e| ViewError::Xml(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_error)
}

fn xml_error(err: impl std::fmt::Display) -> ViewError {
    ViewError::Xml(err.to_string())
}
