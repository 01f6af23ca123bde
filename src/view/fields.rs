//! Field tables
//!
//! Every view kind is described by an ordered table of [`FieldSpec`]s. Each
//! entry ties an option key to an XML element and a [`FieldRule`] that fixes
//! when the element is emitted, what its default is and how the option value
//! is rendered. [`render`] walks a table in order and appends the resulting
//! elements to a root.

use super::columns;
use super::errors::{Result, ViewError};
use super::options::ViewOptions;
use crate::xml::Element;

/// How one option maps onto the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Always emitted; the option must be a non-empty string
    Required,
    /// Emitted only when the option is set
    Optional,
    /// Always emitted as `true`/`false`, defaulting to `false`
    Flag,
    /// Emitted as `true`/`false` only when the option is set
    TriState,
    /// Always emitted; string or integer rendered as text, else `default`
    Text {
        /// Text used when the option is unset
        default: &'static str,
    },
    /// Always emitted; text only when the option is set
    TextIfSet,
    /// Always emitted; values outside `allowed` fall back to `default`
    Choice {
        /// Accepted values
        allowed: &'static [&'static str],
        /// Value used when unset or not accepted
        default: &'static str,
    },
    /// Fixed element carrying attributes, with nested fields rendered inside
    Container {
        /// Attributes set on the element
        attrs: &'static [(&'static str, &'static str)],
        /// Fields rendered as children
        children: &'static [FieldSpec],
    },
    /// Job name list: a comparator child followed by one `string` per job
    JobNames {
        /// Comparator class attribute
        comparator: &'static str,
    },
    /// Column list filtered through the column registry
    Columns,
}

/// One row of a view's field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Option key read from the view options (empty for fixed elements)
    pub key: &'static str,
    /// Element name written to the document
    pub element: &'static str,
    /// Presence and rendering rule
    pub rule: FieldRule,
}

impl FieldSpec {
    /// Required string field.
    pub const fn required(key: &'static str, element: &'static str) -> Self {
        Self { key, element, rule: FieldRule::Required }
    }

    /// Optional string field.
    pub const fn optional(key: &'static str, element: &'static str) -> Self {
        Self { key, element, rule: FieldRule::Optional }
    }

    /// Boolean field that always renders.
    pub const fn flag(key: &'static str, element: &'static str) -> Self {
        Self { key, element, rule: FieldRule::Flag }
    }

    /// Boolean field that renders only when set.
    pub const fn tri_state(key: &'static str, element: &'static str) -> Self {
        Self { key, element, rule: FieldRule::TriState }
    }

    /// Scalar field with a default.
    pub const fn text(key: &'static str, element: &'static str, default: &'static str) -> Self {
        Self { key, element, rule: FieldRule::Text { default } }
    }

    /// Always-present element whose text is only set when the option is.
    pub const fn text_if_set(key: &'static str, element: &'static str) -> Self {
        Self { key, element, rule: FieldRule::TextIfSet }
    }

    /// Enumerated string field.
    pub const fn choice(
        key: &'static str,
        element: &'static str,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self { key, element, rule: FieldRule::Choice { allowed, default } }
    }

    /// Fixed element with attributes and nested fields.
    pub const fn container(
        element: &'static str,
        attrs: &'static [(&'static str, &'static str)],
        children: &'static [FieldSpec],
    ) -> Self {
        Self { key: "", element, rule: FieldRule::Container { attrs, children } }
    }

    /// Job name list.
    pub const fn job_names(
        key: &'static str,
        element: &'static str,
        comparator: &'static str,
    ) -> Self {
        Self { key, element, rule: FieldRule::JobNames { comparator } }
    }

    /// Registry-filtered column list.
    pub const fn columns(key: &'static str, element: &'static str) -> Self {
        Self { key, element, rule: FieldRule::Columns }
    }
}

fn literal(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Renders `fields` in order as children of `parent`.
///
/// # Errors
///
/// Returns [`ViewError::MissingField`] for an absent required field and
/// [`ViewError::TypeMismatch`] for options of the wrong shape.
pub fn render(fields: &[FieldSpec], options: &ViewOptions, parent: &mut Element) -> Result<()> {
    for field in fields {
        render_field(field, options, parent)?;
    }
    Ok(())
}

fn render_field(field: &FieldSpec, options: &ViewOptions, parent: &mut Element) -> Result<()> {
    let key = field.key;
    match field.rule {
        FieldRule::Required => {
            let value = options
                .str(key)?
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ViewError::MissingField { field: key.to_string() })?;
            parent.push(Element::new(field.element).with_text(value));
        }
        FieldRule::Optional => {
            if let Some(value) = options.str(key)? {
                parent.push(Element::new(field.element).with_text(value));
            }
        }
        FieldRule::Flag => {
            let value = options.flag(key)?.unwrap_or(false);
            parent.push(Element::new(field.element).with_text(literal(value)));
        }
        FieldRule::TriState => {
            if let Some(value) = options.flag(key)? {
                parent.push(Element::new(field.element).with_text(literal(value)));
            }
        }
        FieldRule::Text { default } => {
            let value = options.scalar_text(key)?.unwrap_or_else(|| default.to_string());
            parent.push(Element::new(field.element).with_text(value));
        }
        FieldRule::TextIfSet => {
            let element = parent.sub_element(field.element);
            if let Some(value) = options.str(key)? {
                element.text = Some(value.to_string());
            }
        }
        FieldRule::Choice { allowed, default } => {
            let value = match options.str(key)? {
                Some(v) if allowed.contains(&v) => v,
                Some(v) => {
                    tracing::warn!(
                        option = key,
                        value = v,
                        fallback = default,
                        "unsupported value, using default"
                    );
                    default
                }
                None => default,
            };
            parent.push(Element::new(field.element).with_text(value));
        }
        FieldRule::Container { attrs, children } => {
            let mut element = Element::new(field.element);
            for (name, value) in attrs {
                element.set_attr(*name, *value);
            }
            render(children, options, &mut element)?;
            parent.push(element);
        }
        FieldRule::JobNames { comparator } => {
            let mut element = Element::new(field.element);
            element.push(Element::new("comparator").with_attr("class", comparator));
            for job in options.list(key)?.unwrap_or_default() {
                element.push(Element::new("string").with_text(job.as_str()));
            }
            parent.push(element);
        }
        FieldRule::Columns => {
            let mut element = Element::new(field.element);
            for id in options.list(key)?.unwrap_or_default() {
                match columns::lookup(id) {
                    Some(column) => element.push(Element::new(column)),
                    None => tracing::debug!(column = %id, "skipping unknown column"),
                }
            }
            parent.push(element);
        }
    }
    Ok(())
}
