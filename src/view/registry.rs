//! View generators and their registry
//!
//! A [`ViewGenerator`] turns [`ViewOptions`] into a document root. The
//! [`ViewRegistry`] maps the `view-type` option onto a registered
//! [`ViewKind`].

use super::build_pipeline::PipelineView;
use super::errors::{Result, ViewError};
use super::fields::{self, FieldSpec};
use super::list::ListView;
use super::options::ViewOptions;
use crate::xml::{Element, XmlView};
use std::collections::HashMap;
use std::sync::Arc;

/// Option key selecting the view kind
pub const VIEW_TYPE_KEY: &str = "view-type";

/// View kind used when `view-type` is not set
pub const DEFAULT_VIEW_TYPE: &str = "list";

/// Produces a view document from options
pub trait ViewGenerator: Send + Sync {
    /// Empty root element, including any root attributes.
    fn root(&self) -> Element;

    /// Ordered field table.
    fn fields(&self) -> &'static [FieldSpec];

    /// Builds the full document.
    ///
    /// The result depends only on `options` and the field table.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or an option has the
    /// wrong shape. No partial document is returned.
    fn generate(&self, options: &ViewOptions) -> Result<Element> {
        let mut root = self.root();
        fields::render(self.fields(), options, &mut root)?;
        Ok(root)
    }
}

/// A registered view kind
#[derive(Clone)]
pub struct ViewKind {
    /// Value of `view-type` selecting this kind
    pub name: String,
    /// Ordering hint for callers merging several generators; lower runs first
    pub sequence: i32,
    /// Generator implementation
    pub generator: Arc<dyn ViewGenerator>,
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewKind")
            .field("name", &self.name)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// Registry of view kinds keyed by `view-type`
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    kinds: HashMap<String, ViewKind>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the `list` and `pipeline` kinds.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("list", 0, ListView);
        registry.register("pipeline", 0, PipelineView);
        registry
    }

    /// Registers a generator under `name`, replacing any previous one.
    pub fn register<G: ViewGenerator + 'static>(
        &mut self,
        name: impl Into<String>,
        sequence: i32,
        generator: G,
    ) {
        let name = name.into();
        self.kinds.insert(
            name.clone(),
            ViewKind {
                name,
                sequence,
                generator: Arc::new(generator),
            },
        );
    }

    /// Gets a kind by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ViewKind> {
        self.kinds.get(name)
    }

    /// Registered kinds ordered by sequence, then name.
    #[must_use]
    pub fn kinds(&self) -> Vec<&ViewKind> {
        let mut kinds: Vec<_> = self.kinds.values().collect();
        kinds.sort_by(|a, b| a.sequence.cmp(&b.sequence).then_with(|| a.name.cmp(&b.name)));
        kinds
    }

    /// Resolves the kind selected by the options' `view-type`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::UnknownViewType`] for unregistered types and
    /// [`ViewError::TypeMismatch`] if `view-type` is not a string.
    pub fn resolve(&self, options: &ViewOptions) -> Result<&ViewKind> {
        let view_type = options.str(VIEW_TYPE_KEY)?.unwrap_or(DEFAULT_VIEW_TYPE);
        self.get(view_type)
            .ok_or_else(|| ViewError::UnknownViewType(view_type.to_string()))
    }

    /// Generates the document for one view definition.
    ///
    /// # Errors
    ///
    /// Propagates resolution and generation errors.
    pub fn xml_for_view(&self, options: &ViewOptions) -> Result<XmlView> {
        let kind = self.resolve(options)?;
        let root = kind.generator.generate(options)?;
        let name = options.name().unwrap_or_default();
        tracing::debug!(view = name, kind = %kind.name, "generated view");
        Ok(XmlView::new(name, root))
    }
}
