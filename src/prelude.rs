//! Prelude module for common imports

pub use crate::infrastructure::{Config, ViewLoader};
pub use crate::view::columns::COLUMNS;
pub use crate::view::errors::ViewError;
pub use crate::view::fields::{FieldRule, FieldSpec};
pub use crate::view::options::{OptionValue, ViewOptions};
pub use crate::view::registry::{ViewGenerator, ViewKind, ViewRegistry};
pub use crate::view::{ListView, PipelineView};
pub use crate::xml::{Element, XmlView};
