//! # jenkins-views - Jenkins view configuration from YAML
//!
//! Turns declarative view definitions (a flat mapping of options) into the
//! XML documents Jenkins stores for its views. Each view kind owns an ordered
//! field table that fixes, per option, whether the element is always present,
//! what its default is and how the value is rendered.
//!
//! ## Quick Start
//!
//! ```
//! use jenkins_views::prelude::*;
//!
//! let options = ViewOptions::new()
//!     .set("name", "nightly")
//!     .set("columns", vec!["status", "job", "weather"]);
//!
//! let view = ViewRegistry::with_builtin().xml_for_view(&options).unwrap();
//! assert_eq!(view.root.name, "hudson.model.ListView");
//! assert!(view.output().unwrap().contains("<hudson.views.JobColumn/>"));
//! ```
//!
//! ## View kinds
//!
//! - `list` ([`ListView`]): flat job table with selectable columns
//! - `pipeline` ([`PipelineView`]): Build Pipeline plugin view
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod infrastructure;
pub mod view;
pub mod xml;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use infrastructure::{Config, ViewLoader, init_logging};
pub use view::{
    FieldRule, FieldSpec, ListView, OptionValue, PipelineView, ViewError, ViewGenerator, ViewKind,
    ViewOptions, ViewRegistry,
};
pub use xml::{Element, XmlView};

/// Version of the jenkins-views crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
