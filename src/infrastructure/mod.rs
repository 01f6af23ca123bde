//! Infrastructure layer
//!
//! Configuration, logging and loading of definition files.

mod config;
mod loader;
mod logging;
mod patterns;

pub use config::Config;
pub use loader::{ViewLoader, definition_files};
pub use logging::init_logging;
pub use patterns::{ExcludeRules, PatternSet};
