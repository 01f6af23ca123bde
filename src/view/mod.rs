//! View definitions and generators
//!
//! A view is a named, filtered presentation of jobs on the build server.
//! Each view kind owns an ordered field table (see [`fields`]) that maps the
//! definition's options onto the server's XML configuration.

pub mod build_pipeline;
pub mod columns;
pub mod errors;
pub mod fields;
pub mod list;
pub mod options;
pub mod registry;


pub use build_pipeline::PipelineView;
pub use errors::{Result, ViewError};
pub use fields::{FieldRule, FieldSpec};
pub use list::ListView;
pub use options::{OptionValue, ViewOptions};
pub use registry::{ViewGenerator, ViewKind, ViewRegistry};
