//! XML document model and serialization

mod element;
mod output;

pub use element::Element;
pub use output::{XmlView, digest, to_string};
