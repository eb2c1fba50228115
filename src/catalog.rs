//! Schema layer: attributes and the headers built from them.

pub mod attribute;
pub mod header;

pub use attribute::Attribute;
pub use header::{Header, HeaderError, HeaderResult};
