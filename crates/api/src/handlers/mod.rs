//! Request handlers, one module per resource.

pub mod records;
pub mod search;
