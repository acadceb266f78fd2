// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod keyword;
pub mod location;
pub mod report;
pub mod request;

pub use document::{DocumentFormat, DocumentResult, DocumentStatus, Hit};
pub use keyword::{Keyword, KeywordSet};
pub use location::{Location, cell_reference, column_letters};
pub use report::{Completion, SearchReport};
pub use request::SearchRequest;
