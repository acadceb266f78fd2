// file: src/scanner/mod.rs
// description: directory walking and per-document scanning
// reference: internal module structure

pub mod document;
pub mod walker;

pub use document::DocumentScanner;
pub use walker::{CandidateFile, FileWalker};
