pub mod document;

pub use document::{Document, DocumentError, ViewBox, load_document, load_file};
