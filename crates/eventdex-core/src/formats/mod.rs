//! # Output Formats
//!
//! Encoding and writing of the `index.json` document.

pub mod index_file;

pub use index_file::{index_from_bytes, index_to_bytes, write_index};
