//! Utility functions for common operations.
//!
//! - **Text sanitizing**: removing characters XML 1.0 cannot carry

mod text;

pub use text::strip_xml_invalid_chars;
