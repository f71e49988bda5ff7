//! Utility functions for short code encoding and URL processing.
//!
//! - [`code_generator`] - Counter to short code encoding
//! - [`url_normalizer`] - Long URL validation

pub mod code_generator;
pub mod url_normalizer;
