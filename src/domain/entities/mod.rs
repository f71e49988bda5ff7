//! Core domain entities.
//!
//! - [`UrlRecord`] - A shortened URL with its metadata and click count

pub mod url_record;

pub use url_record::UrlRecord;
