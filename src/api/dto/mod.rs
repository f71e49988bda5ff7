//! Data Transfer Objects for HTTP requests and responses.
//!
//! Records themselves are serialized straight from
//! [`crate::domain::entities::UrlRecord`].

pub mod health;
pub mod shorten;
