//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into [`crate::application::services::LinkService`]
//! calls and formats the responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
