//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for durable state.
//!
//! # Modules
//!
//! - [`kv`] - Key-value backend abstraction (Redis and in-memory implementations)
//! - [`persistence`] - Record store built on the key-value backend

pub mod kv;
pub mod persistence;
