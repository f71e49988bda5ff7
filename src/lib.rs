//! # Redis Shortener
//!
//! A URL shortening service built with Axum and Redis.
//!
//! Every new link takes the next value of a global counter; its short code is
//! that value written in base 62. Codes therefore never collide and grow by
//! one character only after the previous length is used up.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - URL records, repository traits, click worker
//! - **Application Layer** ([`application`]) - Shorten, resolve, info and latest flows
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value backends and the record store
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Collision-free counter-based short codes with a configurable alphabet
//! - Asynchronous click counting with retry logic
//! - Synchronous or best-effort record persistence
//! - In-memory backend for tests and local development
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"  # Optional
//! export DOMAIN_NAME="s.example.com"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::RecordRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::kv::{KvBackend, MemoryBackend, RedisBackend};
    pub use crate::infrastructure::persistence::{PersistenceMode, RecordStore};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::Encoder;
}
