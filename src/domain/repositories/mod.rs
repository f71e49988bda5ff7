//! Repository trait definitions for the domain layer.
//!
//! The traits describe what the service needs from storage; implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`RecordRepository`] - Counter allocation and URL record access

pub mod record_repository;

pub use record_repository::RecordRepository;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
