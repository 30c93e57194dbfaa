//! # Leadflow Domain
//!
//! Business domain types and models for the Leadflow API client.
//!
//! This crate contains:
//! - The success envelope and pagination shapes shared by every endpoint
//! - Request/response DTOs (leads, notifications, auth, user, support, admin)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Leadflow crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
