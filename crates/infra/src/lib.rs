//! # Leadflow Infrastructure
//!
//! Everything that touches the network or the environment.
//!
//! This crate contains:
//! - The HTTP transport (single attempt, query serialization, header writers)
//! - The authenticated API client with coordinated credential refresh
//! - The endpoint catalog and one call wrapper per backend operation
//! - Notification bootstrap over a caller-supplied live channel
//! - Configuration loading and logging initialisation
//!
//! ## Architecture
//! - Depends on `leadflow-domain` for DTOs, configuration and errors
//! - Contains all "impure" code (I/O, environment, global subscriber)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{ApiClient, ApiCommands, ApiError, ApiErrorCategory, CredentialStore};
pub use errors::InfraError;
pub use http::{HttpClient, RequestDescriptor};
