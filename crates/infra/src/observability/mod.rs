//! Observability infrastructure
//!
//! Structured logging only: every module emits through `tracing` macros and
//! the subscriber is installed once by the embedding application through
//! [`init_logging`].

pub mod logging;

pub use logging::{build_filter, init_logging};
