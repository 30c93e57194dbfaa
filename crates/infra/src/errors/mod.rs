//! Infrastructure-side error conversions into the domain error.

pub mod conversions;

pub use conversions::InfraError;
