//! HTTP transport primitives
//!
//! The single-attempt [`HttpClient`], query serialization, header writers
//! and the replayable [`RequestDescriptor`].

pub mod client;
pub mod headers;
pub mod query;
pub mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use headers::{HeaderMapWriter, HeaderWriter, PlainHeaders};
pub use query::{parse_query, QueryEncoding, QueryParams, QueryValue};
pub use request::{RequestDescriptor, ResponseKind};
