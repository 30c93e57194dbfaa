//! Response envelope and pagination shapes
//!
//! Every backend operation answers with the same envelope:
//! `{code, success, message, data, redirect}`. List endpoints additionally
//! carry pagination counters, either next to `data` inside a page object or
//! under a top-level `pagination` key.

use serde::{Deserialize, Deserializer, Serialize};

/// Uniform success envelope returned by the backend
///
/// A missing or `null` `data` decodes as `T::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct GenericResponse<T = serde_json::Value> {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pagination counters attached to list responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// A page of items nested inside the envelope's `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOf<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(flatten)]
    pub pagination: Option<Pagination>,
}

impl<T> Default for PageOf<T> {
    fn default() -> Self {
        Self { data: Vec::new(), pagination: None }
    }
}

/// Pagination input accepted by list endpoints
///
/// Either `offset`/`limit` or `page`/`limit`; unset fields are left out of the
/// query string entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn offset(offset: u32, limit: u32) -> Self {
        Self { offset: Some(offset), limit: Some(limit), page: None }
    }

    pub fn page(page: u32, limit: u32) -> Self {
        Self { offset: None, limit: Some(limit), page: Some(page) }
    }
}
