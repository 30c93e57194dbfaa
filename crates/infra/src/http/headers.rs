//! Header writers
//!
//! The auth injector writes the bearer credential through [`HeaderWriter`]
//! without knowing which header representation sits behind it. Two adapters
//! exist: [`HeaderMapWriter`] over a structured `reqwest` header map used at
//! dispatch, and [`PlainHeaders`], the ordered name/value list carried by a
//! request descriptor.

use leadflow_domain::LeadflowError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Anything a header can be written into.
pub trait HeaderWriter {
    /// Set `name` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `LeadflowError::Config` when the name or value is not a valid
    /// HTTP header.
    fn set(&mut self, name: &str, value: &str) -> Result<(), LeadflowError>;
}

/// Adapter over a structured `HeaderMap`.
pub struct HeaderMapWriter<'a> {
    headers: &'a mut HeaderMap,
}

impl<'a> HeaderMapWriter<'a> {
    pub fn new(headers: &'a mut HeaderMap) -> Self {
        Self { headers }
    }
}

impl HeaderWriter for HeaderMapWriter<'_> {
    fn set(&mut self, name: &str, value: &str) -> Result<(), LeadflowError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| LeadflowError::Config(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            LeadflowError::Config(format!("invalid value for header {}: {e}", name.as_str()))
        })?;
        self.headers.insert(name, value);
        Ok(())
    }
}

/// Ordered plain name/value headers; names compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainHeaders {
    entries: Vec<(String, String)>,
}

impl PlainHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy every header into another writer, in order.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected header.
    pub fn write_into(&self, target: &mut dyn HeaderWriter) -> Result<(), LeadflowError> {
        for (name, value) in self.iter() {
            target.set(name, value)?;
        }
        Ok(())
    }
}

impl HeaderWriter for PlainHeaders {
    fn set(&mut self, name: &str, value: &str) -> Result<(), LeadflowError> {
        if name.is_empty() {
            return Err(LeadflowError::Config("header name must not be empty".into()));
        }
        match self.entries.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }
}
