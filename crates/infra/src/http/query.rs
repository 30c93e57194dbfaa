//! Query-string serialization
//!
//! Parameters keep insertion order. Two renderings exist:
//!
//! - [`QueryEncoding::Raw`] is what the transport appends to a request URL.
//!   Brackets stay literal so the backend sees its own syntax
//!   (`ids[0]=a&filter[type]=MANUAL`) verbatim. Only characters that would
//!   break the pair structure (`&`, `=`, `#`, `%`, `+` and whitespace) are
//!   percent-encoded.
//! - [`QueryEncoding::Component`] is what the endpoint catalog embeds in
//!   paths. Keys and values are percent-encoded and empty strings are dropped.
//!
//! Null values are dropped in both modes.

use std::fmt;

/// A single query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<QueryValue>),
    Map(Vec<(String, QueryValue)>),
}

impl QueryValue {
    fn is_droppable(&self, encoding: QueryEncoding) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => encoding == QueryEncoding::Component && s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&rendered.join(","))
            }
            Self::Map(_) => f.write_str("[object]"),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// How keys and values are written into the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    Raw,
    Component,
}

/// Ordered query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Append every parameter of `other` after the current ones.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True when rendering would produce no pairs at all.
    pub fn is_empty(&self) -> bool {
        self.pairs(QueryEncoding::Raw).is_empty()
    }

    /// Flatten into unencoded `key=value` pairs, bracketing nested keys.
    pub fn pairs(&self, encoding: QueryEncoding) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (key, value) in &self.entries {
            flatten_into(&mut out, key, value, encoding);
        }
        out
    }

    /// Render without a leading `?`.
    pub fn to_query_string(&self, encoding: QueryEncoding) -> String {
        self.pairs(encoding)
            .into_iter()
            .map(|(key, value)| match encoding {
                QueryEncoding::Raw => format!("{}={}", encode_raw(&key), encode_raw(&value)),
                QueryEncoding::Component => {
                    format!("{}={}", urlencoding::encode(&key), urlencoding::encode(&value))
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Percent-encode the characters that would split or truncate a pair.
fn encode_raw(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' | '=' | '#' | '%' | '+' | ' ' | '\t' | '\n' | '\r' => {
                out.push_str(&format!("%{:02X}", ch as u32));
            }
            other => out.push(other),
        }
    }
    out
}

fn flatten_into(
    out: &mut Vec<(String, String)>,
    key: &str,
    value: &QueryValue,
    encoding: QueryEncoding,
) {
    if value.is_droppable(encoding) {
        return;
    }
    match value {
        QueryValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(out, &format!("{key}[{index}]"), item, encoding);
            }
        }
        QueryValue::Map(fields) => {
            for (sub, item) in fields {
                flatten_into(out, &format!("{key}[{sub}]"), item, encoding);
            }
        }
        scalar => out.push((key.to_string(), scalar.to_string())),
    }
}

/// Parse a flat query string (with or without a leading `?`) into ordered
/// pairs, percent-decoding keys and values.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_mode_keeps_brackets_and_path_characters() {
        let params = QueryParams::new()
            .with("search", "a/b:c")
            .with("dateFrom", "2025-01-01T00:00:00Z")
            .with("ids", vec!["x"]);
        assert_eq!(
            params.to_query_string(QueryEncoding::Raw),
            "search=a/b:c&dateFrom=2025-01-01T00:00:00Z&ids[0]=x"
        );
    }

    #[test]
    fn raw_mode_escapes_pair_delimiters() {
        let params = QueryParams::new()
            .with("search", "Ada & Co")
            .with("note", "50%=half#x+y");
        assert_eq!(
            params.to_query_string(QueryEncoding::Raw),
            "search=Ada%20%26%20Co&note=50%25%3Dhalf%23x%2By"
        );
    }

    #[test]
    fn raw_rendering_round_trips_through_parse() {
        let params = QueryParams::new()
            .with("search", "Ada & Co = 100%")
            .with("tag", "#vip+1")
            .with("filter", QueryValue::Map(vec![("type".into(), "MANUAL".into())]));

        let parsed = parse_query(&params.to_query_string(QueryEncoding::Raw));
        assert_eq!(parsed, params.pairs(QueryEncoding::Raw));
    }

    #[test]
    fn component_mode_percent_encodes() {
        let params = QueryParams::new().with("search", "a b&c");
        assert_eq!(params.to_query_string(QueryEncoding::Component), "search=a%20b%26c");
    }

    #[test]
    fn nulls_are_dropped_in_both_modes() {
        let params = QueryParams::new()
            .with("a", 1)
            .with("b", Option::<String>::None)
            .with("c", true);
        assert_eq!(params.to_query_string(QueryEncoding::Raw), "a=1&c=true");
        assert_eq!(params.to_query_string(QueryEncoding::Component), "a=1&c=true");
    }

    #[test]
    fn empty_strings_dropped_only_when_encoding() {
        let params = QueryParams::new().with("type", "").with("limit", 5);
        assert_eq!(params.to_query_string(QueryEncoding::Raw), "type=&limit=5");
        assert_eq!(params.to_query_string(QueryEncoding::Component), "limit=5");
    }

    #[test]
    fn arrays_and_maps_use_bracket_notation() {
        let params = QueryParams::new().with("ids", vec!["a", "b"]).with(
            "filter",
            QueryValue::Map(vec![
                ("type".into(), "MANUAL".into()),
                ("skip".into(), QueryValue::Null),
                ("converted".into(), false.into()),
            ]),
        );
        assert_eq!(
            params.to_query_string(QueryEncoding::Raw),
            "ids[0]=a&ids[1]=b&filter[type]=MANUAL&filter[converted]=false"
        );
    }

    #[test]
    fn floats_render_like_javascript_numbers() {
        let params = QueryParams::new().with("ratio", 1.0).with("score", 2.5);
        assert_eq!(params.to_query_string(QueryEncoding::Raw), "ratio=1&score=2.5");
    }

    #[test]
    fn is_empty_ignores_dropped_values() {
        assert!(QueryParams::new().is_empty());
        assert!(QueryParams::new().with("x", QueryValue::Null).is_empty());
        assert!(!QueryParams::new().with("x", 0).is_empty());
    }

    #[test]
    fn encode_then_parse_round_trips_scalars() {
        let params = QueryParams::new()
            .with("user_id", "65f1c0ffee")
            .with("search", "Ada & Co = 100%")
            .with("page", 3)
            .with("ratio", 0.25)
            .with("is_converted", false)
            .with("missing", QueryValue::Null);

        let encoded = params.to_query_string(QueryEncoding::Component);
        let parsed = parse_query(&format!("?{encoded}"));

        assert_eq!(
            parsed,
            vec![
                ("user_id".to_string(), "65f1c0ffee".to_string()),
                ("search".to_string(), "Ada & Co = 100%".to_string()),
                ("page".to_string(), "3".to_string()),
                ("ratio".to_string(), "0.25".to_string()),
                ("is_converted".to_string(), "false".to_string()),
            ]
        );
        assert_eq!(parsed, params.pairs(QueryEncoding::Component));
    }

    #[test]
    fn parse_handles_bare_keys_and_empty_segments() {
        assert_eq!(
            parse_query("a=1&&flag"),
            vec![("a".to_string(), "1".to_string()), ("flag".to_string(), String::new())]
        );
        assert!(parse_query("").is_empty());
    }
}
