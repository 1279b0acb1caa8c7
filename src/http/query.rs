use std::collections::HashMap;

use crate::http::parser::ParseError;

/// Flat key/value pairs parsed from a query string or a form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Parses `k1=v1&k2=v2`.
    ///
    /// Every `&`-separated segment must contain exactly one `=` followed by
    /// a non-empty value, otherwise the whole string is rejected. The key
    /// may be empty. Trailing empty segments (`a=b&`) are ignored. Empty or
    /// blank input yields no params.
    ///
    /// Values are taken verbatim; no percent-decoding is applied.
    pub fn parse(query: &str) -> Result<Self, ParseError> {
        let mut params = HashMap::new();

        let pairs = query.trim_end_matches('&');
        if pairs.trim().is_empty() {
            return Ok(Self { params });
        }

        for pair in pairs.split('&') {
            let mut parts = pair.split('=');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !value.is_empty() => (key, value),
                _ => return Err(ParseError::InvalidQueryString(query.to_string())),
            };

            params.insert(key.to_string(), value.to_string());
        }

        Ok(Self { params })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|v| v.as_str())
    }

    /// Returns `true` when at least one pair was parsed.
    pub fn exists(&self) -> bool {
        !self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
