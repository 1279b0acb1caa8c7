use std::collections::HashMap;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Cookies sent by the client in the `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpCookie {
    values: HashMap<String, String>,
}

impl HttpCookie {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses `a=1; b=2`. Whitespace around names and values is trimmed;
    /// segments without `=` or with an empty name are skipped.
    pub fn parse(header: &str) -> Self {
        let values = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.get(SESSION_COOKIE)
    }
}
