use crate::http::parser::ParseError;

/// Ordered header collection with case-insensitive lookup.
///
/// Names keep the case they were inserted with. Inserting a name that is
/// already present replaces its value in place, so the last write wins and
/// the original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    entries: Vec<(String, String)>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single `Name: value` header line.
    ///
    /// Splits on the first `:` and trims both sides. A line without a colon,
    /// or with an empty name, is a format error.
    ///
    /// # Example
    ///
    /// ```
    /// # use minicat::http::headers::HttpHeaders;
    /// let (name, value) = HttpHeaders::parse_line("Host:   example.com ").unwrap();
    /// assert_eq!(name, "Host");
    /// assert_eq!(value, "example.com");
    /// assert!(HttpHeaders::parse_line("invalid").is_err());
    /// ```
    pub fn parse_line(line: &str) -> Result<(String, String), ParseError> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::InvalidHeader(line.to_string()));
        }

        Ok((name.to_string(), value.trim().to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders every header as a `Name: value\r\n` line.
    pub fn to_wire(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}: {}\r\n", k, v))
            .collect()
    }
}
