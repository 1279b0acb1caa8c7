/// Content types the server knows how to label.
///
/// Anything unrecognised is served as `text/plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Css,
    JavaScript,
    Json,
    Svg,
    Png,
    Icon,
    Plain,
}

impl ContentType {
    /// Picks a content type from a path's extension.
    ///
    /// # Example
    ///
    /// ```
    /// # use minicat::http::mime::ContentType;
    /// assert_eq!(ContentType::from_path("/css/styles.css"), ContentType::Css);
    /// assert_eq!(ContentType::from_path("/index.html"), ContentType::Html);
    /// assert_eq!(ContentType::from_path("/README"), ContentType::Plain);
    /// ```
    pub fn from_path(path: &str) -> Self {
        match extension(path).map(|ext| ext.to_ascii_lowercase()).as_deref() {
            Some("html" | "htm") => ContentType::Html,
            Some("css") => ContentType::Css,
            Some("js") => ContentType::JavaScript,
            Some("json") => ContentType::Json,
            Some("svg") => ContentType::Svg,
            Some("png") => ContentType::Png,
            Some("ico") => ContentType::Icon,
            _ => ContentType::Plain,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Css => "text/css",
            ContentType::JavaScript => "application/javascript",
            ContentType::Json => "application/json",
            ContentType::Svg => "image/svg+xml",
            ContentType::Png => "image/png",
            ContentType::Icon => "image/x-icon",
            ContentType::Plain => "text/plain",
        }
    }

    /// Value for the `Content-Type` header. Textual types carry a charset.
    pub fn header_value(&self) -> String {
        match self {
            ContentType::Png | ContentType::Icon => self.mime_type().to_string(),
            _ => format!("{};charset=utf-8", self.mime_type()),
        }
    }
}

/// Returns the extension of the last path segment, if it has one.
pub fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_only_looks_at_last_segment() {
        assert_eq!(extension("/assets.v2/app"), None);
        assert_eq!(extension("/assets.v2/app.js"), Some("js"));
        assert_eq!(extension("/.hidden"), None);
    }

    #[test]
    fn binary_types_have_no_charset() {
        assert_eq!(ContentType::Png.header_value(), "image/png");
        assert_eq!(ContentType::Html.header_value(), "text/html;charset=utf-8");
    }
}
