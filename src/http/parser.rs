use crate::http::headers::HttpHeaders;
use crate::http::query::QueryParams;
use crate::http::request::{Method, Request, RequestBuilder};

/// Upper bound on the request line plus header block.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest(String),
    InvalidMethod(String),
    InvalidHeader(String),
    InvalidContentLength(String),
    InvalidQueryString(String),
    InvalidBody,
    HeadTooLarge,
    Incomplete,
}

/// Parses one request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied, or
/// `ParseError::Incomplete` when more bytes are needed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) if end > MAX_HEAD_BYTES => return Err(ParseError::HeadTooLarge),
        Some(end) => end,
        None if buf.len() > MAX_HEAD_BYTES => return Err(ParseError::HeadTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest("request head is not UTF-8".to_string()))?;

    let mut lines = headers_str.split("\r\n");

    // Request line: exactly three tokens separated by single spaces
    let request_line = lines.next().unwrap_or_default();
    let parts: Vec<&str> = request_line.split(' ').collect();
    let [method_str, target, version] = parts[..] else {
        return Err(ParseError::InvalidRequest(request_line.to_string()));
    };
    if target.is_empty() || version.is_empty() {
        return Err(ParseError::InvalidRequest(request_line.to_string()));
    }

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::InvalidMethod(method_str.to_string()))?;

    let (path, query_params) = parse_request_target(target)?;

    let mut builder = RequestBuilder::new()
        .method(method)
        .path(path)
        .version(version)
        .query_params(query_params);

    // Headers
    let mut headers = HttpHeaders::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = HttpHeaders::parse_line(line)?;
        headers.insert(key, value);
    }

    // Body
    let content_length = headers
        .get("Content-Length")
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength(v.to_string()))
        })
        .transpose()?
        .unwrap_or(0);

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = std::str::from_utf8(&body_bytes[..content_length])
        .map_err(|_| ParseError::InvalidBody)?;

    for (key, value) in headers.iter() {
        builder = builder.header(key, value);
    }

    let request = builder
        .body(body)
        .build()
        .map_err(|e| ParseError::InvalidRequest(e.to_string()))?;

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

/// Splits a request target on the first `?` into path and query params.
fn parse_request_target(target: &str) -> Result<(&str, QueryParams), ParseError> {
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, QueryParams::parse(query)?),
        None => (target, QueryParams::default()),
    };

    if path.is_empty() {
        return Err(ParseError::InvalidRequest(target.to_string()));
    }

    Ok((path, query))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path(), "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn request_target_query_is_split_off() {
        let (path, query) = parse_request_target("/login?account=gugu&password=pw").unwrap();

        assert_eq!(path, "/login");
        assert_eq!(query.get("account"), Some("gugu"));
        assert_eq!(query.get("password"), Some("pw"));
    }

    #[test]
    fn oversized_head_is_rejected() {
        let mut req = b"GET / HTTP/1.1\r\nX-Filler: ".to_vec();
        req.extend(std::iter::repeat_n(b'a', MAX_HEAD_BYTES));

        assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::HeadTooLarge);
    }

    #[test]
    fn oversized_complete_head_is_rejected() {
        let mut req = b"GET / HTTP/1.1\r\nX-Filler: ".to_vec();
        req.extend(std::iter::repeat_n(b'a', MAX_HEAD_BYTES));
        req.extend_from_slice(b"\r\n\r\n");

        assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::HeadTooLarge);
    }
}
