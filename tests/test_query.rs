use minicat::http::cookie::HttpCookie;
use minicat::http::headers::HttpHeaders;
use minicat::http::parser::ParseError;
use minicat::http::query::QueryParams;

#[test]
fn test_query_string_parsing() {
    let params = QueryParams::parse("account=gugu&password=password").unwrap();

    assert_eq!(params.get("account"), Some("gugu"));
    assert_eq!(params.get("password"), Some("password"));
    assert_eq!(params.get("email"), None);
    assert!(params.exists());
}

#[test]
fn test_query_values_are_kept_verbatim() {
    let params = QueryParams::parse("account=gugu&email=a@b.com").unwrap();

    assert_eq!(params.get("email"), Some("a@b.com"));
}

#[test]
fn test_empty_or_blank_query_has_no_params() {
    for query in ["", "   ", "&"] {
        let params = QueryParams::parse(query).unwrap();
        assert!(!params.exists());
        assert!(params.is_empty());
    }
}

#[test]
fn test_query_segment_without_equals_fails() {
    let result = QueryParams::parse("a%b$c^d");

    assert!(matches!(result, Err(ParseError::InvalidQueryString(_))));
}

#[test]
fn test_query_rejects_any_bad_segment() {
    for query in [
        "account=gugu&password",
        "account=gugu&a=b=c",
        "account=gugu&&password=pw",
        "account=",
        "a&&b",
        "a=b&&c=d",
    ] {
        assert!(
            QueryParams::parse(query).is_err(),
            "accepted query {:?}",
            query
        );
    }
}

#[test]
fn test_query_trailing_ampersand_is_ignored() {
    let params = QueryParams::parse("account=gugu&password=pw&").unwrap();

    assert_eq!(params.get("account"), Some("gugu"));
    assert_eq!(params.get("password"), Some("pw"));
    assert_eq!(params.len(), 2);

    let params = QueryParams::parse("a=b&&").unwrap();
    assert_eq!(params.get("a"), Some("b"));
}

#[test]
fn test_query_empty_key_is_accepted() {
    let params = QueryParams::parse("=gugu").unwrap();

    assert_eq!(params.get(""), Some("gugu"));
    assert!(params.exists());
}

#[test]
fn test_query_duplicate_key_last_wins() {
    let params = QueryParams::parse("a=1&a=2").unwrap();

    assert_eq!(params.get("a"), Some("2"));
    assert_eq!(params.len(), 1);
}

#[test]
fn test_header_line_parsing() {
    let (name, value) = HttpHeaders::parse_line("Name: value").unwrap();

    assert_eq!(name, "Name");
    assert_eq!(value, "value");
}

#[test]
fn test_header_line_value_whitespace_is_trimmed() {
    let (name, value) = HttpHeaders::parse_line("Name:\t  value   ").unwrap();

    assert_eq!(name, "Name");
    assert_eq!(value, "value");
}

#[test]
fn test_header_line_without_colon_fails() {
    let result = HttpHeaders::parse_line("invalid");

    assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
}

#[test]
fn test_headers_wire_format_keeps_order() {
    let mut headers = HttpHeaders::new();
    headers.insert("Location", "/index.html");
    headers.insert("Set-Cookie", "JSESSIONID=abc");

    assert_eq!(
        headers.to_wire(),
        "Location: /index.html\r\nSet-Cookie: JSESSIONID=abc\r\n"
    );
}

#[test]
fn test_cookie_parsing_trims_whitespace() {
    let cookie = HttpCookie::parse("  JSESSIONID = abc ;theme=dark");

    assert_eq!(cookie.session_id(), Some("abc"));
    assert_eq!(cookie.get("theme"), Some("dark"));
    assert!(!cookie.has("missing"));
}
