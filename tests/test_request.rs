use minicat::http::query::QueryParams;
use minicat::http::request::{Method, RequestBuilder};
use minicat::session::SessionStore;

#[test]
fn test_request_header_retrieval() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Host", "example.com")
        .header("Content-Type", "application/json")
        .build()
        .unwrap();

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/login")
        .header("Content-Length", "42")
        .build()
        .unwrap();

    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_request_content_length_missing() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .build()
        .unwrap();

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_content_length_invalid() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/login")
        .header("Content-Length", "not-a-number")
        .build()
        .unwrap();

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_builder_defaults_version() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .build()
        .unwrap();

    assert_eq!(req.version(), "HTTP/1.1");
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_path_never_contains_query() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/search?q=rust")
        .query_params(QueryParams::parse("q=rust").unwrap())
        .build()
        .unwrap();

    assert_eq!(req.path(), "/search");
    assert_eq!(req.query_params().get("q"), Some("rust"));
}

#[test]
fn test_request_cookie_from_header() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Cookie", "JSESSIONID=abc")
        .build()
        .unwrap();

    assert_eq!(req.cookie().session_id(), Some("abc"));
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("get"), None); // Case-sensitive
}

#[tokio::test]
async fn test_request_session_resolves_registered_id() {
    let store = SessionStore::new();
    let session = store.create_and_register().await;

    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Cookie", format!("JSESSIONID={}", session.id()))
        .build()
        .unwrap();

    let resolved = req.session(&store).await.unwrap();
    assert_eq!(resolved.id(), session.id());
}

#[tokio::test]
async fn test_request_session_unknown_id_is_none() {
    let store = SessionStore::new();

    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Cookie", "JSESSIONID=forged")
        .build()
        .unwrap();

    assert!(req.session(&store).await.is_none());
    assert!(store.is_empty().await);
}
