use webcodec::http::parser::{MAX_BODY_SIZE, ParseError, parse_http_request};
use webcodec::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET /people.yaml HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/people.yaml");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("host"), Some("example.com"));
    assert_eq!(parsed.accept(), "*/*");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /echo HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: 7\r\n\r\n{\"a\":1}";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.content_type(), "application/json");
    assert_eq!(parsed.body, b"{\"a\":1}".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_leaves_pipelined_request_unconsumed() {
    let req = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n";
    let (first, consumed) = parse_http_request(req).unwrap();
    assert_eq!(first.path, "/a");

    let (second, _) = parse_http_request(&req[consumed..]).unwrap();
    assert_eq!(second.path, "/b");
}

#[test]
fn test_parse_lowercase_content_length() {
    let req = b"PUT /x HTTP/1.1\r\ncontent-length: 2\r\n\r\nhi";
    let (parsed, _) = parse_http_request(req).unwrap();
    assert_eq!(parsed.body, b"hi".to_vec());
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    assert!(matches!(parse_http_request(req), Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    assert!(matches!(parse_http_request(req), Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"INVALID / HTTP/1.1\r\n\r\n";
    assert!(matches!(parse_http_request(req), Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    assert!(matches!(parse_http_request(req), Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::InvalidContentLength)
    ));
}

#[test]
fn test_parse_truncated_request_line() {
    let req = b"GET /\r\n\r\n";
    assert!(matches!(parse_http_request(req), Err(ParseError::InvalidRequest)));
}

#[test]
fn test_parse_conflicting_content_lengths() {
    let req = b"POST /e HTTP/1.1\r\nContent-Length: 2\r\ncontent-length: 0\r\n\r\nhi";
    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::InvalidContentLength
    );

    let req = b"POST /e HTTP/1.1\r\nContent-Length: 0\r\nContent-Length: 2\r\n\r\nhi";
    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::InvalidContentLength
    );
}

#[test]
fn test_parse_repeated_equal_content_lengths() {
    let req = b"POST /e HTTP/1.1\r\nContent-Length: 2\r\ncontent-length: 2\r\n\r\nhi";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"hi".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_oversized_body_fails_before_it_is_read() {
    let req = format!(
        "POST /e HTTP/1.1\r\nContent-Length: {}\r\n\r\n{{",
        MAX_BODY_SIZE + 1
    );
    assert_eq!(
        parse_http_request(req.as_bytes()).unwrap_err(),
        ParseError::BodyTooLarge
    );

    let req = format!("POST /e HTTP/1.1\r\nContent-Length: {MAX_BODY_SIZE}\r\n\r\n");
    assert_eq!(
        parse_http_request(req.as_bytes()).unwrap_err(),
        ParseError::Incomplete
    );
}
