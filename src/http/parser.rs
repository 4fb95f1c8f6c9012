use std::collections::HashMap;

use thiserror::Error;

use crate::http::request::{Method, Request};

/// Upper bound on the request head, checked while it is still incomplete.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Largest body a request may declare through Content-Length.
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid request line")]
    InvalidRequest,
    #[error("unknown method")]
    InvalidMethod,
    #[error("malformed header line")]
    InvalidHeader,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    #[error("request head is too large")]
    HeadTooLarge,
    #[error("request body is too large")]
    BodyTooLarge,
    /// More bytes are needed before the request can be parsed.
    #[error("incomplete request")]
    Incomplete,
}

/// Parses one request from the front of `buf`, returning it with the number of
/// bytes it occupied.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let Some(head_end) = find_head_end(buf) else {
        if buf.len() > MAX_HEAD_SIZE {
            return Err(ParseError::HeadTooLarge);
        }
        return Err(ParseError::Incomplete);
    };

    let head = std::str::from_utf8(&buf[..head_end]).map_err(|_| ParseError::InvalidRequest)?;
    let mut lines = head.split("\r\n");

    let mut parts = lines.next().ok_or(ParseError::InvalidRequest)?.split_whitespace();
    let method = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;
    let method = Method::from_str(method).ok_or(ParseError::InvalidMethod)?;

    let mut headers = HashMap::new();
    let mut content_length: Option<usize> = None;
    for line in lines.filter(|line| !line.is_empty()) {
        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let (key, value) = (key.trim(), value.trim());
        if key.eq_ignore_ascii_case("Content-Length") {
            let length = value.parse::<usize>().map_err(|_| ParseError::InvalidContentLength)?;
            // Repeated headers must agree, whatever their case.
            if content_length.is_some_and(|seen| seen != length) {
                return Err(ParseError::InvalidContentLength);
            }
            content_length = Some(length);
        }
        headers.insert(key.to_string(), value.to_string());
    }

    let content_length = content_length.unwrap_or(0);
    if content_length > MAX_BODY_SIZE {
        return Err(ParseError::BodyTooLarge);
    }

    let body_start = head_end + 4;
    let body_end = body_start
        .checked_add(content_length)
        .ok_or(ParseError::InvalidContentLength)?;
    if buf.len() < body_end {
        return Err(ParseError::Incomplete);
    }

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: buf[body_start..body_end].to_vec(),
    };
    Ok((request, body_end))
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_negotiation_headers() {
        let req = b"GET /items.yaml HTTP/1.1\r\naccept: application/json;q=0.5\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.accept(), "application/json;q=0.5");
        assert_eq!(parsed.extension(), "yaml");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn oversized_head_is_rejected() {
        let req = vec![b'a'; MAX_HEAD_SIZE + 1];
        assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::HeadTooLarge);
    }
}
