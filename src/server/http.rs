// file: src/server/http.rs
// description: minimal HTTP/1.1 request reading and response formatting
// reference: https://docs.rs/tokio (AsyncReadExt)

use crate::error::{AppError, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

const MAX_HEAD_BYTES: usize = 16 * 1024;
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A parsed request: just enough surface for a single JSON endpoint.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// Read one request from the stream: head up to the blank line, then exactly
/// `Content-Length` body bytes. Requests without a Content-Length header are
/// treated as bodyless.
pub async fn read_request<R>(stream: &mut R) -> Result<HttpRequest>
where
    R: AsyncRead + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(AppError::BadRequest("request head too large".to_string()));
        }

        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(AppError::BadRequest(
                "connection closed before request head".to_string(),
            ));
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.lines();

    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let (method, raw_path) = match (parts.next(), parts.next()) {
        (Some(method), Some(path)) => (method.to_string(), path),
        _ => {
            return Err(AppError::BadRequest(format!(
                "malformed request line: {request_line}"
            )));
        }
    };

    // Routing ignores query string and fragment
    let path = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or(raw_path)
        .to_string();

    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().map_err(|_| {
                AppError::BadRequest(format!("invalid content-length: {}", value.trim()))
            })?;
        }
    }
    if content_length > MAX_BODY_BYTES {
        return Err(AppError::BadRequest("request body too large".to_string()));
    }

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(AppError::BadRequest(
                "connection closed before full body".to_string(),
            ));
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(HttpRequest { method, path, body })
}

/// Build an HTTP response with the given status code, content type, and body.
pub fn build_response(status: u16, content_type: &str, body: Vec<u8>) -> Vec<u8> {
    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    };

    let headers = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Cache-Control: no-cache\r\n\
         Connection: close\r\n\
         \r\n",
        status,
        status_text,
        content_type,
        body.len()
    );

    let mut response = headers.into_bytes();
    response.extend(body);
    response
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    async fn parse(raw: &[u8]) -> Result<HttpRequest> {
        let (mut client, mut server) = tokio::io::duplex(8192);
        client.write_all(raw).await.unwrap();
        client.shutdown().await.unwrap();
        read_request(&mut server).await
    }

    #[tokio::test]
    async fn test_parses_post_with_body() {
        let raw = b"POST /api/deep-search HTTP/1.1\r\n\
                    Host: localhost\r\n\
                    Content-Length: 18\r\n\
                    \r\n\
                    {\"query\":\"sphere\"}";

        let request = parse(raw).await.unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/deep-search");
        assert_eq!(request.body, b"{\"query\":\"sphere\"}");
    }

    #[tokio::test]
    async fn test_missing_content_length_means_empty_body() {
        let request = parse(b"GET /api/deep-search HTTP/1.1\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(request.method, "GET");
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_query_string_is_stripped_from_path() {
        let request = parse(b"GET /api/deep-search?q=1 HTTP/1.1\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(request.path, "/api/deep-search");
    }

    #[tokio::test]
    async fn test_malformed_request_line() {
        let err = parse(b"GARBAGE\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_truncated_body_is_rejected() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 50\r\n\r\nshort";
        let err = parse(raw).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_build_response_headers() {
        let response = build_response(200, "application/json", b"[]".to_vec());
        let text = String::from_utf8(response).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Content-Length: 2\r\n"));
        assert!(text.ends_with("\r\n\r\n[]"));
    }
}
