use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response. With `include_body` false (HEAD) the headers still
/// describe the body that would have been sent.
pub fn serialize_response(resp: &Response, include_body: bool) -> Bytes {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());

    buf.put_slice(
        format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            resp.status.as_u16(),
            resp.status.reason_phrase()
        )
        .as_bytes(),
    );

    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(b"\r\n");

    if include_body {
        buf.put_slice(&resp.body);
    }
    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
}

impl ResponseWriter {
    pub fn new(response: &Response, include_body: bool) -> Self {
        Self {
            buffer: serialize_response(response, include_body),
        }
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        stream.write_all(&self.buffer).await?;
        stream.flush().await?;
        Ok(())
    }
}
