use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::http::handler::handle_request;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::negotiator::ContentNegotiator;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    state: ConnectionState,
    negotiator: Arc<ContentNegotiator>,
    callback_param: Arc<str>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, negotiator: Arc<ContentNegotiator>, callback_param: Arc<str>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            negotiator,
            callback_param,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(Some(req)) => ConnectionState::Processing(req),
                        Ok(None) => ConnectionState::Closed,
                        Err(e) => {
                            // Malformed request: answer once, then close.
                            let response = Response::error(StatusCode::BadRequest, &e);
                            ResponseWriter::new(&response, true)
                                .write_to_stream(&mut self.stream)
                                .await?;
                            return Err(e.into());
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = handle_request(&self.negotiator, req, &self.callback_param);
                    let include_body = req.method != Method::HEAD;
                    let writer = ResponseWriter::new(&response, include_body);
                    self.state = ConnectionState::Writing(writer, req.keep_alive());
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    self.state = if *keep_alive {
                        ConnectionState::Reading
                    } else {
                        ConnectionState::Closed
                    };
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until a full request is buffered. `Ok(None)` when the client closed.
    pub async fn read_request(&mut self) -> Result<Option<Request>, ParseError> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }
                Err(ParseError::Incomplete) => {}
                Err(e) => return Err(e),
            }

            match self.stream.read_buf(&mut self.buffer).await {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "Read failed, closing connection");
                    return Ok(None);
                }
            }
        }
    }
}
