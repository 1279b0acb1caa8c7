use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::app::exception;
use crate::app::{AccountService, ResourceResolver, Router};
use crate::http::error::HttpError;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 4096;

/// One connection's unit of work: read a request, dispatch it, write the
/// response, close.
pub struct Connection<S, A, R> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router<A, R>>,
    read_timeout: Option<Duration>,
}

pub enum ConnectionState {
    Reading,
    Processing(Result<Request, HttpError>),
    Writing(ResponseWriter),
    Closed,
}

impl<S, A, R> Connection<S, A, R>
where
    S: AsyncRead + AsyncWrite + Unpin,
    A: AccountService,
    R: ResourceResolver,
{
    pub fn new(stream: S, router: Arc<Router<A, R>>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            router,
            read_timeout: None,
        }
    }

    /// Closes the connection without a response if no complete request
    /// arrives within `timeout`. Without one, reads block indefinitely.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_with_timeout().await? {
                    Some(parsed) => ConnectionState::Processing(parsed),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing(parsed) => {
                    let response = self.respond(parsed).await;
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    self.stream.shutdown().await.ok();
                    break;
                }
            };
        }

        Ok(())
    }

    /// Dispatches a parsed request, translating any failure into a redirect.
    async fn respond(&self, parsed: Result<Request, HttpError>) -> Response {
        let request = match parsed {
            Ok(request) => request,
            Err(e) => return exception::translate(&e),
        };

        match self.router.dispatch(&request).await {
            Ok(response) => {
                tracing::info!(
                    method = ?request.method(),
                    path = %request.path(),
                    status = response.status.as_u16(),
                    "Request handled"
                );
                response
            }
            Err(e) => {
                tracing::debug!(method = ?request.method(), path = %request.path(), "Dispatch failed");
                exception::translate(&e)
            }
        }
    }

    async fn read_with_timeout(&mut self) -> anyhow::Result<Option<Result<Request, HttpError>>> {
        match self.read_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.read_request()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(timeout = ?limit, "Read timed out, closing connection");
                    Ok(None)
                }
            },
            None => self.read_request().await,
        }
    }

    /// Reads until one request can be parsed.
    ///
    /// `Ok(None)` means the client closed the connection first. A malformed
    /// request is returned as `Some(Err(..))` so it still gets a response.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, HttpError>>> {
        loop {
            // Try parsing whatever we already have
            if !self.buffer.is_empty() {
                match parse_http_request(&self.buffer) {
                    Ok((request, consumed)) => {
                        self.buffer.advance(consumed);
                        return Ok(Some(Ok(request)));
                    }

                    Err(ParseError::Incomplete) => {}

                    Err(e) => return Ok(Some(Err(e.into()))),
                }
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if !self.buffer.is_empty() {
                    tracing::debug!(
                        buffered = self.buffer.len(),
                        "Client closed connection mid-request"
                    );
                }
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{InMemoryAccounts, StaticFiles};
    use crate::session::SessionStore;

    #[tokio::test]
    async fn read_request_keeps_bytes_after_the_request() {
        let (mut client, server) = tokio::io::duplex(1024);
        client
            .write_all(b"GET / HTTP/1.1\r\n\r\nGET /next HTTP/1.1\r\n\r\n")
            .await
            .unwrap();

        let router = Router::new(
            InMemoryAccounts::new(),
            StaticFiles::new("static"),
            SessionStore::new(),
        );
        let mut conn = Connection::new(server, Arc::new(router));

        let first = conn.read_request().await.unwrap().unwrap().unwrap();
        assert_eq!(first.path(), "/");
        assert_eq!(&conn.buffer[..], b"GET /next HTTP/1.1\r\n\r\n");

        let second = conn.read_request().await.unwrap().unwrap().unwrap();
        assert_eq!(second.path(), "/next");
        assert!(conn.buffer.is_empty());
    }
}
