//! HTTP transport types and the pluggable `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data, as in the build/parse split of
//! `Client`. The only piece that is not plain data is the response body: it
//! is a reader that must be explicitly released with `ResponseBody::close`,
//! because releasing can fail and the client has to rank that failure
//! against the read and decode outcomes.

use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

/// Boxed error produced by a `Transport`. Kept opaque so mock and real
/// transports can surface whatever failure they have.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A JSON POST described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Streaming response body that must be released once read.
pub trait ResponseBody: Read {
    /// Release the underlying stream.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// An HTTP response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn ResponseBody>,
}

impl HttpResponse {
    /// Wrap an in-memory body. Useful for hosts that perform the round trip
    /// themselves and already hold the full payload.
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Box::new(BufferedBody(io::Cursor::new(body.into()))),
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

struct BufferedBody(io::Cursor<Vec<u8>>);

impl Read for BufferedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl ResponseBody for BufferedBody {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

/// Executes exactly one HTTP request per call. Implementations must not
/// retry.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// Status codes are returned as data rather than errors; the API reports
/// its own outcome inside the response envelope.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Bound the whole round trip, connect through body read.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send(&request.body[..])?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let reader = response.into_body().into_reader();

        Ok(HttpResponse {
            status,
            headers,
            body: Box::new(UreqBody(reader)),
        })
    }
}

struct UreqBody(ureq::BodyReader<'static>);

impl Read for UreqBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl ResponseBody for UreqBody {
    fn close(self: Box<Self>) -> io::Result<()> {
        // ureq hands the connection back to the pool on drop.
        drop(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_body_reads_back_and_closes() {
        let mut response = HttpResponse::from_bytes(201, "payload");
        let mut read = String::new();
        response.body.read_to_string(&mut read).unwrap();
        assert_eq!(read, "payload");
        assert_eq!(response.status, 201);
        assert!(response.body.close().is_ok());
    }

    #[test]
    fn response_debug_skips_body() {
        let response = HttpResponse::from_bytes(200, "secret-ish body");
        let rendered = format!("{response:?}");
        assert!(rendered.contains("200"));
        assert!(!rendered.contains("secret-ish"));
    }

    #[test]
    fn ureq_transport_is_shareable() {
        fn assert_transport<T: Transport + Clone>() {}
        assert_transport::<UreqTransport>();
        let _ = UreqTransport::with_timeout(Duration::from_secs(5));
    }
}
