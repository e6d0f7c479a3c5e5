use http::{HeaderMap, StatusCode};
use std::borrow::Cow;

/// Response-writing capability handed to handlers by the host server.
///
/// The first status written wins. Writing body bytes before any status
/// implies `200 OK`, and a response that never had a status written is a 200.
pub trait ResponseWriter {
    /// Headers that will be sent with the response
    fn headers_mut(&mut self) -> &mut HeaderMap;
    /// Set the status code; ignored once a status has been written
    fn write_status(&mut self, status: u16);
    /// Append bytes to the response body
    fn write(&mut self, body: &[u8]);
}

/// Canonical reason phrase for a status code, used when rendering status lines.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// In-memory [`ResponseWriter`] that records everything a handler writes.
#[derive(Debug, Clone, Default)]
pub struct RecordedResponse {
    status: Option<u16>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RecordedResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status code of the response (200 if none was written)
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

impl ResponseWriter for RecordedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: u16) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn write(&mut self, body: &[u8]) {
        if self.status.is_none() {
            self.status = Some(200);
        }
        self.body.extend_from_slice(body);
    }
}
