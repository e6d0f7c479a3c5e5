//! # Server Interface Module
//!
//! The router does not accept connections or parse HTTP framing. The host server
//! hands it an already-parsed [`Request`] and a [`ResponseWriter`] to write into;
//! this module defines both sides of that boundary.
//!
//! [`RecordedResponse`] is an in-memory writer, handy for tests and for hosts that
//! buffer the whole response before putting it on the wire.

pub mod request;
pub mod response;

pub use request::{HeaderVec, Request, RouteInfo, MAX_INLINE_HEADERS};
pub use response::{status_reason, RecordedResponse, ResponseWriter};
