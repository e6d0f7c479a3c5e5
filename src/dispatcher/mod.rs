//! # Dispatcher Module
//!
//! Maps an incoming `(method, path)` pair onto the route tree and invokes the
//! matched handler, or answers `404 Not Found` / `405 Method Not Allowed`.
//!
//! ## Request Flow
//!
//! 1. The path is split into segments the same way registration splits it
//! 2. Each segment is matched against the current sibling set, in insertion order
//! 3. Pattern segments (`:name`) bind the component they matched
//! 4. On the last segment the node's handler for the request method is looked up
//! 5. Bound variables are prepended to the query string and the handler runs
//!
//! ## Pattern Variables
//!
//! Handlers read bound variables as query parameters keyed by the segment text,
//! colon included:
//!
//! ```rust
//! use brrtmux::{Router, server::{RecordedResponse, Request}};
//! use http::Method;
//!
//! let mut mux = Router::new();
//! mux.route("/foo/:bar").get(|w, req| {
//!     w.write(req.get_query_param(":bar").unwrap_or_default().as_bytes())
//! });
//!
//! let mut res = RecordedResponse::new();
//! mux.serve(&mut res, &Request::new(Method::GET, "/foo/42"));
//! assert_eq!(res.body_str(), "42");
//! ```

mod core;

pub use core::{
    compose_query, dispatch, find, Dispatch, ParamVec, MAX_INLINE_PARAMS, MAX_INLINE_SEGMENTS,
};
