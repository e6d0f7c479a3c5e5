//! # brrtmux
//!
//! **brrtmux** is a small HTTP request router. Register URL path patterns with
//! per-method handlers; hand each incoming request to the router and it calls
//! exactly one handler, or answers `404 Not Found` / `405 Method Not Allowed`.
//!
//! It does not accept connections or parse HTTP: the host server delivers a
//! parsed [`Request`](server::Request) and a [`ResponseWriter`](server::ResponseWriter).
//!
//! ## Features
//!
//! - Method based routing, `405` when a path exists but the verb does not
//! - `/foo/:bar` pattern segments, bound values exposed as query parameters (`:bar`)
//! - Fluent registration for all standard verbs plus arbitrary ones via `add`
//! - Sub-routing relative to any registered node
//! - Automatic OPTIONS (`Allow` header), HEAD from GET, and opt-in TRACE
//!
//! ## Architecture
//!
//! - **[`router`]** - Route tree, tree builder and the [`Router`] facade
//! - **[`dispatcher`]** - Request matching and handler invocation
//! - **[`handlers`]** - The [`Handler`](handlers::Handler) trait and the default OPTIONS/TRACE/HEAD handlers
//! - **[`config`]** - [`RouterConfig`](config::RouterConfig): default-handler policy, from env or TOML
//! - **[`server`]** - Request descriptor and response-writing capability at the host boundary
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host server
//!     participant Router as Router
//!     participant Dispatcher as Dispatcher
//!     participant Node as RouteNode
//!     participant Handler as Handler
//!
//!     Host->>Router: serve(w, GET /foo/42)
//!     Router->>Dispatcher: dispatch(root, w, req)
//!     Dispatcher->>Node: match "foo", then ":bar"
//!     alt no sibling matches
//!         Dispatcher-->>Host: 404
//!     else node has no GET handler
//!         Dispatcher-->>Host: 405
//!     else
//!         Dispatcher->>Handler: serve(w, req with ?%3Abar=42)
//!         Handler-->>Host: status, headers, body
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtmux::{Router, server::{RecordedResponse, Request}};
//! use http::Method;
//!
//! let mut mux = Router::new();
//! mux.route("/").get(|w, _req| w.write(b"Hello World"));
//! mux.route("/foo/:bar").get(|w, req| {
//!     w.write(req.get_query_param(":bar").unwrap_or_default().as_bytes())
//! });
//!
//! let mut res = RecordedResponse::new();
//! mux.serve(&mut res, &Request::new(Method::GET, "/foo/baz"));
//! assert_eq!(res.body_str(), "baz");
//!
//! let mut res = RecordedResponse::new();
//! mux.serve(&mut res, &Request::new(Method::POST, "/foo/baz"));
//! assert_eq!(res.status(), 405);
//! ```
//!
//! ## Concurrency
//!
//! Registration needs `&mut Router`, dispatch only `&Router`. Build the whole
//! tree first, then share the router across request tasks; the borrow checker
//! keeps registration and dispatch from interleaving.

pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod server;

pub use config::{ConfigError, RouterConfig};
pub use handlers::{handler_fn, BoxedHandler, Handler};
pub use router::{RouteHandle, RouteNode, Router};
pub use server::{RecordedResponse, Request, ResponseWriter};
