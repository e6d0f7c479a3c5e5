//! # Router Module
//!
//! The router module holds the route tree and the registration API.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Building the route tree from registered paths, reusing existing nodes
//! - Applying the default-handler policy (OPTIONS, TRACE) to each registered node
//! - Exposing a fluent [`RouteHandle`] to set per-method handlers
//! - Handing incoming requests to the [`dispatcher`](crate::dispatcher)
//!
//! ## Architecture
//!
//! Paths are split on `/` into segments and each segment becomes one
//! [`RouteNode`]. Children are kept in insertion order, and that order is the
//! match priority: the first sibling that fits a request segment wins, whether
//! it is a literal or a `:pattern`. There is no "most specific wins" ranking.
//!
//! ```text
//! /                      (root)
//! ├── users              GET
//! │   └── :id            GET, PUT, DELETE
//! │       └── posts      GET
//! └── health             GET, HEAD
//! ```
//!
//! ## Example
//!
//! ```rust
//! use brrtmux::Router;
//!
//! let mut mux = Router::new();
//! let mut users = mux.route("/users").get(|w, _req| w.write(b"[]"));
//! users
//!     .route("/:id")
//!     .get(|w, req| w.write(req.get_query_param(":id").unwrap_or_default().as_bytes()))
//!     .delete(|w, _req| w.write_status(204));
//!
//! assert_eq!(mux.routes().len(), 2);
//! ```

mod core;
mod handle;
mod node;

pub use core::{RouteSummary, Router};
pub use handle::RouteHandle;
pub use node::{resolve, split_path, RouteNode, PATTERN_PREFIX};
