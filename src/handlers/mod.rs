//! # Handlers Module
//!
//! The [`Handler`] trait every route handler implements, plus the handlers the
//! router installs on its own: the `Allow`-listing OPTIONS handler, the
//! request-echoing TRACE handler and the body-discarding HEAD wrapper.
//!
//! Closures with the signature `Fn(&mut dyn ResponseWriter, &Request)` are
//! handlers already. Middleware is plain handler wrapping:
//!
//! ```rust
//! use brrtmux::handlers::{handler_fn, BoxedHandler, Handler};
//! use brrtmux::server::{Request, ResponseWriter};
//! use http::header::HeaderValue;
//!
//! fn powered_by(next: BoxedHandler) -> impl Fn(&mut dyn ResponseWriter, &Request) + Send + Sync {
//!     move |w, req| {
//!         w.headers_mut().insert("x-powered-by", HeaderValue::from_static("brrtmux"));
//!         next.serve(w, req);
//!     }
//! }
//!
//! let wrapped = handler_fn(powered_by(handler_fn(|w, _req| w.write(b"hi"))));
//! ```

mod core;
mod defaults;

pub use core::{handler_fn, BoxedHandler, Handler};
pub use defaults::{
    apply_route_defaults, default_head_handler, default_options_handler, default_trace_handler,
    render_request, AllowHandler, HeadHandler, HeadResponseWriter, TraceHandler,
};
