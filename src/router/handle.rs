use std::sync::Arc;

use http::Method;

use super::node::{resolve, RouteNode};
use crate::config::RouterConfig;
use crate::handlers::{apply_route_defaults, BoxedHandler};
use crate::server::{Request, ResponseWriter};

/// Fluent registration handle for one route node.
///
/// Every setter mutates the node in place and hands the same handle back, so
/// calls chain:
///
/// ```rust
/// use brrtmux::Router;
///
/// let mut mux = Router::new();
/// mux.route("/items/:id")
///     .get(|w, req| w.write(req.get_query_param(":id").unwrap_or_default().as_bytes()))
///     .delete(|w, _req| w.write_status(204));
/// ```
///
/// Setting a method that already has a handler replaces it.
pub struct RouteHandle<'a> {
    node: &'a mut RouteNode,
    config: &'a RouterConfig,
}

impl<'a> RouteHandle<'a> {
    /// Resolve `path` below `start` and apply the default-handler policy.
    pub(crate) fn resolve(start: &'a mut RouteNode, config: &'a RouterConfig, path: &str) -> Self {
        let node = resolve(path, start);
        apply_route_defaults(node, config);
        Self { node, config }
    }

    /// Register a sub-route relative to this node.
    ///
    /// ```rust
    /// use brrtmux::Router;
    ///
    /// let mut mux = Router::new();
    /// let mut foo = mux.route("/foo").get(|w, _req| w.write(b"foo"));
    /// foo.route("/bar").post(|w, _req| w.write(b"bar"));
    /// ```
    pub fn route(&mut self, path: &str) -> RouteHandle<'_> {
        RouteHandle::resolve(&mut *self.node, self.config, path)
    }

    /// Like [`route`](Self::route) but consumes this handle, so the sub-route
    /// handle can outlive the statement.
    #[must_use]
    pub fn into_route(self, path: &str) -> RouteHandle<'a> {
        RouteHandle::resolve(self.node, self.config, path)
    }

    /// The node this handle registers on
    #[must_use]
    pub fn node(&self) -> &RouteNode {
        &*self.node
    }

    /// Set a handler for an arbitrary method name, including non-standard verbs.
    pub fn add<F>(self, method: &str, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add_handler(method, Arc::new(f))
    }

    /// Set an already boxed handler for a method.
    pub fn add_handler(mut self, method: &str, handler: BoxedHandler) -> Self {
        self.node.set_handler(method, handler);
        self
    }

    /// Set the GET handler.
    ///
    /// With [`RouterConfig::add_head_on_get`] enabled this also (re)installs HEAD
    /// as [`RouterConfig::head_handler`] wrapped around the same handler.
    pub fn get<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        let handler: BoxedHandler = Arc::new(f);
        if self.config.add_head_on_get {
            let head = (self.config.head_handler)(Arc::clone(&handler));
            self.node.set_handler(Method::HEAD.as_str(), head);
        }
        self.add_handler(Method::GET.as_str(), handler)
    }

    pub fn head<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::HEAD.as_str(), f)
    }

    pub fn post<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::POST.as_str(), f)
    }

    pub fn put<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::PUT.as_str(), f)
    }

    pub fn patch<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::PATCH.as_str(), f)
    }

    pub fn delete<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::DELETE.as_str(), f)
    }

    /// Set the OPTIONS handler, replacing the default one if it was installed.
    pub fn options<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::OPTIONS.as_str(), f)
    }

    /// Set the TRACE handler. Works whether or not TRACE is enabled in the config.
    pub fn trace<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        self.add(Method::TRACE.as_str(), f)
    }
}
