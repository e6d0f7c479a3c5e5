use tracing::info;

use super::handle::RouteHandle;
use super::node::RouteNode;
use crate::config::RouterConfig;
use crate::dispatcher::dispatch;
use crate::handlers::Handler;
use crate::server::{Request, ResponseWriter};

/// One registered route as reported by [`Router::routes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// Full path of the node (e.g. `/users/:id`)
    pub path: String,
    /// Registered methods, sorted
    pub methods: Vec<String>,
}

/// Router facade: owns the route tree and its configuration.
///
/// Registration goes through [`route`](Self::route) and needs `&mut self`;
/// dispatch goes through [`serve`](Self::serve) and only needs `&self`. Register
/// every route first, then share the router (e.g. behind an `Arc`) with the
/// host server's request tasks.
///
/// # Example
///
/// ```rust
/// use brrtmux::{Router, server::{RecordedResponse, Request}};
/// use http::Method;
///
/// let mut mux = Router::new();
/// mux.route("/").get(|w, _req| w.write(b"Hello World"));
///
/// let mut res = RecordedResponse::new();
/// mux.serve(&mut res, &Request::new(Method::GET, "/"));
/// assert_eq!(res.status(), 200);
/// assert_eq!(res.body_str(), "Hello World");
/// ```
#[derive(Debug)]
pub struct Router {
    /// Root of the route tree, representing `/`
    root: RouteNode,
    /// Configuration read at registration time
    config: RouterConfig,
}

impl Router {
    /// Create a router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            root: RouteNode::root(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    ///
    /// Changes only affect routes registered afterwards: defaults are applied
    /// when a path is registered, not when a request is dispatched.
    pub fn config_mut(&mut self) -> &mut RouterConfig {
        &mut self.config
    }

    #[must_use]
    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// Resolve or create the node for `path` and return a handle to register
    /// handlers on it.
    pub fn route(&mut self, path: &str) -> RouteHandle<'_> {
        RouteHandle::resolve(&mut self.root, &self.config, path)
    }

    /// Dispatch one request. All outcomes are written to `w`.
    pub fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        dispatch(&self.root, w, req);
    }

    /// All nodes carrying at least one handler, depth first in insertion order.
    #[must_use]
    pub fn routes(&self) -> Vec<RouteSummary> {
        fn collect(node: &RouteNode, out: &mut Vec<RouteSummary>) {
            if node.has_handlers() {
                let mut methods: Vec<String> = node.methods().map(str::to_owned).collect();
                methods.sort_unstable();
                out.push(RouteSummary {
                    path: node.full_path().to_owned(),
                    methods,
                });
            }
            for child in node.children() {
                collect(child, out);
            }
        }

        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// Log the routing table.
    pub fn dump_routes(&self) {
        let routes = self.routes();
        info!(
            routes_count = routes.len(),
            node_count = self.root.node_count(),
            "Routing table"
        );
        for route in &routes {
            info!(path = %route.path, methods = %route.methods.join(", "), "Route");
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// A router is itself a handler, so it can be wrapped by global middleware.
impl Handler for Router {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        dispatch(&self.root, w, req);
    }
}
