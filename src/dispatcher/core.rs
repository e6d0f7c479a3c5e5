//! Dispatcher core module - hot path for request dispatch.
//!
//! Matching is a single forward walk over the tree: one sibling set per path
//! segment, first structural match wins, no backtracking. Nothing in the tree
//! is mutated, so any number of requests can dispatch concurrently against a
//! fully registered router.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

use crate::handlers::BoxedHandler;
use crate::router::{split_path, RouteNode};
use crate::server::{Request, ResponseWriter, RouteInfo};

/// Maximum number of pattern variables before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum number of path segments before heap allocation.
pub const MAX_INLINE_SEGMENTS: usize = 16;

/// Bound pattern variables, in path order.
///
/// Keys are the literal segment text including the leading colon (`:id`),
/// values are the path components they matched.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Terminal state of a dispatch.
pub enum Dispatch<'r> {
    /// A node matched every segment and has a handler for the method
    Matched {
        node: &'r RouteNode,
        handler: &'r BoxedHandler,
        params: ParamVec,
    },
    /// A node matched every segment but has no handler for the method
    MethodNotAllowed { node: &'r RouteNode },
    /// No node matched
    NotFound,
}

impl Dispatch<'_> {
    /// Status code the router itself writes for this outcome, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Dispatch::Matched { .. } => None,
            Dispatch::MethodNotAllowed { .. } => Some(405),
            Dispatch::NotFound => Some(404),
        }
    }
}

/// Walk the tree from `root` and decide the outcome for `method` on `path`.
///
/// For each segment the current sibling set is scanned in insertion order. A
/// pattern sibling (`:name`) matches any component and binds it; a literal
/// sibling matches only an identical component. The first sibling that matches
/// is taken. A path with no segments (`/`) addresses the root itself, which
/// only counts as a match when the root carries at least one handler.
#[must_use]
pub fn find<'r>(root: &'r RouteNode, method: &str, path: &str) -> Dispatch<'r> {
    let segments: SmallVec<[&str; MAX_INLINE_SEGMENTS]> = split_path(path).collect();

    if segments.is_empty() && !root.has_handlers() {
        return Dispatch::NotFound;
    }

    let mut params = ParamVec::new();
    let mut node = root;
    for component in segments {
        let Some(next) = node
            .children()
            .iter()
            .find(|c| c.is_pattern() || c.segment() == component)
        else {
            return Dispatch::NotFound;
        };
        if next.is_pattern() {
            params.push((Arc::clone(next.segment_arc()), component.to_owned()));
        }
        node = next;
    }

    match node.handler(method) {
        Some(handler) => Dispatch::Matched {
            node,
            handler,
            params,
        },
        None => Dispatch::MethodNotAllowed { node },
    }
}

/// Compose the query string handed to a matched handler.
///
/// Bound variables are URL-encoded in path order and placed before the query
/// the client sent, which is kept verbatim. Keys are not deduplicated.
#[must_use]
pub fn compose_query(params: &ParamVec, existing: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    let mut query = serializer.finish();
    if !existing.is_empty() {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(existing);
    }
    query
}

/// Dispatch a request against the tree rooted at `root`.
///
/// A match invokes the handler, which owns the whole response. A miss writes
/// `404` and a method miss writes `405`, both with no body and no extra headers.
pub fn dispatch(root: &RouteNode, w: &mut dyn ResponseWriter, req: &Request) {
    match find(root, req.method.as_str(), &req.path) {
        Dispatch::Matched {
            node,
            handler,
            params,
        } => {
            debug!(
                method = %req.method,
                path = %req.path,
                route = %node.full_path(),
                param_count = params.len(),
                "Route matched"
            );
            let route = RouteInfo {
                full_path: Arc::clone(node.full_path_arc()),
                methods: node.methods().map(str::to_owned).collect(),
            };
            let bound = req.bind(compose_query(&params, &req.query), route);
            handler.serve(w, &bound);
        }
        Dispatch::MethodNotAllowed { node } => {
            debug!(
                method = %req.method,
                path = %req.path,
                route = %node.full_path(),
                "Method not allowed"
            );
            w.write_status(405);
        }
        Dispatch::NotFound => {
            debug!(method = %req.method, path = %req.path, "No route matched");
            w.write_status(404);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::handler_fn;
    use crate::router::resolve;

    fn tree(paths: &[&str]) -> RouteNode {
        let mut root = RouteNode::root();
        for path in paths {
            resolve(path, &mut root).set_handler("GET", handler_fn(|_w, _req| {}));
        }
        root
    }

    #[test]
    fn test_find_literal() {
        let root = tree(&["/foo/bar"]);
        match find(&root, "GET", "/foo/bar") {
            Dispatch::Matched { node, params, .. } => {
                assert_eq!(node.full_path(), "/foo/bar");
                assert!(params.is_empty());
            }
            _ => panic!("expected match"),
        }
    }

    #[test]
    fn test_find_binds_patterns_in_path_order() {
        let root = tree(&["/users/:uid/posts/:pid"]);
        match find(&root, "GET", "/users/7/posts/abc") {
            Dispatch::Matched { params, .. } => {
                let pairs: Vec<(&str, &str)> =
                    params.iter().map(|(k, v)| (k.as_ref(), v.as_str())).collect();
                assert_eq!(pairs, vec![(":uid", "7"), (":pid", "abc")]);
            }
            _ => panic!("expected match"),
        }
    }

    #[test]
    fn test_intermediate_node_without_handler_is_405() {
        let root = tree(&["/a/b"]);
        assert_eq!(find(&root, "GET", "/a").status(), Some(405));
    }

    #[test]
    fn test_too_deep_is_404() {
        let root = tree(&["/a"]);
        assert_eq!(find(&root, "GET", "/a/b").status(), Some(404));
    }

    #[test]
    fn test_no_backtracking() {
        // `/x/:id` is scanned first and wins the first segment, so `/x/lit/deep`
        // never gets a chance even though a literal branch could match it.
        let mut root = RouteNode::root();
        resolve("/x/:id", &mut root).set_handler("GET", handler_fn(|_w, _req| {}));
        resolve("/x/lit/deep", &mut root).set_handler("GET", handler_fn(|_w, _req| {}));
        assert_eq!(find(&root, "GET", "/x/lit/deep").status(), Some(404));
    }

    #[test]
    fn test_root_without_handlers_is_404() {
        let root = tree(&["/foo"]);
        assert_eq!(find(&root, "GET", "/").status(), Some(404));
    }

    #[test]
    fn test_compose_query() {
        let mut params = ParamVec::new();
        params.push((Arc::from(":bar"), "a b".to_string()));
        assert_eq!(compose_query(&params, ""), "%3Abar=a+b");
        assert_eq!(compose_query(&params, "x=1"), "%3Abar=a+b&x=1");
        assert_eq!(compose_query(&ParamVec::new(), "x=1"), "x=1");
    }
}
