//! Route tree: nodes and the tree builder.
//!
//! Each node represents one `/`-delimited path segment. Children are kept in
//! insertion order, which is also the order the dispatcher tries them in.
//! A segment starting with `:` is a pattern variable; the tree builder stores it
//! like any other literal and only the dispatcher gives the colon meaning.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::handlers::BoxedHandler;

/// Prefix marking a pattern-variable segment (e.g. `:id`)
pub const PATTERN_PREFIX: char = ':';

/// Split a path into segments.
///
/// One leading `/` is discarded and an empty remainder yields no segments, so
/// `/` and the empty string both address the root. Everything else is split
/// verbatim: `//` and trailing slashes produce empty-string segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    (!trimmed.is_empty())
        .then(|| trimmed.split('/'))
        .into_iter()
        .flatten()
}

/// A node in the route tree.
///
/// Owned exclusively by its parent; the root is owned by the [`Router`](super::Router).
pub struct RouteNode {
    /// Path segment this node represents (empty for the root)
    segment: Arc<str>,
    /// Full path from the root, kept for diagnostics only
    full_path: Arc<str>,
    /// Child nodes in insertion order
    children: Vec<RouteNode>,
    /// Handlers keyed by HTTP method name
    handlers: HashMap<String, BoxedHandler>,
}

impl RouteNode {
    /// Create a root node, representing path `/`
    #[must_use]
    pub fn root() -> Self {
        Self {
            segment: Arc::from(""),
            full_path: Arc::from("/"),
            children: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    fn child_of(parent_path: &str, segment: &str) -> Self {
        let full_path = if parent_path.ends_with('/') {
            format!("{parent_path}{segment}")
        } else {
            format!("{parent_path}/{segment}")
        };
        Self {
            segment: Arc::from(segment),
            full_path: Arc::from(full_path),
            children: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    #[inline]
    pub(crate) fn segment_arc(&self) -> &Arc<str> {
        &self.segment
    }

    #[inline]
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    #[inline]
    pub(crate) fn full_path_arc(&self) -> &Arc<str> {
        &self.full_path
    }

    /// Whether this segment is a pattern variable (`:name`)
    #[inline]
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        self.segment.starts_with(PATTERN_PREFIX)
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[RouteNode] {
        &self.children
    }

    /// Find the child for `segment`, creating and appending it if it does not exist.
    pub fn get_or_create_child(&mut self, segment: &str) -> &mut RouteNode {
        let index = match self.children.iter().position(|c| &*c.segment == segment) {
            Some(index) => index,
            None => {
                let child = RouteNode::child_of(&self.full_path, segment);
                debug!(full_path = %child.full_path, segment = %segment, "Route node created");
                self.children.push(child);
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Set the handler for `method`, replacing any existing one.
    pub fn set_handler(&mut self, method: &str, handler: BoxedHandler) {
        self.handlers.insert(method.to_string(), handler);
    }

    #[inline]
    #[must_use]
    pub fn handler(&self, method: &str) -> Option<&BoxedHandler> {
        self.handlers.get(method)
    }

    #[inline]
    #[must_use]
    pub fn has_handlers(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Registered method names, in map iteration order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of nodes in this subtree, including this one
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(RouteNode::node_count)
            .sum::<usize>()
    }
}

impl Default for RouteNode {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods().collect();
        methods.sort_unstable();
        f.debug_struct("RouteNode")
            .field("segment", &self.segment)
            .field("full_path", &self.full_path)
            .field("methods", &methods)
            .field("children", &self.children)
            .finish()
    }
}

/// Resolve `path` below `start`, creating any missing nodes, and return the last one.
///
/// Resolving the same path twice from the same node returns the same node and
/// adds nothing to the tree. Existing siblings never change order.
pub fn resolve<'a>(path: &str, start: &'a mut RouteNode) -> &'a mut RouteNode {
    let mut node = start;
    for segment in split_path(path) {
        node = node.get_or_create_child(segment);
    }
    node
}
