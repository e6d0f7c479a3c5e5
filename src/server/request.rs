use http::{Method, Version};
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
/// Most requests have ≤16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage, kept in the order the host server received them.
///
/// Header names use `Arc<str>` because the same names (Host, Accept, ...) repeat
/// across every request and cloning a request for dispatch should stay cheap.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Information about the route a request was matched to.
///
/// Attached by the dispatcher to the request it hands to the matched handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Full registered path of the matched node (e.g. `/users/:id`)
    pub full_path: Arc<str>,
    /// Method names registered on the matched node at dispatch time
    pub methods: Vec<String>,
}

/// Immutable incoming-request descriptor delivered by the host server.
///
/// The router never parses HTTP framing itself: the host fills in method,
/// request-target, version and headers, and the router only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method; extension methods are allowed
    pub method: Method,
    /// Request-target exactly as received (path plus optional `?query`)
    pub target: String,
    /// Path component of the target
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: String,
    /// Protocol version from the request line
    pub version: Version,
    /// Headers in received order
    pub headers: HeaderVec,
    route: Option<RouteInfo>,
}

impl Request {
    /// Build a request from a method and a request-target such as `/items/7?verbose=1`.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        let target = target.into();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (target.clone(), String::new()),
        };

        Self {
            method,
            target,
            path,
            query,
            version: Version::HTTP_11,
            headers: HeaderVec::new(),
            route: None,
        }
    }

    /// Append a header, keeping any existing header with the same name.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query parameters in the order they appear in the query string.
    ///
    /// Pattern variables bound during dispatch come first, followed by the
    /// parameters the client sent.
    #[must_use]
    pub fn query_params(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Get a query parameter by name.
    ///
    /// Uses "first occurrence wins" semantics, so a bound pattern variable such as
    /// `:id` shadows a client-supplied `:id` query value.
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// The route this request was matched to, if it came through the dispatcher.
    #[inline]
    #[must_use]
    pub fn route(&self) -> Option<&RouteInfo> {
        self.route.as_ref()
    }

    pub(crate) fn bind(&self, query: String, route: RouteInfo) -> Self {
        Self {
            query,
            route: Some(route),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_split() {
        let req = Request::new(Method::GET, "/p?x=1&y=2");
        assert_eq!(req.path, "/p");
        assert_eq!(req.query, "x=1&y=2");
        assert_eq!(req.target, "/p?x=1&y=2");

        let req = Request::new(Method::GET, "/plain");
        assert_eq!(req.path, "/plain");
        assert!(req.query.is_empty());
    }

    #[test]
    fn test_query_params() {
        let req = Request::new(Method::GET, "/p?x=1&y=a%20b&x=2");
        assert_eq!(req.get_query_param("x"), Some("1".to_string()));
        assert_eq!(req.get_query_param("y"), Some("a b".to_string()));
        assert_eq!(req.get_query_param("z"), None);
        assert_eq!(req.query_params().len(), 3);
    }

    #[test]
    fn test_get_header_case_insensitive() {
        let req = Request::new(Method::GET, "/").header("Content-Type", "text/plain");
        assert_eq!(req.get_header("content-type"), Some("text/plain"));
        assert_eq!(req.get_header("accept"), None);
    }
}
