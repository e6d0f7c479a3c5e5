use std::sync::Arc;

use http::header::{HeaderValue, ALLOW};
use http::HeaderMap;
use tracing::debug;

use super::core::{BoxedHandler, Handler};
use crate::config::RouterConfig;
use crate::router::RouteNode;
use crate::server::{Request, ResponseWriter};

/// Default OPTIONS handler: answers with an `Allow` header listing every method
/// registered on the matched node, including OPTIONS itself and any auto-added HEAD.
///
/// The method list comes from the [`RouteInfo`](crate::server::RouteInfo) the
/// dispatcher attaches to the request, so methods registered after this handler
/// was installed are listed too. Order follows the node's map iteration order
/// and is not stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowHandler;

impl Handler for AllowHandler {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        let Some(route) = req.route() else {
            return;
        };
        let allow = route.methods.join(", ");
        match HeaderValue::from_str(&allow) {
            Ok(value) => {
                w.headers_mut().append(ALLOW, value);
            }
            Err(_) => debug!(full_path = %route.full_path, allow = %allow, "Allow header not representable"),
        }
    }
}

/// Default TRACE handler: echoes the request line and headers back as the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceHandler;

impl Handler for TraceHandler {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        w.write(render_request(req).as_bytes());
    }
}

/// Render a request the way it came over the wire, without a body.
///
/// The request-target is the one the client sent, so pattern variables bound
/// during dispatch do not show up. `Host` is written first, the remaining
/// headers follow in received order.
#[must_use]
pub fn render_request(req: &Request) -> String {
    let mut out = format!("{} {} {:?}\r\n", req.method, req.target, req.version);
    if let Some(host) = req.get_header("host") {
        out.push_str("Host: ");
        out.push_str(host);
        out.push_str("\r\n");
    }
    for (name, value) in req
        .headers
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("host"))
    {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    out
}

/// Writer that forwards status and headers but drops body bytes.
pub struct HeadResponseWriter<'a> {
    inner: &'a mut dyn ResponseWriter,
}

impl<'a> HeadResponseWriter<'a> {
    pub fn new(inner: &'a mut dyn ResponseWriter) -> Self {
        Self { inner }
    }
}

impl ResponseWriter for HeadResponseWriter<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_status(&mut self, status: u16) {
        self.inner.write_status(status);
    }

    fn write(&mut self, _body: &[u8]) {
        // A body write still commits the implicit 200.
        self.inner.write_status(200);
    }
}

/// HEAD wrapper around a GET handler: runs the GET handler, keeps its status
/// and headers, discards its body.
pub struct HeadHandler {
    get: BoxedHandler,
}

impl HeadHandler {
    pub fn new(get: BoxedHandler) -> Self {
        Self { get }
    }
}

impl Handler for HeadHandler {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        let mut head = HeadResponseWriter::new(w);
        self.get.serve(&mut head, req);
    }
}

/// Factory installed as [`RouterConfig::options_handler`] by default.
pub fn default_options_handler(_node: &RouteNode) -> BoxedHandler {
    Arc::new(AllowHandler)
}

/// Factory installed as [`RouterConfig::trace_handler`] by default.
pub fn default_trace_handler(_node: &RouteNode) -> BoxedHandler {
    Arc::new(TraceHandler)
}

/// Wrapper installed as [`RouterConfig::head_handler`] by default.
pub fn default_head_handler(get: BoxedHandler) -> BoxedHandler {
    Arc::new(HeadHandler::new(get))
}

/// Decorate a freshly resolved node with the configured OPTIONS and TRACE handlers.
///
/// Only fills gaps: a method that already has a handler keeps it. Called every
/// time a path is registered, so it reads the configuration as it is at that moment.
pub fn apply_route_defaults(node: &mut RouteNode, config: &RouterConfig) {
    if config.options_enabled && node.handler("OPTIONS").is_none() {
        let handler = (config.options_handler)(&*node);
        node.set_handler("OPTIONS", handler);
        debug!(full_path = %node.full_path(), method = "OPTIONS", "Default handler installed");
    }

    if config.trace_enabled && node.handler("TRACE").is_none() {
        let handler = (config.trace_handler)(&*node);
        node.set_handler("TRACE", handler);
        debug!(full_path = %node.full_path(), method = "TRACE", "Default handler installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::RecordedResponse;
    use http::Method;

    #[test]
    fn test_render_request_host_first() {
        let req = Request::new(Method::TRACE, "/echo?x=1")
            .header("Accept", "*/*")
            .header("Host", "example.com");
        assert_eq!(
            render_request(&req),
            "TRACE /echo?x=1 HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n"
        );
    }

    #[test]
    fn test_head_writer_drops_body() {
        let get: BoxedHandler = Arc::new(|w: &mut dyn ResponseWriter, _req: &Request| {
            w.headers_mut()
                .insert("content-type", HeaderValue::from_static("text/plain"));
            w.write(b"body");
        });
        let head = default_head_handler(get);

        let mut res = RecordedResponse::new();
        head.serve(&mut res, &Request::new(Method::HEAD, "/"));
        assert_eq!(res.status(), 200);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn test_allow_without_route_info_is_silent() {
        let mut res = RecordedResponse::new();
        AllowHandler.serve(&mut res, &Request::new(Method::OPTIONS, "/"));
        assert!(res.header("allow").is_none());
    }
}
