use std::sync::Arc;

use crate::server::{Request, ResponseWriter};

/// A request handler registered on a route node for one HTTP method.
///
/// The handler owns the whole response: status, headers and body all go
/// through the [`ResponseWriter`] it is given.
pub trait Handler: Send + Sync {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request);
}

impl<F> Handler for F
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync,
{
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        self(w, req)
    }
}

/// Shared, type-erased handler as stored in the route tree.
pub type BoxedHandler = Arc<dyn Handler>;

/// Box a closure as a [`BoxedHandler`].
///
/// ```rust
/// use brrtmux::handlers::handler_fn;
///
/// let hello = handler_fn(|w, _req| w.write(b"hello"));
/// ```
pub fn handler_fn<F>(f: F) -> BoxedHandler
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
{
    Arc::new(f)
}
