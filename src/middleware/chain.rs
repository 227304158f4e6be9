//! Ordered middleware composition.
//!
//! A [`Chain`] is an immutable, ordered list of [`Middleware`] plus one
//! operation: fold them around a terminal handler to get a single
//! [`BoxedHandler`]. Declared order is observable order — the first
//! middleware appended runs outermost at request time.

use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler, IntoHandler};
use crate::router::Router;

/// A transformer from one handler to another.
///
/// This is where cross-cutting behavior plugs in: wrap the next handler,
/// return a new one that does its work before, after, or *instead of*
/// delegating. Not delegating at all — short-circuiting — is a supported
/// move; access-control and caching middleware depend on it.
///
/// Any `Fn(BoxedHandler) -> BoxedHandler` closure is a `Middleware`, so the
/// trait only needs implementing by hand when the middleware carries
/// configuration worth naming:
///
/// ```rust
/// use weave::middleware::Middleware;
/// use weave::{ErasedHandler, BoxedHandler, Request, Response, StatusCode};
/// use std::sync::Arc;
///
/// struct RequireKey { key: &'static str }
///
/// impl Middleware for RequireKey {
///     fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
///         let key = self.key;
///         (move |req: Request| {
///             let next = Arc::clone(&next);
///             async move {
///                 if req.header("x-api-key") == Some(key) {
///                     next.call(req).await
///                 } else {
///                     Response::status(StatusCode::UNAUTHORIZED)
///                 }
///             }
///         })
///         .into_boxed_handler()
///     }
/// }
/// # use weave::Handler;
/// ```
///
/// Wrapping must be repeatable: calling `wrap` twice with the same `next` is
/// fine, and `wrap` itself performs no request-level side effects. Whatever
/// the returned handler does per request is its own business — including
/// holding state it closed over.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

/// Plain wrapping closures are middleware.
impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (self)(next)
    }
}

/// An immutable, ordered middleware stack.
///
/// Build it once, compose it as many times as you like — each
/// [`then`](Chain::then) call is independent and the chain is never
/// mutated, so one chain can produce pipelines for several terminals and be
/// shared across threads freely.
///
/// ```rust
/// use weave::middleware::{trace, Chain};
/// use weave::{IntoHandler, Router};
///
/// let app = Router::new();
/// let handler = Chain::new()
///     .append(trace())
///     .then(Some(app.into_handler()));
/// ```
#[derive(Clone, Default)]
pub struct Chain {
    stack: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    /// An empty chain. Composes to the identity: `then` hands back the
    /// terminal handler untouched.
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Returns a new chain holding this chain's middleware followed by `mw`.
    /// `self` is untouched — chains have value semantics.
    pub fn append(&self, mw: impl Middleware) -> Self {
        let mut stack = self.stack.clone();
        stack.push(Arc::new(mw));
        Self { stack }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Composes the stack around `terminal` and returns the pipeline as one
    /// handler.
    ///
    /// The fold runs in *reverse* declared order — for a chain `[m1, m2, m3]`
    /// and terminal `t` it builds `m1.wrap(m2.wrap(m3.wrap(t)))` — precisely
    /// so that at request time `m1` runs first. Folding forward is the
    /// classic bug here: it silently inverts execution order.
    ///
    /// `None` substitutes the default multiplexer: an empty [`Router`],
    /// which answers every request `404 Not Found`. Pass your populated
    /// router explicitly (`Some(router.into_handler())`) to route through
    /// it. Composition itself never fails and has no side effects; anything
    /// observable happens later, per request.
    pub fn then(&self, terminal: Option<BoxedHandler>) -> BoxedHandler {
        let terminal = terminal.unwrap_or_else(|| Router::new().into_handler());
        self.stack
            .iter()
            .rev()
            .fold(terminal, |next, mw| mw.wrap(next))
    }

    /// Like [`then`](Chain::then), but takes a plain `async fn` terminal and
    /// adapts it to a handler before composing:
    ///
    /// ```rust
    /// use weave::middleware::Chain;
    /// use weave::{Request, Response};
    ///
    /// async fn app(_req: Request) -> Response {
    ///     Response::text("app\n")
    /// }
    ///
    /// let handler = Chain::new().then_fn(app);
    /// ```
    pub fn then_fn(&self, terminal: impl Handler) -> BoxedHandler {
        self.then(Some(terminal.into_boxed_handler()))
    }
}

/// Builds a chain from an explicit list, storing the `Arc`s verbatim —
/// order preserved, duplicates and no-ops included, nothing validated.
impl FromIterator<Arc<dyn Middleware>> for Chain {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Middleware>>>(iter: I) -> Self {
        Self { stack: iter.into_iter().collect() }
    }
}
