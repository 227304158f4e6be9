//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: structured tracing, request-id injection, and
//! authentication-header inspection.
//!
//! Three ways to write one, from least to most ceremony:
//!
//! 1. [`from_fn`] — an `async fn (Request, next) -> Response`. Covers almost
//!    everything.
//! 2. A plain closure `Fn(BoxedHandler) -> BoxedHandler`, when you need to do
//!    work at wrap time rather than request time.
//! 3. Implementing [`Middleware`] by hand, when the middleware carries
//!    configuration worth a named type.
//!
//! Order them with a [`Chain`]:
//!
//! ```rust
//! use weave::middleware::{from_fn, trace, Chain};
//! use weave::{BoxedHandler, ErasedHandler, IntoHandler, Request, Router};
//!
//! let auth = from_fn(|req: Request, next: BoxedHandler| async move {
//!     // inspect req, then delegate — or answer early and never delegate
//!     next.call(req).await
//! });
//!
//! let app = Router::new();
//! let handler = Chain::new()
//!     .append(trace())   // outermost: first in, last out
//!     .append(auth)
//!     .then(Some(app.into_handler()));
//! ```

mod chain;
mod trace;

pub use chain::{Chain, Middleware};
pub use trace::trace;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// Lifts an async request/next function into a [`Middleware`].
///
/// The function runs once per request, receives the request and the next
/// handler in line, and decides whether to delegate:
///
/// ```rust
/// use weave::middleware::from_fn;
/// use weave::{BoxedHandler, ErasedHandler, Request, Response, StatusCode};
///
/// let gate = from_fn(|req: Request, next: BoxedHandler| async move {
///     if req.header("x-api-key").is_none() {
///         return Response::status(StatusCode::UNAUTHORIZED);
///     }
///     next.call(req).await
/// });
/// ```
///
/// `F: Clone` because each composed pipeline gets its own copy of the
/// function — composing one chain against several terminals must not share
/// call-time state between the resulting handlers.
pub fn from_fn<F, Fut>(f: F) -> impl Middleware
where
    F: Fn(Request, BoxedHandler) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    move |next: BoxedHandler| {
        let f = f.clone();
        (move |req: Request| f(req, Arc::clone(&next))).into_boxed_handler()
    }
}
