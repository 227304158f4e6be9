//! Built-in per-request tracing middleware.

use std::time::Instant;

use tracing::info;

use crate::handler::{BoxedHandler, ErasedHandler};
use crate::middleware::{from_fn, Middleware};
use crate::request::Request;

/// Emits one structured `tracing` event per request: method, path, response
/// status, and elapsed milliseconds.
///
/// Pure pass-through — it never alters the request or response and never
/// short-circuits. Put it first in the chain so the timing covers every
/// other middleware:
///
/// ```rust
/// use weave::middleware::{trace, Chain};
///
/// let chain = Chain::new().append(trace());
/// ```
pub fn trace() -> impl Middleware {
    from_fn(|req: Request, next: BoxedHandler| async move {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let start = Instant::now();

        let res = next.call(req).await;

        info!(
            %method,
            path,
            status = res.code().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request"
        );
        res
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Chain;
    use crate::response::Response;
    use http::{Method, StatusCode};

    #[tokio::test]
    async fn trace_passes_request_and_response_through_unchanged() {
        async fn app(req: Request) -> Response {
            assert_eq!(req.header("x-check"), Some("kept"));
            Response::builder()
                .status(StatusCode::CREATED)
                .text("made it")
        }

        let handler = Chain::new().append(trace()).then_fn(app);
        let req = Request::synthetic(Method::GET, "/traced").with_header("x-check", "kept");

        let res = handler.call(req).await;
        assert_eq!(res.code(), StatusCode::CREATED);
        assert_eq!(res.body(), b"made it");
    }
}
