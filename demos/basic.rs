//! Minimal weave example — a middleware chain around CRUD-style JSON endpoints.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42 -H 'x-api-key: local-dev'
//!   curl -X POST http://localhost:3000/users \
//!        -H 'x-api-key: local-dev' \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"alice"}'
//!   curl http://localhost:3000/users/42          # 401 — gate short-circuits
//!   curl http://localhost:3000/healthz -H 'x-api-key: local-dev'

use weave::middleware::{from_fn, trace, Chain};
use weave::{
    BoxedHandler, ErasedHandler, IntoHandler, Method, Request, Response, Router, Server,
    StatusCode, health,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .on(Method::GET,    "/users/{id}", get_user)
        .on(Method::POST,   "/users",      create_user)
        .on(Method::DELETE, "/users/{id}", delete_user)
        .on(Method::GET,    "/healthz",    health::liveness)
        .on(Method::GET,    "/readyz",     health::readiness);

    // Declared order is execution order: trace times the whole pipeline,
    // the gate runs inside it and may stop the request before routing.
    let pipeline = Chain::new()
        .append(trace())
        .append(require_api_key("local-dev"))
        .then(Some(app.into_handler()));

    Server::bind("0.0.0.0:3000")
        .serve(pipeline)
        .await
        .expect("server error");
}

// Rejects requests without the right x-api-key header. The interesting part
// is what it does NOT do on failure: it never calls `next`, so neither the
// router nor any later middleware runs for that request.
fn require_api_key(key: &'static str) -> impl weave::middleware::Middleware {
    from_fn(move |req: Request, next: BoxedHandler| async move {
        if req.header("x-api-key") == Some(key) {
            next.call(req).await
        } else {
            Response::status(StatusCode::UNAUTHORIZED)
        }
    })
}

// GET /users/{id}
async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

// POST /users
//
// req.body() is &[u8] — parse with serde_json::from_slice, simd-json, etc.
// weave does not touch the bytes.
async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }

    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#.to_owned().into_bytes())
}

// DELETE /users/{id} → 204 No Content
async fn delete_user(_req: Request) -> Response {
    Response::status(StatusCode::NO_CONTENT)
}
