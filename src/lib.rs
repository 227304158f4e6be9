//! # weave
//!
//! A minimal, middleware-first HTTP framework. One idea, done properly:
//! **ordered composition of middleware around a terminal handler**.
//!
//! ## The contract
//!
//! A [`middleware::Chain`] is an immutable, ordered list of middleware. Its
//! one operation, [`then`](middleware::Chain::then), folds the list around a
//! terminal handler and hands back a single composed handler. Declared order
//! is execution order: the first middleware appended sees the request first
//! and the response last. A middleware may decline to delegate — access
//! control and caching depend on exactly that.
//!
//! Everything else in the crate exists so the chain has something to wrap:
//!
//! - A handler capability — `async fn(Request) -> Response`, type-erased to
//!   a [`BoxedHandler`]
//! - Radix-tree routing — O(path-length) lookup via [`matchit`], usable as a
//!   chain terminal or on its own
//! - Async serving — hyper over tokio, HTTP/1.1 and HTTP/2, graceful
//!   shutdown on SIGTERM / Ctrl-C that drains in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use weave::middleware::{trace, Chain};
//! use weave::{IntoHandler, Method, Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .on(Method::GET,  "/users/{id}", get_user)
//!         .on(Method::POST, "/users",      create_user);
//!
//!     let pipeline = Chain::new()
//!         .append(trace())
//!         .then(Some(app.into_handler()));
//!
//!     Server::bind("0.0.0.0:3000").serve(pipeline).await.unwrap();
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(weave::StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(weave::StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(br#"{"id":"99"}"#.to_vec())
//! }
//! ```
//!
//! One chain, many pipelines: a `Chain` is never mutated, so you can call
//! `then` repeatedly with different terminals and share everything across
//! threads without synchronization.

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler, IntoHandler};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;

pub use http::{Method, StatusCode};
