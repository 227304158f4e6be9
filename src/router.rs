//! Radix-tree request router — the framework's request multiplexer.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. Routing stays out of the middleware chain: a [`Router`] is
//! just another handler capability, so it slots in as the terminal of a
//! [`Chain`](crate::middleware::Chain) or goes straight to
//! [`Server::serve`](crate::Server::serve).

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler, IntoHandler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// One radix tree per HTTP method — O(path-length) lookup, no allocations on
/// the hot path. Build it once at startup. Each [`Router::on`] call returns
/// `self` so registrations chain naturally.
///
/// A request that matches no route is answered `404 Not Found`, which makes
/// an *empty* router the framework's default multiplexer — the fallback a
/// [`Chain`](crate::middleware::Chain) composes around when it is given no
/// terminal handler.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use weave::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn create_user(_: Request) -> Response { Response::text("") }
    /// # async fn delete_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::DELETE, "/users/{id}", delete_user)
    ///     .on(Method::GET,    "/users/{id}", get_user)
    ///     .on(Method::POST,   "/users",      create_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics at startup on an invalid or conflicting route pattern.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// A router is a handler: look up, fill in path parameters, delegate.
/// No match means `404 Not Found`.
impl IntoHandler for Router {
    fn into_handler(self) -> BoxedHandler {
        Arc::new(RouterHandler(self))
    }
}

struct RouterHandler(Router);

impl ErasedHandler for RouterHandler {
    fn call(&self, mut req: Request) -> BoxFuture {
        match self.0.lookup(req.method(), req.path()) {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req)
            }
            None => Box::pin(async { Response::status(StatusCode::NOT_FOUND) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(req: Request) -> Response {
        let id = req.param("id").unwrap_or("none");
        Response::text(id.to_owned())
    }

    #[tokio::test]
    async fn matched_route_receives_path_params() {
        let app = Router::new()
            .on(Method::GET, "/users/{id}", echo_id)
            .into_handler();

        let res = app.call(Request::synthetic(Method::GET, "/users/42")).await;
        assert_eq!(res.code(), StatusCode::OK);
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn unmatched_path_and_method_answer_404() {
        let app = Router::new()
            .on(Method::GET, "/users/{id}", echo_id)
            .into_handler();

        let res = app.call(Request::synthetic(Method::GET, "/nope")).await;
        assert_eq!(res.code(), StatusCode::NOT_FOUND);

        let res = app.call(Request::synthetic(Method::POST, "/users/42")).await;
        assert_eq!(res.code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_router_is_a_pure_404_multiplexer() {
        let app = Router::new().into_handler();
        let res = app.call(Request::synthetic(Method::GET, "/anything")).await;
        assert_eq!(res.code(), StatusCode::NOT_FOUND);
    }
}
