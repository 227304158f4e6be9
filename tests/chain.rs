//! Middleware chain behavior through the public API only.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use weave::middleware::{from_fn, Chain, Middleware};
use weave::{
    BoxedHandler, ErasedHandler, IntoHandler, Method, Request, Response, Router, StatusCode,
};

/// Middleware that writes its own tag in front of whatever the rest of the
/// pipeline produces and touches nothing else — status included, so a 404
/// from the terminal stays a 404. Useful for checking that a chain runs in
/// the right order.
fn tag_middleware(tag: &'static str) -> impl Middleware {
    from_fn(move |req: Request, next: BoxedHandler| async move {
        let res = next.call(req).await;
        let mut body = tag.as_bytes().to_vec();
        body.extend_from_slice(res.body());
        Response::builder()
            .status(res.code())
            .text(String::from_utf8_lossy(&body).into_owned())
    })
}

async fn app(_req: Request) -> Response {
    Response::text("app\n")
}

#[tokio::test]
async fn chain_applies_middleware_in_declared_order() {
    let handler = Chain::new()
        .append(tag_middleware("t1\n"))
        .append(tag_middleware("t2\n"))
        .append(tag_middleware("t3\n"))
        .then_fn(app);

    let res = handler.call(Request::synthetic(Method::GET, "/")).await;
    assert_eq!(res.body(), b"t1\nt2\nt3\napp\n");
}

#[tokio::test]
async fn empty_chain_behaves_like_the_terminal_alone() {
    let handler = Chain::new().then_fn(app);
    let res = handler.call(Request::synthetic(Method::GET, "/")).await;
    assert_eq!(res.code(), StatusCode::OK);
    assert_eq!(res.body(), b"app\n");
}

#[tokio::test]
async fn missing_terminal_defaults_to_the_404_multiplexer() {
    let handler = Chain::new().append(tag_middleware("t1\n")).then(None);
    let res = handler.call(Request::synthetic(Method::GET, "/whatever")).await;
    assert_eq!(res.code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tagging_middleware_keeps_the_terminal_status() {
    async fn teapot(_req: Request) -> Response {
        Response::builder()
            .status(StatusCode::IM_A_TEAPOT)
            .text("short and stout\n")
    }

    let handler = Chain::new()
        .append(tag_middleware("t1\n"))
        .append(tag_middleware("t2\n"))
        .then_fn(teapot);

    let res = handler.call(Request::synthetic(Method::GET, "/brew")).await;
    assert_eq!(res.code(), StatusCode::IM_A_TEAPOT);
    assert_eq!(res.body(), b"t1\nt2\nshort and stout\n");
}

#[tokio::test]
async fn short_circuiting_middleware_stops_everything_downstream() {
    let reached_later = Arc::new(AtomicBool::new(false));
    let reached_terminal = Arc::new(AtomicBool::new(false));

    let gate = from_fn(|_req: Request, _next: BoxedHandler| async move {
        Response::status(StatusCode::FORBIDDEN)
    });

    let later = {
        let flag = Arc::clone(&reached_later);
        from_fn(move |req: Request, next: BoxedHandler| {
            let flag = Arc::clone(&flag);
            async move {
                flag.store(true, Ordering::SeqCst);
                next.call(req).await
            }
        })
    };

    let terminal = {
        let flag = Arc::clone(&reached_terminal);
        move |_req: Request| {
            let flag = Arc::clone(&flag);
            async move {
                flag.store(true, Ordering::SeqCst);
                Response::text("app\n")
            }
        }
    };

    let handler = Chain::new().append(gate).append(later).then_fn(terminal);
    let res = handler.call(Request::synthetic(Method::GET, "/secret")).await;

    assert_eq!(res.code(), StatusCode::FORBIDDEN);
    assert!(!reached_later.load(Ordering::SeqCst));
    assert!(!reached_terminal.load(Ordering::SeqCst));
}

#[tokio::test]
async fn one_chain_composes_against_many_terminals() {
    let chain = Chain::new().append(tag_middleware("mw\n"));

    async fn one(_req: Request) -> Response {
        Response::text("one\n")
    }
    async fn two(_req: Request) -> Response {
        Response::text("two\n")
    }

    let first = chain.then_fn(one);
    let second = chain.then_fn(two);

    let res = first.call(Request::synthetic(Method::GET, "/")).await;
    assert_eq!(res.body(), b"mw\none\n");
    let res = second.call(Request::synthetic(Method::GET, "/")).await;
    assert_eq!(res.body(), b"mw\ntwo\n");
}

#[tokio::test]
async fn chain_wraps_a_router_terminal() {
    async fn get_user(req: Request) -> Response {
        Response::text(format!("user {}\n", req.param("id").unwrap_or("?")))
    }

    let router = Router::new().on(Method::GET, "/users/{id}", get_user);
    let handler = Chain::new()
        .append(tag_middleware("t1\n"))
        .then(Some(router.into_handler()));

    let res = handler.call(Request::synthetic(Method::GET, "/users/7")).await;
    assert_eq!(res.body(), b"t1\nuser 7\n");

    let res = handler.call(Request::synthetic(Method::GET, "/missing")).await;
    assert_eq!(res.code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hand_implemented_middleware_composes_like_any_other() {
    struct RequireKey {
        key: &'static str,
    }

    impl Middleware for RequireKey {
        fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
            use weave::Handler;
            let key = self.key;
            (move |req: Request| {
                let next = Arc::clone(&next);
                async move {
                    if req.header("x-api-key") == Some(key) {
                        next.call(req).await
                    } else {
                        Response::status(StatusCode::UNAUTHORIZED)
                    }
                }
            })
            .into_boxed_handler()
        }
    }

    let handler = Chain::new().append(RequireKey { key: "sesame" }).then_fn(app);

    let allowed = Request::synthetic(Method::GET, "/").with_header("x-api-key", "sesame");
    assert_eq!(handler.call(allowed).await.body(), b"app\n");

    let denied = Request::synthetic(Method::GET, "/");
    assert_eq!(handler.call(denied).await.code(), StatusCode::UNAUTHORIZED);
}
