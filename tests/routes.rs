mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use redis_shortener::routes;
use tower::ServiceExt;

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

fn app(ctx: &common::TestContext) -> TestServer {
    TestServer::new(routes::router(ctx.state.clone(), STATIC_DIR)).unwrap()
}

#[tokio::test]
async fn test_shorten_then_follow_info_location() {
    let ctx = common::create_test_context();
    let server = app(&ctx);

    let response = server
        .get("/shorten")
        .add_query_param("url", "example.com/page")
        .await;
    assert_eq!(response.status_code(), 301);

    // Location is absolute; request its path on the same server.
    let location = response.header("location");
    let path = location
        .to_str()
        .unwrap()
        .trim_start_matches(common::BASE_URL)
        .to_string();
    assert_eq!(path, "/1+");

    let info = server.get(&path).await;
    info.assert_status_ok();
    assert_eq!(
        info.json::<serde_json::Value>()["LongUrl"],
        "http://example.com/page"
    );

    let redirect = server.get("/1").await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "http://example.com/page");
}

#[tokio::test]
async fn test_fixed_routes_win_over_codes() {
    let ctx = common::create_test_context();
    let server = app(&ctx);

    server.get("/health").await.assert_status_ok();

    let latest = server.get("/latest").await;
    latest.assert_status_ok();
    assert_eq!(latest.json::<serde_json::Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_info_route_and_plus_suffix_agree() {
    let ctx = common::create_test_context();
    let server = app(&ctx);
    let record = common::create_test_link(&ctx.state, "https://example.com").await;

    let by_route = server.get(&format!("/info/{}", record.key)).await;
    let by_suffix = server.get(&format!("/{}+", record.key)).await;

    assert_eq!(
        by_route.json::<serde_json::Value>(),
        by_suffix.json::<serde_json::Value>()
    );
}

#[tokio::test]
async fn test_unknown_code_redirects_to_fallback() {
    let ctx = common::create_test_context();
    let server = app(&ctx);

    let response = server.get("/zzzz").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), common::NOT_FOUND_URL);
}

#[tokio::test]
async fn test_urllist_serves_static_files() {
    let ctx = common::create_test_context();
    let server = app(&ctx);

    let response = server.get("/urllist/index.html").await;

    response.assert_status_ok();
    assert!(response.text().contains("/shorten"));
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let ctx = common::create_test_context();
    let record = common::create_test_link(&ctx.state, "https://example.com/slash").await;
    let app = routes::app_router(ctx.state.clone(), STATIC_DIR);

    let response = app
        .oneshot(
            Request::get(format!("/info/{}/", record.key))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_shorten_path_with_scheme_through_app_router() {
    let ctx = common::create_test_context();
    let app = routes::app_router(ctx.state.clone(), STATIC_DIR);

    let response = app
        .oneshot(
            Request::get("/shorten/http://example.com/x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()["location"], "http://s.example.com/1+");
    let record = ctx.repository.load_record("1").await.unwrap().unwrap();
    assert_eq!(record.long_url, "http://example.com/x");
}
