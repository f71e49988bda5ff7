mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use redis_shortener::api::handlers::info_handler;

fn app(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/info/{code}", get(info_handler))
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_info_success() {
    let ctx = common::create_test_context();
    let server = app(&ctx);
    let record = common::create_test_link(&ctx.state, "http://example.com/x").await;

    let response = server.get(&format!("/info/{}", record.key)).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["LongUrl"], "http://example.com/x");
    assert_eq!(json["ShortUrl"], "http://s.example.com/1");
    assert_eq!(json["CreationDate"], record.creation_date);
    assert_eq!(json["Clicks"], 0);
}

#[tokio::test]
async fn test_info_reflects_clicks() {
    let ctx = common::create_test_context();
    let server = app(&ctx);
    let record = common::create_test_link(&ctx.state, "http://example.com").await;

    ctx.repository.increment_clicks(&record.key).await.unwrap();
    ctx.repository.increment_clicks(&record.key).await.unwrap();

    let response = server.get(&format!("/info/{}", record.key)).await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["Clicks"], 2);
}

#[tokio::test]
async fn test_info_not_found() {
    let ctx = common::create_test_context();
    let server = app(&ctx);

    let response = server.get("/info/nothing").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "nothing");
}

#[tokio::test]
async fn test_info_counter_key_not_found() {
    let ctx = common::create_test_context();
    let server = app(&ctx);
    common::create_test_link(&ctx.state, "http://example.com/x").await;

    let response = server.get("/info/__counter__").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["code"], "__counter__");
}

#[tokio::test]
async fn test_info_code_outside_alphabet_not_found() {
    let ctx = common::create_test_context();
    let server = app(&ctx);

    let response = server.get("/info/a.b").await;

    response.assert_status_not_found();
}
