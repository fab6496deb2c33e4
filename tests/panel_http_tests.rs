//! Integration tests for the panel's own HTTP surface.

use angel_panel::client::CaptureClient;
use angel_panel::config::AppConfig;
use angel_panel::panel::ControlPanel;
use angel_panel::web::{self, AppState};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_panel_app(upstream_base: &str) -> (String, Arc<ControlPanel>) {
    let panel = Arc::new(ControlPanel::new(CaptureClient::new(upstream_base)));
    let state = AppState {
        config: Arc::new(AppConfig {
            angel_base_url: upstream_base.to_string(),
            http_bind: String::new(),
        }),
        panel: panel.clone(),
    };
    let addr = spawn(web::router(state)).await;
    (addr, panel)
}

#[tokio::test]
async fn unknown_action_is_rejected_without_banner() {
    let (app, _panel) = spawn_panel_app("http://127.0.0.1:9/angel").await;
    let http = reqwest::Client::new();

    let res = http
        .post(format!("{app}/api/capture/foo"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let view: Value = http
        .get(format!("{app}/api/panel"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["alerts"], json!([]));
    assert!(view.get("running").is_none());
}

#[tokio::test]
async fn action_route_dispatches_and_returns_refreshed_view() {
    let upstream = Router::new().route(
        "/angel/api/capture/start",
        post(|| async {
            Json(json!({
                "success": true,
                "running": true,
                "message": "Capture services started"
            }))
        }),
    );
    let upstream_addr = spawn(upstream).await;
    let (app, _panel) = spawn_panel_app(&format!("{upstream_addr}/angel")).await;
    let http = reqwest::Client::new();

    let view: Value = http
        .post(format!("{app}/api/capture/start"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["running"], json!(true));
    assert_eq!(view["start_disabled"], json!(true));
    assert_eq!(view["stop_disabled"], json!(false));
    assert_eq!(view["alerts"][0]["severity"], json!("success"));
    assert_eq!(view["alerts"][1]["severity"], json!("info"));
}

#[tokio::test]
async fn config_form_submission_surfaces_stub_warning() {
    let (app, _panel) = spawn_panel_app("http://127.0.0.1:9/angel").await;
    let http = reqwest::Client::new();

    let view: Value = http
        .post(format!("{app}/api/config"))
        .form(&[("enabled", "on"), ("interval", "30")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["alerts"][0]["severity"], json!("warning"));
    assert!(
        view["alerts"][0]["message"]
            .as_str()
            .unwrap()
            .contains("not yet available")
    );
}

#[tokio::test]
async fn dismiss_route_removes_a_persistent_banner() {
    let (app, panel) = spawn_panel_app("http://127.0.0.1:9/angel").await;
    panel.bootstrap().await;
    let http = reqwest::Client::new();

    let view: Value = http
        .get(format!("{app}/api/panel"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["alerts"][0]["severity"], json!("danger"));
    let id = view["alerts"][0]["id"].as_u64().unwrap();

    let res = http
        .post(format!("{app}/api/alerts/{id}/dismiss"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let view: Value = http
        .get(format!("{app}/api/panel"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["alerts"], json!([]));

    let res = http
        .post(format!("{app}/api/alerts/{id}/dismiss"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn index_serves_the_control_markup() {
    let (app, _panel) = spawn_panel_app("http://127.0.0.1:9/angel").await;

    let page = reqwest::get(&app).await.unwrap().text().await.unwrap();
    assert!(page.contains("startButton"));
    assert!(page.contains("stopButton"));
    assert!(page.contains("restartButton"));
    assert!(page.contains("configForm"));
    assert!(page.contains("card-body"));
}
