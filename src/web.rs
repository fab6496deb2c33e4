use crate::config::AppConfig;
use crate::panel::{CaptureAction, ControlPanel, UnknownAction};
use crate::ui;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub panel: Arc<ControlPanel>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/panel", get(panel_view))
        .route("/api/status", post(refresh_status))
        .route("/api/capture/:action", post(capture_action))
        .route("/api/config", get(remote_config).post(save_config))
        .route("/api/alerts/:id/dismiss", post(dismiss_alert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let addr: SocketAddr = state.config.http_bind.parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Panel listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(graceful_shutdown())
        .await?;

    Ok(())
}

async fn graceful_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down http server");
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Html(ui::render_html(&state.config.angel_base_url))
}

async fn panel_view(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.panel.view())
}

async fn refresh_status(State(state): State<AppState>) -> impl IntoResponse {
    state.panel.refresh_status().await;
    Json(state.panel.view())
}

async fn capture_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let action: CaptureAction = action.parse().map_err(|err: UnknownAction| {
        tracing::warn!("{err}");
        (StatusCode::BAD_REQUEST, err.to_string())
    })?;

    state.panel.dispatch(action).await;
    Ok(Json(state.panel.view()))
}

async fn remote_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.panel.remote_config().await)
}

async fn save_config(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> impl IntoResponse {
    state
        .panel
        .save_config(fields.iter().map(|(name, value)| (name.as_str(), value.as_str())));
    Json(state.panel.view())
}

async fn dismiss_alert(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if state.panel.dismiss_alert(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("No alert with id {id}")))
    }
}
