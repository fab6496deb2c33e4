use angel_panel::client::CaptureClient;
use angel_panel::config::AppConfig;
use angel_panel::panel::ControlPanel;
use angel_panel::web::{self, AppState};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = Arc::new(AppConfig::from_env());

    tracing::info!(
        "Starting angel-panel on {} (capture server: {})",
        config.http_bind,
        config.angel_base_url
    );

    let client = CaptureClient::new(&config.angel_base_url);
    let panel = Arc::new(ControlPanel::new(client));

    panel.bootstrap().await;

    // Expired banners are swept even when no page is polling.
    let sweeper_panel = panel.clone();
    let sweeper = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            sweeper_panel.prune_alerts();
        }
    });

    let state = AppState { config, panel };
    web::serve(state).await?;

    sweeper.abort();
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = fmt().with_env_filter(env_filter).try_init();
}
