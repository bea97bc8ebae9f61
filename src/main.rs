mod config;
mod lobby;
mod routes;
mod services;
mod slack;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    let notifier = services::broadcast::SlackNotifier::new(config.broadcast).expect("broadcast client init failed");
    let engine = lobby::LobbyEngine::new(config.command.clone(), config.lobby_size);
    let state = state::AppState::new(engine, Arc::new(notifier));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, command = %config.command, lobby_size = config.lobby_size, "kicker listening");
    axum::serve(listener, app).await.expect("server failed");
}
