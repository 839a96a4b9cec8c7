//! Backend for the HungryzHub campus vending site.
//!
//! # General Infrastructure
//! - Marketing pages are static; the only dynamic surface is the voting
//!   page, which is fed by this server
//! - Votes are submitted through an embedded Google Form, so the form's
//!   response sheet is the source of truth — this server never writes
//! - One read endpoint aggregates the sheet into a stats snapshot on
//!   demand; the frontend stats client rate-limits itself to one real
//!   fetch per 10 minutes, so no server-side cache is kept
//!
//! # Error Surface
//! - Anything that goes wrong talking to Google is logged in full here
//!   and reaches the client as a generic `{ "error": ... }` with a 500
//! - An empty sheet is not a failure, just an unhelpful state; it comes
//!   back as a soft error object
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod sheets;
pub mod state;
pub mod stats;

use routes::{form_data_handler, health_handler};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/form-data", get(form_data_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
