// gateway/src/main.rs

use actix_web::{App, HttpServer};
use std::io;
use trade_gateway::config::{AppConfig, LogFormat};
use trade_gateway::state::AppState;
use trade_gateway::{seed, store, telemetry, web};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
  tracing::error!(error = %err, "{}", context);
  io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  // Config is loaded before logging starts; a bad config is reported through pretty logs.
  let loaded_config = AppConfig::from_env();
  let log_format = loaded_config.as_ref().map_or(LogFormat::Pretty, |c| c.log_format);
  telemetry::init_tracing(log_format);

  tracing::info!("Starting trade gateway server...");

  let app_config = loaded_config.map_err(|e| startup_error("Failed to load application configuration.", e))?;
  tracing::info!(
    backend = ?app_config.store_backend,
    policy = ?app_config.stock_policy,
    log_format = ?app_config.log_format,
    "Application configuration loaded successfully."
  );

  let document_store = store::connect_store(&app_config)
    .await
    .map_err(|e| startup_error("Failed to connect to the document store.", e))?;

  if app_config.seed_db {
    if let Err(e) = seed::seed_if_empty(document_store.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed database.");
    }
  }

  let server_address = app_config.bind_address();
  let app_state = AppState::new(document_store.clone(), app_config);
  tracing::info!("Attempting to bind server to {}...", server_address);

  let server_state = app_state.clone();
  let outcome = HttpServer::new(move || {
    let state = server_state.clone();
    App::new()
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(move |cfg| web::configure_app(cfg, &state))
  })
  .bind(&server_address)?
  .run()
  .await;

  tracing::info!("Server stopped; releasing the document store.");
  document_store.close().await;
  outcome
}
