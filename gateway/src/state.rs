// gateway/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use trade_core::DocumentStore;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn DocumentStore>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
    AppState {
      store,
      config: Arc::new(config),
    }
  }
}
