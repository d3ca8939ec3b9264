// gateway/src/lib.rs

//! HTTP gateway for the trade inventory: actix-web routes over a
//! `trade_core::DocumentStore`.

pub mod config;
pub mod errors;
pub mod seed;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
