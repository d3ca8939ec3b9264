// gateway/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use trade_core::StockPolicy;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_JSON_BODY_LIMIT: usize = 256 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Memory,
  Postgres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl LogFormat {
  pub fn parse(value: Option<&str>) -> Result<Self> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
      None | Some("") | Some("pretty") => Ok(LogFormat::Pretty),
      Some("json") => Ok(LogFormat::Json),
      Some(other) => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected pretty or json", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: Option<String>,
  pub store_backend: StoreBackend,
  pub database_max_connections: u32,
  pub stock_policy: StockPolicy,
  pub json_body_limit: usize,
  pub seed_db: bool,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    AppConfig {
      server_host: "127.0.0.1".to_string(),
      server_port: DEFAULT_SERVER_PORT,
      database_url: None,
      store_backend: StoreBackend::Memory,
      database_max_connections: 5,
      stock_policy: StockPolicy::Guarded,
      json_body_limit: DEFAULT_JSON_BODY_LIMIT,
      seed_db: false,
      log_format: LogFormat::Pretty,
    }
  }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
  T::Err: std::fmt::Display,
{
  match raw {
    None => Ok(default),
    Some(value) => value
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, value, e))),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; unset and empty are the same.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let defaults = AppConfig::default();

    let server_host = get("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_var("SERVER_PORT", get("SERVER_PORT").or_else(|| get("PORT")), defaults.server_port)?;
    let database_url = get("DATABASE_URL");

    let store_backend = match get("STORE_BACKEND").map(|v| v.trim().to_ascii_lowercase()).as_deref() {
      None if database_url.is_some() => StoreBackend::Postgres,
      None => StoreBackend::Memory,
      Some("memory") => StoreBackend::Memory,
      Some("postgres") | Some("postgresql") => StoreBackend::Postgres,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid STORE_BACKEND '{}': expected memory or postgres",
          other
        )))
      }
    };
    if store_backend == StoreBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' required by the postgres backend".to_string(),
      ));
    }

    let database_max_connections = parse_var(
      "DATABASE_MAX_CONNECTIONS",
      get("DATABASE_MAX_CONNECTIONS"),
      defaults.database_max_connections,
    )?;
    let allow_negative_stock = parse_var("ALLOW_NEGATIVE_STOCK", get("ALLOW_NEGATIVE_STOCK"), false)?;
    let json_body_limit = parse_var("JSON_BODY_LIMIT", get("JSON_BODY_LIMIT"), defaults.json_body_limit)?;
    let seed_db = parse_var("SEED_DB", get("SEED_DB"), false)?;
    let log_format = LogFormat::parse(get("LOG_FORMAT").as_deref())?;

    Ok(Self {
      server_host,
      server_port,
      database_url,
      store_backend,
      database_max_connections,
      stock_policy: if allow_negative_stock {
        StockPolicy::Unchecked
      } else {
        StockPolicy::Guarded
      },
      json_body_limit,
      seed_db,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
