// gateway/src/telemetry.rs

use crate::config::LogFormat;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`.
pub fn init_tracing(format: LogFormat) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}
