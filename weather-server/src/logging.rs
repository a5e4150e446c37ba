use anyhow::anyhow;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};
use weather_core::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let (level, valid) = match config.level.parse::<LevelFilter>() {
        Ok(level) => (level, true),
        Err(_) => (LevelFilter::INFO, false),
    };

    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).try_init(),
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_env_filter(filter).try_init()
        }
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

    if !valid {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", config.level);
    }

    Ok(())
}
