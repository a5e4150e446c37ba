use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// env = "prod"
///
/// [server]
/// port = 8080
///
/// [scheduler]
/// city = "moscow"
/// interval_secs = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub env: Environment,
    pub server: ServerConfig,
    pub scheduler: SchedulerConfig,
    pub upstream: UpstreamConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// The single city the scheduler fetches on every tick.
    pub city: String,
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { city: "moscow".to_string(), interval_secs: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Language of geocoding results.
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            language: "ru".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path; `:memory:` keeps everything in process.
    pub path: PathBuf,
    pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("weather.db"), timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

impl Config {
    /// Load config from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_file_path()?, false),
        };

        if !path.exists() {
            if explicit {
                bail!("Config file not found: {}", path.display());
            }
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.scheduler.city.trim().is_empty() {
            bail!("scheduler.city must not be empty");
        }
        if self.scheduler.interval_secs == 0 {
            bail!("scheduler.interval_secs must be greater than zero");
        }
        if self.upstream.timeout_secs == 0 {
            bail!("upstream.timeout_secs must be greater than zero");
        }
        if self.database.timeout_secs == 0 {
            bail!("database.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Path to the default config file.
    pub fn default_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn scheduler_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.interval_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }

    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_reference_defaults() {
        let cfg = Config::from_toml_str("").expect("empty config is valid");

        assert_eq!(cfg.env, Environment::Local);
        assert_eq!(cfg.scheduler.city, "moscow");
        assert_eq!(cfg.scheduler_interval(), Duration::from_secs(10));
        assert_eq!(cfg.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.upstream.language, "ru");
        assert_eq!(cfg.upstream.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            env = "prod"

            [scheduler]
            city = "kazan"

            [logging]
            format = "json"
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.env, Environment::Prod);
        assert_eq!(cfg.scheduler.city, "kazan");
        assert_eq!(cfg.scheduler.interval_secs, 10);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::from_toml_str("[scheduler]\ninterval_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn blank_city_is_rejected() {
        let err = Config::from_toml_str("[scheduler]\ncity = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("scheduler.city"));
    }

    #[test]
    fn unknown_log_format_fails_to_parse() {
        assert!(Config::from_toml_str("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[server]\nport = 9090\n[database]\npath = \":memory:\"").expect("write");

        let cfg = Config::load(Some(file.path())).expect("config loads");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.database.path, PathBuf::from(":memory:"));
    }

    #[test]
    fn load_errors_when_explicit_file_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");

        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
