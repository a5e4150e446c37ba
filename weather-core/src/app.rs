use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{
    client::{GeocodingClient, Geocoder, OpenMeteoClient, TemperatureSource, http_client},
    config::Config,
    handler,
    scheduler::{Scheduler, WeatherJob},
    service::WeatherService,
    store::SqliteStore,
};

/// Everything the scheduler and the HTTP handler share, built once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<Config>,
    service: Arc<WeatherService>,
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn TemperatureSource>,
}

impl AppContext {
    pub fn new(
        config: Config,
        service: Arc<WeatherService>,
        geocoder: Arc<dyn Geocoder>,
        forecast: Arc<dyn TemperatureSource>,
    ) -> Self {
        Self { config: Arc::new(config), service, geocoder, forecast }
    }

    /// Open the store and build the upstream clients described by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = SqliteStore::open(&config.database.path, config.database_timeout())
            .with_context(|| {
                format!("Failed to open database: {}", config.database.path.display())
            })?;
        let store = Arc::new(store);
        let service = Arc::new(WeatherService::new(store.clone(), store));

        let http = http_client(config.upstream_timeout()).context("Failed to build HTTP client")?;
        let geocoder = Arc::new(GeocodingClient::new(
            http.clone(),
            config.upstream.geocoding_url.as_str(),
            config.upstream.language.as_str(),
        ));
        let forecast = Arc::new(OpenMeteoClient::new(http, config.upstream.forecast_url.as_str()));

        Ok(Self::new(config, service, geocoder, forecast))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<WeatherService> {
        Arc::clone(&self.service)
    }

    pub fn job(&self) -> WeatherJob {
        WeatherJob::new(
            self.config.scheduler.city.as_str(),
            Arc::clone(&self.geocoder),
            Arc::clone(&self.forecast),
            self.service(),
        )
    }

    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.job(), self.config.scheduler_interval())
    }

    pub fn router(&self) -> Router {
        handler::router(self.service())
    }

    /// Bind the configured address and run until `shutdown` is cancelled.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener =
            TcpListener::bind(&addr).await.with_context(|| format!("Failed to bind {addr}"))?;
        self.run_with_listener(listener, shutdown).await
    }

    /// Run the scheduler and the HTTP server side by side on `listener`.
    pub async fn run_with_listener(
        &self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<()> {
        let scheduler = self.scheduler().spawn(shutdown.clone());

        let local_addr = listener.local_addr().context("Listener has no local address")?;
        tracing::info!(addr = %local_addr, env = ?self.config.env, "weather server listening");

        let signal = shutdown.clone();
        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await;

        // The server may have stopped on its own; take the scheduler down with it.
        shutdown.cancel();
        scheduler.await.context("Scheduler task panicked")?;

        served.context("HTTP server failed")?;
        tracing::info!("weather server stopped");
        Ok(())
    }
}
