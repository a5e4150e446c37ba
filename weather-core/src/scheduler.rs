//! Periodic fetch-and-persist job.
//!
//! Each tick resolves the configured city, looks up its current temperature
//! and records the reading. A failed step ends that tick only; the loop keeps
//! running and nothing is retried.

use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    client::{Geocoder, TemperatureSource},
    error::TickError,
    model::Reading,
    service::WeatherRecorder,
};

/// One city's fetch pipeline.
#[derive(Debug, Clone)]
pub struct WeatherJob {
    city: String,
    geocoder: Arc<dyn Geocoder>,
    source: Arc<dyn TemperatureSource>,
    recorder: Arc<dyn WeatherRecorder>,
}

impl WeatherJob {
    pub fn new(
        city: impl Into<String>,
        geocoder: Arc<dyn Geocoder>,
        source: Arc<dyn TemperatureSource>,
        recorder: Arc<dyn WeatherRecorder>,
    ) -> Self {
        Self { city: city.into(), geocoder, source, recorder }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Run the pipeline once and return what was stored.
    pub async fn tick(&self) -> Result<Reading, TickError> {
        let coordinate = self.geocoder.resolve(&self.city).await.map_err(TickError::Geocoding)?;

        let current = self
            .source
            .current_temperature(coordinate.latitude, coordinate.longitude)
            .await
            .map_err(TickError::Forecast)?;

        let observed_at = current
            .parse_observed_at()
            .map_err(|source| TickError::Parse { value: current.observed_at.clone(), source })?;

        self.recorder.add(&self.city, current.temperature_celsius, observed_at).await?;

        Ok(Reading {
            city: self.city.clone(),
            temperature: current.temperature_celsius,
            observed_at,
        })
    }

    /// [`tick`](Self::tick), with the outcome logged instead of returned.
    pub async fn run_tick(&self) -> Option<Reading> {
        match self.tick().await {
            Ok(reading) => {
                tracing::info!(
                    city = %reading.city,
                    temperature = reading.temperature,
                    observed_at = %reading.observed_at,
                    "stored weather reading"
                );
                Some(reading)
            }
            Err(e) => {
                tracing::error!(city = %self.city, error = %e, "weather tick failed");
                None
            }
        }
    }
}

/// Drives a [`WeatherJob`] on a fixed period until cancelled.
#[derive(Debug)]
pub struct Scheduler {
    job: WeatherJob,
    interval: Duration,
}

impl Scheduler {
    pub fn new(job: WeatherJob, interval: Duration) -> Self {
        // tokio::time::interval panics on a zero period.
        let interval = interval.max(Duration::from_millis(1));
        Self { job, interval }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Tick immediately, then every `interval`. Ticks never overlap.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            city = %self.job.city(),
            interval_secs = self.interval.as_secs_f64(),
            "starting weather scheduler"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::warn!(city = %self.job.city(), "shutdown during tick, abandoning it");
                    break;
                }
                _ = self.job.run_tick() => {}
            }
        }

        tracing::info!("weather scheduler stopped");
    }
}
