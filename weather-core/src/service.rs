use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::{fmt::Debug, sync::Arc};

use crate::{
    error::StoreError,
    model::{Reading, Weather},
    store::{ReadingProvider, ReadingSaver},
};

/// Write side, used by the scheduler.
#[async_trait]
pub trait WeatherRecorder: Send + Sync + Debug {
    async fn add(
        &self,
        city: &str,
        temperature: f64,
        observed_at: NaiveDateTime,
    ) -> Result<(), StoreError>;
}

/// Read side, used by the HTTP handler.
#[async_trait]
pub trait WeatherQuery: Send + Sync + Debug {
    async fn get(&self, city: &str) -> Result<Weather, StoreError>;
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    saver: Arc<dyn ReadingSaver>,
    provider: Arc<dyn ReadingProvider>,
}

impl WeatherService {
    pub fn new(saver: Arc<dyn ReadingSaver>, provider: Arc<dyn ReadingProvider>) -> Self {
        Self { saver, provider }
    }
}

#[async_trait]
impl WeatherRecorder for WeatherService {
    async fn add(
        &self,
        city: &str,
        temperature: f64,
        observed_at: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let reading = Reading { city: city.to_string(), temperature, observed_at };
        self.saver.insert(&reading).await
    }
}

#[async_trait]
impl WeatherQuery for WeatherService {
    async fn get(&self, city: &str) -> Result<Weather, StoreError> {
        let dto = self.provider.latest_for(city).await?;
        Ok(Weather::from(dto))
    }
}
