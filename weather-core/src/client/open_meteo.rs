use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::ClientError, model::CurrentTemperature};

use super::{TemperatureSource, success_body};

const SERVICE: &str = "open-meteo";

/// Open-Meteo forecast API, current 2 m temperature only.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    url: String,
}

impl OpenMeteoClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
}

#[async_trait]
impl TemperatureSource for OpenMeteoClient {
    async fn current_temperature(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentTemperature, ClientError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m".to_string()),
            ])
            .send()
            .await
            .map_err(|source| ClientError::Network { service: SERVICE, source })?;

        let body = success_body(SERVICE, res).await?;

        let parsed: OmResponse = serde_json::from_str(&body)
            .map_err(|source| ClientError::Decode { service: SERVICE, source })?;

        Ok(CurrentTemperature {
            observed_at: parsed.current.time,
            temperature_celsius: parsed.current.temperature_2m,
        })
    }
}
