use async_trait::async_trait;
use reqwest::{Client, Response};
use std::{fmt::Debug, time::Duration};

use crate::{
    error::ClientError,
    model::{Coordinate, CurrentTemperature},
};

pub mod geocoding;
pub mod open_meteo;

pub use geocoding::GeocodingClient;
pub use open_meteo::OpenMeteoClient;

const USER_AGENT: &str = concat!("weather-service/", env!("CARGO_PKG_VERSION"));

/// Resolves a city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Result<Coordinate, ClientError>;
}

/// Looks up the current temperature at a coordinate.
#[async_trait]
pub trait TemperatureSource: Send + Sync + Debug {
    async fn current_temperature(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentTemperature, ClientError>;
}

/// Build the HTTP client shared by both upstream clients.
///
/// `timeout` bounds every request end to end.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).user_agent(USER_AGENT).build()
}

/// Read the response body, failing on a non-success status.
async fn success_body(service: &'static str, res: Response) -> Result<String, ClientError> {
    let status = res.status();
    let body = res.text().await.map_err(|source| ClientError::Network { service, source })?;

    if !status.is_success() {
        return Err(ClientError::BadStatus { service, status, body: truncate_body(&body) });
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
