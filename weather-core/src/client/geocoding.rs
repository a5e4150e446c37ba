use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::ClientError, model::Coordinate};

use super::{Geocoder, success_body};

const SERVICE: &str = "geocoding";

/// Open-Meteo geocoding search, asking for the single best match.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    url: String,
    language: String,
}

impl GeocodingClient {
    pub fn new(http: Client, url: impl Into<String>, language: impl Into<String>) -> Self {
        Self { http, url: url.into(), language: language.into() }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    // Absent entirely when nothing matched.
    #[serde(default)]
    results: Vec<GeoPlace>,
}

#[derive(Debug, Deserialize)]
struct GeoPlace {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn resolve(&self, city: &str) -> Result<Coordinate, ClientError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|source| ClientError::Network { service: SERVICE, source })?;

        let body = success_body(SERVICE, res).await?;

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|source| ClientError::Decode { service: SERVICE, source })?;

        let place = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::EmptyResult { service: SERVICE, query: city.to_string() })?;

        tracing::debug!(
            city,
            matched = %place.name,
            country = place.country.as_deref().unwrap_or("-"),
            latitude = place.latitude,
            longitude = place.longitude,
            "resolved city"
        );

        Ok(Coordinate { latitude: place.latitude, longitude: place.longitude })
    }
}
