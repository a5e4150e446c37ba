use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Upstream timestamp layout: minute precision, no seconds, no offset.
pub const OBSERVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Geographic position resolved from a city name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw result of a current-temperature lookup, timestamp still unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentTemperature {
    pub observed_at: String,
    pub temperature_celsius: f64,
}

impl CurrentTemperature {
    /// Parse `observed_at` using [`OBSERVED_AT_FORMAT`].
    pub fn parse_observed_at(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        parse_observed_at(&self.observed_at)
    }
}

pub fn parse_observed_at(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, OBSERVED_AT_FORMAT)
}

/// A reading as it is written to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub city: String,
    pub temperature: f64,
    pub observed_at: NaiveDateTime,
}

/// A reading reconstructed from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingDto {
    pub city: String,
    pub observed_at: NaiveDateTime,
    pub temperature: f64,
}

impl From<ReadingDto> for Weather {
    fn from(dto: ReadingDto) -> Self {
        Self { name: dto.city, temperature: dto.temperature }
    }
}

/// Client-facing form of the latest reading for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub name: String,
    pub temperature: f64,
}
