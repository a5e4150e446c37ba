//! Core library for the weather service.
//!
//! This crate defines:
//! - Configuration loading
//! - Clients for the geocoding and forecast upstreams
//! - Reading storage and the service on top of it
//! - The periodic fetch-and-persist scheduler
//! - The HTTP read endpoint
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod store;

pub use app::AppContext;
pub use client::{Geocoder, TemperatureSource};
pub use config::Config;
pub use error::{ClientError, StoreError, TickError};
pub use model::{Coordinate, CurrentTemperature, Reading, ReadingDto, Weather};
pub use scheduler::{Scheduler, WeatherJob};
pub use service::{WeatherQuery, WeatherRecorder, WeatherService};
pub use store::{ReadingProvider, ReadingSaver, SqliteStore};
