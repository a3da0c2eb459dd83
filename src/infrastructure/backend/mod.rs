//! HTTP adapters for the air-quality backend.

mod air_quality_client;
mod client;
mod dto;

pub use air_quality_client::HttpAirQualityClient;
pub use client::{ApiClient, FetchOptions};
