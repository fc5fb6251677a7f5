//! MCP tools for National Weather Service alerts and forecasts.

pub mod constants;
pub mod fetcher;
pub mod formatters;
pub mod lookup;
pub mod models;
pub mod service;

pub use fetcher::{FetchError, HttpFetcher, JsonFetcher};
pub use lookup::{LookupError, WeatherLookup};
pub use service::Weather;
