use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::constants::{
    ALERTS_UNAVAILABLE, BLOCK_SEPARATOR, FORECAST_UNAVAILABLE, MAX_FORECAST_PERIODS,
    NO_ACTIVE_ALERTS, NWS_API_BASE, POINT_DATA_UNAVAILABLE,
};
use crate::fetcher::JsonFetcher;
use crate::formatters::{format_alert, format_period};
use crate::models::{AlertFeature, AlertsResponse, ForecastResponse, PointsResponse};

/// Faults in a response that was fetched successfully but cannot be reported on
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("malformed forecast period: {0}")]
    MalformedPeriod(String),
}

/// Alert and forecast lookups against the NWS API.
///
/// Transport failures degrade to fixed messages; only structurally broken
/// responses surface as [`LookupError`].
#[derive(Clone)]
pub struct WeatherLookup {
    base_url: String,
    fetcher: Arc<dyn JsonFetcher>,
}

impl WeatherLookup {
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            fetcher,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetches and decodes a document, collapsing every failure into `None`.
    /// An empty body (`null`, `{}`, `[]`) counts as no data.
    async fn fetch_as<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let value = self.fetcher.fetch(url).await.ok()?;
        if is_empty_document(&value) {
            tracing::warn!("Empty response from {}", url);
            return None;
        }
        serde_json::from_value(value)
            .map_err(|e| tracing::warn!("Unexpected response shape from {}: {}", url, e))
            .ok()
    }

    /// Active alerts for a state, one block per alert
    pub async fn get_alerts(&self, state: &str) -> Result<String, LookupError> {
        let url = format!("{}/alerts/active/area/{}", self.base_url, state);

        let Some(features) = self
            .fetch_as::<AlertsResponse>(&url)
            .await
            .and_then(|alerts| alerts.features)
        else {
            return Ok(ALERTS_UNAVAILABLE.to_string());
        };

        if features.is_empty() {
            return Ok(NO_ACTIVE_ALERTS.to_string());
        }

        tracing::debug!("Formatting {} alerts for {}", features.len(), state);
        let blocks: Vec<String> = features
            .iter()
            .map(|feature| format_alert(&AlertFeature::from_value(feature)))
            .collect();
        Ok(blocks.join(BLOCK_SEPARATOR))
    }

    /// Forecast for the next few periods at a coordinate
    pub async fn get_forecast(&self, latitude: f64, longitude: f64) -> Result<String, LookupError> {
        let points_url = format!("{}/points/{},{}", self.base_url, latitude, longitude);

        let Some(points) = self.fetch_as::<PointsResponse>(&points_url).await else {
            return Ok(POINT_DATA_UNAVAILABLE.to_string());
        };

        let forecast_url = points
            .forecast_url()
            .ok_or(LookupError::MissingField("properties.forecast"))?;

        let Some(forecast) = self.fetch_as::<ForecastResponse>(forecast_url).await else {
            return Ok(FORECAST_UNAVAILABLE.to_string());
        };

        let periods: Vec<Value> = forecast
            .into_periods()
            .ok_or(LookupError::MissingField("properties.periods"))?;

        let blocks = periods
            .iter()
            .take(MAX_FORECAST_PERIODS)
            .map(format_period)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(blocks.join(BLOCK_SEPARATOR))
    }
}

fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
