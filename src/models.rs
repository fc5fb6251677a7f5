use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

// ============================================================================
// National Weather Service API Models
// ============================================================================

/// Features stay untyped so one malformed record cannot hide the others
#[derive(Debug, Deserialize)]
pub struct AlertsResponse {
    pub features: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: AlertProperties,
}

impl AlertFeature {
    /// Decodes one feature, rendering anything unusable with fallbacks
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Alert fields are all optional; the formatter supplies fallbacks
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    #[serde(default, deserialize_with = "lenient_string")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instruction: Option<String>,
}

// Non-string values fall back like missing ones.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

// `null` or a non-object properties value renders as if every field were absent.
fn lenient_properties<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AlertProperties, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(AlertProperties::deserialize(&value).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    pub forecast: Option<String>,
}

impl PointsResponse {
    pub fn forecast_url(&self) -> Option<&str> {
        self.properties.as_ref()?.forecast.as_deref()
    }
}

/// Periods stay untyped here so each one is validated on its own when formatted
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Option<Vec<Value>>,
}

impl ForecastResponse {
    pub fn into_periods(self) -> Option<Vec<Value>> {
        self.properties?.periods
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: Number,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub detailed_forecast: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}
