use serde::Deserialize;
use serde_json::Value;

use crate::lookup::LookupError;
use crate::models::{AlertFeature, ForecastPeriod};

/// Formats a single weather alert into a human-readable block
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props.description.as_deref().unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Formats one raw forecast period.
///
/// Every field is required; a period missing any of them is rejected rather
/// than rendered with made-up values.
pub fn format_period(period: &Value) -> Result<String, LookupError> {
    let period = ForecastPeriod::deserialize(period)
        .map_err(|e| LookupError::MalformedPeriod(e.to_string()))?;

    Ok(format!(
        "\n{}:\nTemperature: {}\u{00b0}{}\nWind: {} {}\nForecast: {}\n",
        period.name,
        period.temperature,
        period.temperature_unit,
        period.wind_speed,
        period.wind_direction,
        period.detailed_forecast
    ))
}
