use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::fetcher::{HttpFetcher, JsonFetcher};
use crate::lookup::{LookupError, WeatherLookup};
use crate::models::{GetAlertsRequest, GetForecastRequest};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    lookup: WeatherLookup,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance backed by the live NWS API
    pub fn new() -> Self {
        Self::with_lookup(WeatherLookup::new(Arc::new(HttpFetcher::new())))
    }

    /// Creates a service over any document source
    pub fn with_fetcher(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self::with_lookup(WeatherLookup::new(fetcher))
    }

    pub fn with_lookup(lookup: WeatherLookup) -> Self {
        Self {
            lookup,
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::new()
    }
}

fn into_tool_result(result: Result<String, LookupError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            tracing::error!("Lookup failed: {}", e);
            Err(McpError::internal_error(e.to_string(), None))
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the National Weather Service API. \
                Provides active alerts for US states and short forecasts for US locations."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter US state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        into_tool_result(self.lookup.get_alerts(&request.state).await)
    }

    /// Gets the next forecast periods for a location
    #[tool(description = "Get weather forecast for a location. Provide the latitude and longitude of the location.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        into_tool_result(
            self.lookup
                .get_forecast(request.latitude, request.longitude)
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ALERTS_UNAVAILABLE, NO_ACTIVE_ALERTS, NWS_API_BASE};
    use crate::lookup::tests::{build_lookup, forecast_stub, period, StubFetcher, BASE};
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    fn service(stub: StubFetcher) -> Weather {
        Weather::with_lookup(build_lookup(stub).0)
    }

    #[test]
    fn router_registers_both_tools() {
        let mut names: Vec<String> = Weather::tool_router()
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["get_alerts", "get_forecast"]);
    }

    #[test]
    fn info_advertises_tools() {
        let info = service(StubFetcher::default()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "weather");
    }

    #[tokio::test]
    async fn alerts_tool_returns_text() {
        let weather = service(StubFetcher::default().with(
            &format!("{}/alerts/active/area/CA", BASE),
            Ok(json!({ "features": [{ "properties": { "event": "Flood Warning" } }] })),
        ));

        let result = weather
            .get_alerts(Parameters(GetAlertsRequest { state: "CA".into() }))
            .await
            .unwrap();
        assert!(text_of(&result).contains("Event: Flood Warning"));
    }

    #[tokio::test]
    async fn with_fetcher_queries_nws_base() {
        let stub = StubFetcher::default().with(
            &format!("{}/alerts/active/area/WA", NWS_API_BASE),
            Ok(json!({ "features": [] })),
        );
        let weather = Weather::with_fetcher(Arc::new(stub));

        let result = weather
            .get_alerts(Parameters(GetAlertsRequest { state: "WA".into() }))
            .await
            .unwrap();
        assert_eq!(text_of(&result), NO_ACTIVE_ALERTS);
    }

    #[tokio::test]
    async fn unreachable_api_is_still_a_successful_call() {
        let weather = service(StubFetcher::default());

        let result = weather
            .get_alerts(Parameters(GetAlertsRequest { state: "CA".into() }))
            .await
            .unwrap();
        assert_eq!(text_of(&result), ALERTS_UNAVAILABLE);
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn forecast_tool_returns_text() {
        let weather = service(forecast_stub(vec![period(1)]));

        let result = weather
            .get_forecast(Parameters(GetForecastRequest {
                latitude: 38.58,
                longitude: -121.49,
            }))
            .await
            .unwrap();
        assert!(text_of(&result).contains("Period 1:"));
    }

    #[tokio::test]
    async fn broken_forecast_becomes_protocol_error() {
        let weather = service(forecast_stub(vec![json!({ "name": "Tonight" })]));

        let err = weather
            .get_forecast(Parameters(GetForecastRequest {
                latitude: 38.58,
                longitude: -121.49,
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("malformed forecast period"));
    }
}
