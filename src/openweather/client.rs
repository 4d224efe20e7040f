use reqwest::Client;
use std::time::Duration;

use crate::backfill::Window;
use crate::config::{Config, Coordinate};
use crate::error::{AppError, AppResult};
use crate::openweather::AirPollutionSource;
use crate::openweather::models::AirPollutionResponse;

pub struct AirPollutionClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    location: Coordinate,
}

impl AirPollutionClient {
    /// Every request is bounded by `http_timeout_seconds`; an expired request
    /// surfaces as a `Request failed` error and fails only its window.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AirPollutionApi` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| AppError::AirPollutionApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            location: config.location,
        })
    }

    /// Query parameters for one window. `appid` is omitted when no key is
    /// configured; the API then answers 401.
    #[must_use]
    pub fn history_query(&self, window: &Window) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lat", self.location.latitude.to_string()),
            ("lon", self.location.longitude.to_string()),
            ("start", window.start.timestamp().to_string()),
            ("end", window.end.timestamp().to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("appid", key.clone()));
        }
        query
    }

    /// Get the pollution history for the configured coordinate over one window.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AirPollutionApi` if the request fails, returns an error
    /// status, or the body is not a valid history response.
    pub async fn get_history(&self, window: &Window) -> AppResult<AirPollutionResponse> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&self.history_query(window))
            .send()
            .await
            .map_err(|e| AppError::AirPollutionApi(format!("Request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::AirPollutionApi("Rate limited (429)".to_string()));
        }

        if !response.status().is_success() {
            return Err(AppError::AirPollutionApi(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::AirPollutionApi(format!("Failed to get response text: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse air pollution history response"
            );
            AppError::AirPollutionApi(format!("Failed to parse response: {e}"))
        })
    }
}

impl AirPollutionSource for AirPollutionClient {
    async fn fetch_history(&self, window: &Window) -> AppResult<AirPollutionResponse> {
        self.get_history(window).await
    }
}
