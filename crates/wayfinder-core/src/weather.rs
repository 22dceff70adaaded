//! Weather context provider
//!
//! One HTTP GET against an OpenWeatherMap-compatible endpoint per lookup.
//! A non-success status becomes a [`WeatherOutcome::Failed`] record rather
//! than an error; the pipeline still composes an answer from it.

use crate::config::WeatherConfig;
use crate::error::{Result, WayfinderError};
use crate::llm::{ChatMessage, LlmClient};
use serde::{Deserialize, Serialize};

/// Normalized weather record for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
}

/// Result of a weather lookup
#[derive(Debug, Clone)]
pub enum WeatherOutcome {
    Report(WeatherReport),
    Failed { error: String },
}

impl std::fmt::Display for WeatherOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherOutcome::Report(r) => write!(
                f,
                "Weather in {}: {}°C, {}, humidity {}%",
                r.city, r.temperature, r.description, r.humidity
            ),
            WeatherOutcome::Failed { error } => write!(f, "{}", error),
        }
    }
}

/// Weather API client
pub struct WeatherProvider {
    http_client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherProvider {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(WayfinderError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Fetch current weather for a city, in metric units
    pub async fn fetch(&self, city: &str) -> Result<WeatherOutcome> {
        let url = format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric",
            self.config.base_url, city, self.config.api_key
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(WayfinderError::Http)?;

        if !response.status().is_success() {
            tracing::debug!(city, status = %response.status(), "weather lookup failed");
            return Ok(WeatherOutcome::Failed {
                error: format!("Failed to fetch weather for {}", city),
            });
        }

        let body = response.text().await.map_err(WayfinderError::Http)?;
        let report = parse_report(city, &body)?;

        Ok(WeatherOutcome::Report(report))
    }
}

/// Extract the four documented fields from a provider response body.
/// A missing field is a data-shape error, propagated to the caller.
fn parse_report(city: &str, body: &str) -> Result<WeatherReport> {
    #[derive(Deserialize)]
    struct Body {
        main: Main,
        weather: Vec<Condition>,
    }

    #[derive(Deserialize)]
    struct Main {
        temp: f64,
        humidity: u32,
    }

    #[derive(Deserialize)]
    struct Condition {
        description: String,
    }

    let parsed: Body = serde_json::from_str(body)?;
    let condition = parsed.weather.into_iter().next().ok_or_else(|| {
        WayfinderError::ExternalError(format!(
            "Weather response for {} carried no conditions",
            city
        ))
    })?;

    Ok(WeatherReport {
        city: city.to_string(),
        temperature: parsed.main.temp,
        description: condition.description,
        humidity: parsed.main.humidity,
    })
}

/// Pull a bare city name out of the original query with one LLM call
pub async fn extract_city(client: &dyn LlmClient, query: &str) -> Result<String> {
    let messages = vec![
        ChatMessage::system("Extract the city name from the query. Reply with only the city name."),
        ChatMessage::user(query),
    ];

    let answer = client.chat_completion(messages, 0.0).await?;
    Ok(answer.trim().to_string())
}
