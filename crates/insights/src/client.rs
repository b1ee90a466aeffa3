//! HTTP implementation of the insights boundary against an OpenAI-compatible
//! chat-completions endpoint.

use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::types::{InsightsReport, InsightsRequest};
use crate::InsightsGenerator;
use async_trait::async_trait;
use mixboard_core::config::InsightsConfig;
use mixboard_core::{MixResult, MixboardError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Shown to the user whenever the collaborator fails, whatever the cause.
const GENERIC_FAILURE: &str = "insight generation failed, please try again";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

pub struct HttpInsightsClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpInsightsClient {
    pub fn new(config: &InsightsConfig) -> MixResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MixboardError::Config(format!("insights HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn generic_failure() -> MixboardError {
        MixboardError::Insights(GENERIC_FAILURE.to_string())
    }
}

/// Parse the model's JSON message body into a structured report.
fn parse_report(content: &str) -> MixResult<InsightsReport> {
    serde_json::from_str(content).map_err(|e| {
        error!(error = %e, "Insights response body was not a valid report");
        HttpInsightsClient::generic_failure()
    })
}

#[async_trait]
impl InsightsGenerator for HttpInsightsClient {
    async fn generate(&self, request: &InsightsRequest) -> MixResult<InsightsReport> {
        let prompt = user_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let mut req = self
            .http
            .post(format!("{}/chat/completions", self.endpoint))
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            error!(error = %e, "Insights request failed to send");
            Self::generic_failure()
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Insights endpoint returned an error");
            return Err(Self::generic_failure());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Insights response was not valid chat JSON");
            Self::generic_failure()
        })?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                error!("Insights response contained no choices");
                Self::generic_failure()
            })?;

        let report = parse_report(content)?;
        info!(
            recommendations = report.recommendations.len(),
            "Insights report generated"
        );
        Ok(report)
    }
}
