//! Itinerary drafting through the Gemini `generateContent` API.
//!
//! The model is asked for a JSON document matching [`TravelPlan`]; the reply is
//! decoded as-is and enrichment happens later against the places provider.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::models::plan::TravelPlan;
use crate::models::trip_request::TripRequest;
use crate::services::prompt_service::{PromptError, PromptRenderer};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Failed to decode plan: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

// The request URL carries the API key as `?key=`, so it never reaches the message.
impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.without_url())
    }
}

impl LlmError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited(_))
    }
}

/// Anything that can turn a trip request into a draft plan.
pub trait PlanGenerator {
    async fn generate(&self, request: &TripRequest) -> Result<TravelPlan, LlmError>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
    prompts: PromptRenderer,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            prompts: PromptRenderer::new()?,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl PlanGenerator for GeminiClient {
    async fn generate(&self, request: &TripRequest) -> Result<TravelPlan, LlmError> {
        let prompt = self.prompts.render(request)?;
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        log::debug!("Requesting itinerary from model {}", self.model);
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, message));
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = first_candidate_text(&reply)?;
        parse_plan(&text)
    }
}

fn classify_failure(status: StatusCode, message: String) -> LlmError {
    if status == StatusCode::TOO_MANY_REQUESTS
        || message.contains("RESOURCE_EXHAUSTED")
        || message.contains("Resource exhausted")
    {
        LlmError::RateLimited(message)
    } else {
        LlmError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn first_candidate_text(reply: &GenerateContentResponse) -> Result<String, LlmError> {
    let candidate = reply
        .candidates
        .first()
        .ok_or_else(|| LlmError::InvalidResponse("model returned no candidates".to_string()))?;

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::InvalidResponse(format!(
            "model returned an empty answer (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(text)
}

/// Decodes the model's JSON answer, tolerating a surrounding ```json fence.
pub fn parse_plan(text: &str) -> Result<TravelPlan, LlmError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(unfenced.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::fixtures::travel_plan;

    #[test]
    fn test_parse_plain_and_fenced_json() {
        let raw = serde_json::to_string(&travel_plan()).unwrap();
        assert_eq!(parse_plan(&raw).unwrap(), travel_plan());

        let fenced = format!("```json\n{}\n```", raw);
        assert_eq!(parse_plan(&fenced).unwrap(), travel_plan());
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_plan("Here is your trip!").unwrap_err();
        assert!(matches!(err, LlmError::Json(_)));
    }

    #[test]
    fn test_classify_rate_limits() {
        assert!(classify_failure(StatusCode::TOO_MANY_REQUESTS, String::new()).is_rate_limit());
        assert!(classify_failure(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#.to_string()
        )
        .is_rate_limit());
        assert!(!classify_failure(StatusCode::BAD_REQUEST, "bad key".to_string()).is_rate_limit());
    }

    #[test]
    fn test_empty_candidates() {
        let reply: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            first_candidate_text(&reply),
            Err(LlmError::InvalidResponse(_))
        ));

        let reply: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        let err = first_candidate_text(&reply).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[actix_rt::test]
    async fn test_network_error_hides_api_key() {
        let client =
            GeminiClient::new("SECRET-GEMINI-KEY", "gemini-2.0-flash", "http://127.0.0.1:1")
                .unwrap();
        let request = crate::models::trip_request::fixtures::trip_request();

        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
        assert!(!err.to_string().contains("SECRET-GEMINI-KEY"));

        let api_error = crate::error::ApiError::from(err);
        assert!(!api_error.to_string().contains("SECRET-GEMINI-KEY"));
    }

    #[test]
    fn test_joins_text_parts() {
        let reply: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();
        assert_eq!(first_candidate_text(&reply).unwrap(), "{\"a\":1}");
    }
}
