//! HTTP client for the Gemini Interactions API.
//!
//! Wraps `reqwest` with API key handling, base URL normalisation and typed
//! error mapping. Each [`GeminiClient::interact`] call issues exactly one
//! request: there is no retry and no request timeout.

use brandlens_core::{AppConfig, InteractionId};
use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{CreateInteractionBody, InteractionRequest, InteractionResponse, InteractionResult};

const DEFAULT_BASE_URL: &str = brandlens_core::config::DEFAULT_GEMINI_BASE_URL;
const DEFAULT_USER_AGENT: &str = "brandlens/0.1 (brand-research)";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini Interactions API.
///
/// Constructed once at startup and passed by reference to every pipeline
/// phase. Use [`GeminiClient::from_config`] in the binary or
/// [`GeminiClient::with_base_url`] to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeminiError::InvalidBaseUrl`] if the configured base
    /// URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeminiError> {
        Self::build(
            &config.google_api_key,
            &config.gemini_model,
            &config.gemini_base_url,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeminiError::InvalidBaseUrl`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self, GeminiError> {
        Self::build(api_key, model, base_url, DEFAULT_USER_AGENT)
    }

    fn build(
        api_key: &str,
        model: &str,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint: interactions_endpoint(base_url)?,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one interaction and returns its first text output.
    ///
    /// When `request.previous_interaction_id` is set the service answers in
    /// the context of that earlier exchange; otherwise a new dialogue starts.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Api`] if the API answers with a non-2xx status.
    /// - [`GeminiError::Deserialize`] if the body is not an interaction object.
    /// - [`GeminiError::NoTextOutput`] if no output of type `text` is present.
    pub async fn interact(
        &self,
        request: &InteractionRequest<'_>,
    ) -> Result<InteractionResult, GeminiError> {
        let body = CreateInteractionBody::new(&self.model, request);

        tracing::debug!(
            model = %self.model,
            grounding = ?request.grounding,
            continuing = request.previous_interaction_id.is_some(),
            "creating interaction"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: InteractionResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        extract_text_and_id(parsed)
    }
}

/// Normalises `base_url` to end in exactly one slash and appends
/// `interactions`, so a versioned path like `/v1beta` is kept.
fn interactions_endpoint(base_url: &str) -> Result<Url, GeminiError> {
    let invalid = |reason: String| GeminiError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    base.join("interactions").map_err(|e| invalid(e.to_string()))
}

/// Picks the first non-empty `text` output; other output types are ignored.
fn extract_text_and_id(response: InteractionResponse) -> Result<InteractionResult, GeminiError> {
    let text = response
        .outputs
        .unwrap_or_default()
        .into_iter()
        .filter(|output| output.kind == "text")
        .find_map(|output| output.text.filter(|t| !t.is_empty()))
        .ok_or(GeminiError::NoTextOutput)?;

    Ok(InteractionResult {
        text,
        interaction_id: response.id.and_then(InteractionId::new),
    })
}

/// Pulls `error.message` out of a Google API error envelope, falling back to
/// the (truncated) raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
