//! Request and response shapes for `POST /interactions`.

use brandlens_core::InteractionId;
use serde::{Deserialize, Serialize};

/// External source the model may consult before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grounding {
    GoogleSearch,
    UrlContext,
}

/// One phase-specific call to the model.
#[derive(Debug, Clone)]
pub struct InteractionRequest<'a> {
    pub input: String,
    pub system_instruction: &'a str,
    pub grounding: Grounding,
    pub previous_interaction_id: Option<&'a InteractionId>,
    pub temperature: Option<f32>,
}

impl<'a> InteractionRequest<'a> {
    /// Starts a fresh dialogue with default sampling.
    #[must_use]
    pub fn new(input: impl Into<String>, system_instruction: &'a str, grounding: Grounding) -> Self {
        Self {
            input: input.into(),
            system_instruction,
            grounding,
            previous_interaction_id: None,
            temperature: None,
        }
    }

    /// Continues the dialogue identified by `previous`, if any.
    #[must_use]
    pub fn continuing(mut self, previous: Option<&'a InteractionId>) -> Self {
        self.previous_interaction_id = previous;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// First text output of an interaction plus its continuation token.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionResult {
    pub text: String,
    pub interaction_id: Option<InteractionId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateInteractionBody<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub system_instruction: &'a str,
    pub tools: [Tool; 1],
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_interaction_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl<'a> CreateInteractionBody<'a> {
    pub(crate) fn new(model: &'a str, request: &'a InteractionRequest<'_>) -> Self {
        Self {
            model,
            input: &request.input,
            system_instruction: request.system_instruction,
            tools: [Tool {
                kind: request.grounding,
            }],
            stream: false,
            previous_interaction_id: request.previous_interaction_id.map(InteractionId::as_str),
            generation_config: request
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Tool {
    #[serde(rename = "type")]
    pub kind: Grounding,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InteractionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub outputs: Option<Vec<InteractionOutput>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InteractionOutput {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}
