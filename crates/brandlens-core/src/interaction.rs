use serde::{Deserialize, Serialize};

use crate::brands::BrandSearchResult;
use crate::profile::BrandProfile;

/// Opaque conversation-continuation token assigned by the AI service.
///
/// Passed forward unchanged so a later request continues the same dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionId(String);

impl InteractionId {
    /// Wraps a service-issued id. Returns `None` for an empty or blank id,
    /// which the service treats as "no prior interaction".
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InteractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Printed result of a research command, paired with the last interaction id
/// so a later invocation can resume the dialogue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResponse<T> {
    pub result: T,
    pub interaction_id: Option<InteractionId>,
}

pub type SearchResponse = ResearchResponse<BrandSearchResult>;
pub type AnalyzeResponse = ResearchResponse<BrandProfile>;
