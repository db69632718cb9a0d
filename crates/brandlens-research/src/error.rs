use brandlens_gemini::GeminiError;
use thiserror::Error;

use crate::normalize::NormalizeError;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error(transparent)]
    Gateway(#[from] GeminiError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("official homepage not found for brand '{brand}'")]
    HomepageNotFound { brand: String },

    #[error("unexpected {context} shape: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
