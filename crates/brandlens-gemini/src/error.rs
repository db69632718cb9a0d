use thiserror::Error;

/// Errors returned by the Gemini Interactions client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response carried no output of type `text`.
    #[error("No text output from Gemini")]
    NoTextOutput,

    #[error("invalid Gemini base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
