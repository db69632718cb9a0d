//! Client for the Gemini Interactions API.
//!
//! One call per [`GeminiClient::interact`]: the request names a grounding tool
//! (Google Search or URL context) and optionally continues a previous
//! interaction. The first text output and the service-assigned interaction id
//! are returned; every other output type is ignored.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{Grounding, InteractionRequest, InteractionResult};
