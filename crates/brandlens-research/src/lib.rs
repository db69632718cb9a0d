//! Brand research pipelines on top of the Gemini Interactions API.
//!
//! [`search_brands`] runs a single grounded search for related brands and
//! companies. [`analyze_brand`] runs the multi-phase profile pipeline:
//! resolve homepage, discover site URLs, extract the profile from those
//! pages, then back-fill empty optional fields with a follow-up search. One
//! interaction id is threaded through every call so each phase shares the
//! dialogue's context.

pub mod analyze;
pub mod error;
pub mod normalize;
pub mod prompts;
pub mod search;

pub use analyze::{analyze_brand, extract_domain, AnalyzeRequest, MAX_ANALYZE_URLS};
pub use error::ResearchError;
pub use normalize::{normalize_json, NormalizeError};
pub use search::search_brands;
