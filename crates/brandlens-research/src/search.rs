use brandlens_core::{BrandSearchResult, SearchResponse};
use brandlens_gemini::{GeminiClient, Grounding, InteractionRequest};

use crate::error::ResearchError;
use crate::normalize::decode_json;
use crate::prompts;

/// Finds brands and companies related to `query` with one grounded search.
///
/// Always starts a fresh dialogue; the returned interaction id can seed a
/// later [`crate::analyze_brand`] run.
///
/// # Errors
///
/// - [`ResearchError::Gateway`] if the API call fails or returns no text.
/// - [`ResearchError::Normalize`] if the response holds no recoverable JSON.
/// - [`ResearchError::Deserialize`] if the JSON is not a brand/company list.
pub async fn search_brands(
    client: &GeminiClient,
    query: &str,
    temperature: Option<f32>,
) -> Result<SearchResponse, ResearchError> {
    tracing::info!(query, model = client.model(), "searching brands");

    let request = InteractionRequest::new(
        prompts::search_input(query),
        prompts::BRAND_SEARCH,
        Grounding::GoogleSearch,
    )
    .with_temperature(temperature);
    let response = client.interact(&request).await?;

    let result: BrandSearchResult = decode_json(&response.text, "brand search result")?;

    tracing::info!(
        brands = result.brands.len(),
        companies = result.companies.len(),
        search_target = result.search_target().map(|b| b.brand_name.as_str()),
        "search complete"
    );
    for brand in &result.brands {
        tracing::debug!(brand = %brand.brand_name, relationship = %brand.relationship, "brand found");
    }
    if let Some(id) = &response.interaction_id {
        tracing::info!(interaction_id = %id, "interaction recorded");
    }

    Ok(SearchResponse {
        result,
        interaction_id: response.interaction_id,
    })
}
