//! Multi-phase brand profile pipeline.
//!
//! Phases run strictly in order, each continuing the previous interaction:
//!
//! 1. resolve the official homepage (skipped when one is supplied)
//! 2. discover brand-information pages under the homepage's domain
//! 3. extract the [`BrandProfile`] from those pages with URL context
//! 4. back-fill empty optional fields with a follow-up search
//!
//! Phases 2 and 4 degrade on unparseable responses: URL discovery falls back
//! to the homepage alone and gap-filling keeps the profile as extracted.
//! Phase 1 and 3 failures abort the run.

use std::collections::HashSet;
use std::sync::LazyLock;

use brandlens_core::{AnalyzeResponse, BrandProfile, InteractionId};
use brandlens_gemini::{GeminiClient, Grounding, InteractionRequest};
use regex::Regex;
use serde_json::Value;

use crate::error::ResearchError;
use crate::normalize::{decode_json, normalize_json};
use crate::prompts;

/// Upper bound on URLs handed to profile extraction, to keep the URL-context
/// grounding payload small.
pub const MAX_ANALYZE_URLS: usize = 10;

/// How many discovered URLs are echoed to the log.
const LOGGED_URLS: usize = 5;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>`]+"#).expect("valid regex"));

/// Input to [`analyze_brand`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub brand_name: String,
    /// Known homepage; `None` triggers homepage discovery.
    pub homepage: Option<String>,
    /// Interaction to continue, e.g. the id printed by a previous search.
    pub previous_interaction_id: Option<InteractionId>,
    pub temperature: Option<f32>,
}

impl AnalyzeRequest {
    #[must_use]
    pub fn new(brand_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            ..Self::default()
        }
    }

    /// Sets the homepage. Blank values mean "discover it".
    #[must_use]
    pub fn with_homepage(mut self, homepage: Option<String>) -> Self {
        self.homepage = homepage
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        self
    }

    #[must_use]
    pub fn continuing(mut self, previous: Option<InteractionId>) -> Self {
        self.previous_interaction_id = previous;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// One analysis run's view of the conversation: the client, sampling
/// settings and the latest interaction id.
struct Dialogue<'a> {
    client: &'a GeminiClient,
    temperature: Option<f32>,
    current: Option<InteractionId>,
}

impl Dialogue<'_> {
    /// Sends one turn continuing the current interaction and advances the
    /// interaction id. A response without an id keeps the previous one.
    async fn turn(
        &mut self,
        input: String,
        system_instruction: &str,
        grounding: Grounding,
    ) -> Result<String, ResearchError> {
        let result = {
            let request = InteractionRequest::new(input, system_instruction, grounding)
                .continuing(self.current.as_ref())
                .with_temperature(self.temperature);
            self.client.interact(&request).await?
        };

        if let Some(id) = result.interaction_id {
            self.current = Some(id);
        }
        Ok(result.text)
    }
}

/// Runs the full profile pipeline for one brand.
///
/// # Errors
///
/// - [`ResearchError::Gateway`] if any API call fails, in any phase.
/// - [`ResearchError::HomepageNotFound`] if homepage discovery yields no URL.
/// - [`ResearchError::Normalize`] / [`ResearchError::Deserialize`] if the
///   profile extraction response cannot be parsed.
pub async fn analyze_brand(
    client: &GeminiClient,
    request: &AnalyzeRequest,
) -> Result<AnalyzeResponse, ResearchError> {
    let brand = request.brand_name.as_str();
    let mut dialogue = Dialogue {
        client,
        temperature: request.temperature,
        current: request.previous_interaction_id.clone(),
    };

    tracing::info!(
        brand,
        model = client.model(),
        previous_interaction_id = request.previous_interaction_id.as_ref().map(InteractionId::as_str),
        "starting brand analysis"
    );

    let homepage = match request.homepage.as_deref() {
        Some(url) => url.to_owned(),
        None => resolve_homepage(&mut dialogue, brand).await?,
    };

    let urls = discover_site_urls(&mut dialogue, &homepage).await?;
    let mut profile = extract_profile(&mut dialogue, brand, &urls).await?;
    fill_gaps(&mut dialogue, brand, &mut profile).await?;

    tracing::info!(
        brand = %profile.brand_name,
        country = %profile.country,
        interaction_id = dialogue.current.as_ref().map(InteractionId::as_str),
        "analysis complete"
    );

    Ok(AnalyzeResponse {
        result: profile,
        interaction_id: dialogue.current,
    })
}

async fn resolve_homepage(dialogue: &mut Dialogue<'_>, brand: &str) -> Result<String, ResearchError> {
    tracing::info!(brand, "phase 1: searching for official homepage");

    let text = dialogue
        .turn(
            prompts::homepage_input(brand),
            prompts::FIND_HOMEPAGE,
            Grounding::GoogleSearch,
        )
        .await?;

    let homepage = find_homepage_url(&text).ok_or_else(|| ResearchError::HomepageNotFound {
        brand: brand.to_string(),
    })?;
    tracing::info!(brand, homepage = %homepage, "phase 1: homepage found");
    Ok(homepage)
}

async fn discover_site_urls(
    dialogue: &mut Dialogue<'_>,
    homepage: &str,
) -> Result<Vec<String>, ResearchError> {
    let domain = extract_domain(homepage);
    tracing::info!(domain = %domain, "phase 2: discovering site URLs");

    let text = dialogue
        .turn(
            prompts::discover_input(&domain),
            prompts::DISCOVER_URLS,
            Grounding::GoogleSearch,
        )
        .await?;

    let discovered = match normalize_json(&text) {
        Ok(value) => match value.get("urls").and_then(Value::as_array) {
            Some(urls) => urls
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            None => {
                tracing::warn!(domain = %domain, "phase 2: response has no urls list; analysing homepage only");
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!(domain = %domain, error = %e, "phase 2: URL parsing failed; analysing homepage only");
            Vec::new()
        }
    };

    let mut urls = build_url_set(homepage, &discovered);
    tracing::info!(count = urls.len(), "phase 2: URLs to analyse");
    for url in urls.iter().take(LOGGED_URLS) {
        tracing::info!(url = %url, "phase 2: candidate");
    }
    if urls.len() > LOGGED_URLS {
        tracing::info!(more = urls.len() - LOGGED_URLS, "phase 2: further candidates not shown");
    }

    urls.truncate(MAX_ANALYZE_URLS);
    Ok(urls)
}

async fn extract_profile(
    dialogue: &mut Dialogue<'_>,
    brand: &str,
    urls: &[String],
) -> Result<BrandProfile, ResearchError> {
    tracing::info!(brand, urls = urls.len(), "phase 3: analysing pages with URL context");

    let text = dialogue
        .turn(
            prompts::analyze_input(brand, urls),
            prompts::BRAND_ANALYZE,
            Grounding::UrlContext,
        )
        .await?;

    let mut profile: BrandProfile = decode_json(&text, "brand profile")?;
    profile.sort_history();
    tracing::info!(brand, "phase 3: initial profile extracted");
    Ok(profile)
}

async fn fill_gaps(
    dialogue: &mut Dialogue<'_>,
    brand: &str,
    profile: &mut BrandProfile,
) -> Result<(), ResearchError> {
    let empty_fields = profile.empty_fields();
    if empty_fields.is_empty() {
        tracing::info!(brand, "phase 4: no empty fields; skipping gap-fill");
        return Ok(());
    }

    let names: Vec<&str> = empty_fields.iter().map(|f| f.as_str()).collect();
    tracing::info!(brand, fields = %names.join(", "), "phase 4: filling empty fields");

    let text = dialogue
        .turn(
            prompts::fill_gaps_input(brand, &empty_fields),
            prompts::FILL_GAPS,
            Grounding::GoogleSearch,
        )
        .await?;

    match normalize_json(&text) {
        Ok(Value::Object(patch)) => {
            let report = profile.merge_gap_fill(&patch);
            for (field, reason) in &report.rejected {
                tracing::warn!(field = %field, reason = %reason, "phase 4: ignoring malformed value");
            }
            tracing::info!(applied = report.applied.len(), "phase 4: gap-fill merged");
        }
        Ok(_) => tracing::warn!("phase 4: gap-fill response is not an object; keeping profile"),
        Err(e) => tracing::warn!(error = %e, "phase 4: gap-fill parsing failed; keeping profile"),
    }

    Ok(())
}

/// Returns the host of `url`, or `url` itself when it does not parse.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// First absolute http(s) URL in `text`, with trailing punctuation and
/// markdown residue removed.
fn find_homepage_url(text: &str) -> Option<String> {
    URL_RE.find_iter(text).find_map(|m| {
        let candidate = m
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '}', '*', '_']);
        reqwest::Url::parse(candidate)
            .ok()
            .filter(|u| u.host_str().is_some_and(|h| !h.is_empty()))
            .map(|_| candidate.to_owned())
    })
}

/// The homepage followed by the discovered URLs, de-duplicated in first-seen
/// order so the homepage appears exactly once.
fn build_url_set(homepage: &str, discovered: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(homepage)
        .chain(discovered.iter().map(String::as_str))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert((*url).to_owned()))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_domain_returns_host() {
        assert_eq!(
            extract_domain("https://brand.example.com/path"),
            "brand.example.com"
        );
    }

    #[test]
    fn extract_domain_falls_back_to_input() {
        assert_eq!(extract_domain("not a url"), "not a url");
    }

    #[test]
    fn find_homepage_url_takes_first_url() {
        let text = "The official site is https://www.sulwhasoo.com. Also see https://other.example";
        assert_eq!(
            find_homepage_url(text).as_deref(),
            Some("https://www.sulwhasoo.com")
        );
    }

    #[test]
    fn find_homepage_url_strips_markdown_link_residue() {
        let text = "[Sulwhasoo](https://www.sulwhasoo.com/kr/ko/)";
        assert_eq!(
            find_homepage_url(text).as_deref(),
            Some("https://www.sulwhasoo.com/kr/ko/")
        );
    }

    #[test]
    fn find_homepage_url_none_for_null_answer() {
        assert_eq!(find_homepage_url("null"), None);
        assert_eq!(find_homepage_url("I could not find an official site."), None);
    }

    #[test]
    fn url_set_includes_homepage_exactly_once() {
        let homepage = "https://a.example";
        let discovered = vec![
            "https://a.example/about".to_string(),
            "https://a.example".to_string(),
            "https://a.example/about".to_string(),
            "https://a.example/history".to_string(),
        ];

        let urls = build_url_set(homepage, &discovered);

        assert_eq!(
            urls,
            vec![
                "https://a.example".to_string(),
                "https://a.example/about".to_string(),
                "https://a.example/history".to_string(),
            ]
        );
        assert_eq!(urls.iter().filter(|u| *u == homepage).count(), 1);
    }

    #[test]
    fn url_set_with_nothing_discovered_is_homepage_only() {
        assert_eq!(
            build_url_set("https://a.example", &[]),
            vec!["https://a.example".to_string()]
        );
    }

    #[test]
    fn analyze_request_blank_homepage_means_discover() {
        let request = AnalyzeRequest::new("Sulwhasoo").with_homepage(Some("  ".to_string()));
        assert!(request.homepage.is_none());

        let request = AnalyzeRequest::new("Sulwhasoo")
            .with_homepage(Some("https://www.sulwhasoo.com".to_string()));
        assert_eq!(request.homepage.as_deref(), Some("https://www.sulwhasoo.com"));
    }
}
