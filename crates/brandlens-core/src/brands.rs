use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// How a brand relates to the searched term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrandRelationship {
    SearchTarget,
    SiblingBrand,
    CompetitorBrand,
    DistributionBrand,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for BrandRelationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrandRelationship::SearchTarget => write!(f, "search-target"),
            BrandRelationship::SiblingBrand => write!(f, "sibling-brand"),
            BrandRelationship::CompetitorBrand => write!(f, "competitor-brand"),
            BrandRelationship::DistributionBrand => write!(f, "distribution-brand"),
            BrandRelationship::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyRole {
    Owner,
    Manufacturer,
    Distributor,
    Importer,
    Headquarters,
    Subsidiary,
    #[default]
    #[serde(other)]
    Unknown,
}

/// How a company relates to the searched term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyRelationship {
    SearchTarget,
    Parent,
    Subsidiary,
    Manufacturer,
    Distributor,
    Competitor,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(default)]
    pub brand_name_ko: Option<String>,
    #[serde(default)]
    pub brand_name_en: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationship: BrandRelationship,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default)]
    pub company_name_ko: Option<String>,
    #[serde(default)]
    pub company_name_en: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: CompanyRole,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owned_brands: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationship: CompanyRelationship,
}

/// Brands and companies related to a search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandSearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brands: Vec<Brand>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub companies: Vec<Company>,
}

impl BrandSearchResult {
    /// Returns the brand the query itself resolved to, if the model tagged one.
    #[must_use]
    pub fn search_target(&self) -> Option<&Brand> {
        self.brands
            .iter()
            .find(|b| b.relationship == BrandRelationship::SearchTarget)
    }
}
