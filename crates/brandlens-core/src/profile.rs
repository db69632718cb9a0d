//! Structured brand profile and the gap-fill merge rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de::{lenient_history, lenient_year, null_as_default};

/// How the brand's products are made. Korean tags (`자체생산`, `혼합`) and
/// lowercase spellings are read as the matching variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManufacturingType {
    #[serde(rename = "in-house", alias = "자체생산", alias = "in house", alias = "In-house")]
    InHouse,
    #[serde(rename = "OEM", alias = "oem")]
    Oem,
    #[serde(rename = "ODM", alias = "odm")]
    Odm,
    #[serde(rename = "mixed", alias = "혼합", alias = "Mixed")]
    Mixed,
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

/// One dated milestone. Entries without a usable year are dropped while
/// decoding a profile's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEvent {
    pub year: i32,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_company: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub founded_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_overview: String,
    #[serde(default)]
    pub brand_concept: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_export_countries: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub awards: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default)]
    pub manufacturing_country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homepage: String,
    #[serde(default)]
    pub manufacturing_type: Option<ManufacturingType>,
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Vec<HistoryEvent>,
}

/// Optional profile fields eligible for gap-filling, in the order they are
/// checked and requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FoundedYear,
    BrandConcept,
    MainExportCountries,
    Awards,
    Certifications,
    ManufacturingCountry,
    ManufacturingType,
    History,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::FoundedYear,
        ProfileField::BrandConcept,
        ProfileField::MainExportCountries,
        ProfileField::Awards,
        ProfileField::Certifications,
        ProfileField::ManufacturingCountry,
        ProfileField::ManufacturingType,
        ProfileField::History,
    ];

    /// The JSON key of this field in a serialized [`BrandProfile`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileField::FoundedYear => "foundedYear",
            ProfileField::BrandConcept => "brandConcept",
            ProfileField::MainExportCountries => "mainExportCountries",
            ProfileField::Awards => "awards",
            ProfileField::Certifications => "certifications",
            ProfileField::ManufacturingCountry => "manufacturingCountry",
            ProfileField::ManufacturingType => "manufacturingType",
            ProfileField::History => "history",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`BrandProfile::merge_gap_fill`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapFillReport {
    /// Fields overwritten from the gap-fill object.
    pub applied: Vec<ProfileField>,
    /// Fields present in the gap-fill object whose value had the wrong shape.
    pub rejected: Vec<(ProfileField, String)>,
}

impl BrandProfile {
    /// Whether `field` is unset: `None`, or a zero-length list.
    #[must_use]
    pub fn is_field_empty(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::FoundedYear => self.founded_year.is_none(),
            ProfileField::BrandConcept => self.brand_concept.is_none(),
            ProfileField::MainExportCountries => self.main_export_countries.is_empty(),
            ProfileField::Awards => self.awards.is_empty(),
            ProfileField::Certifications => self.certifications.is_empty(),
            ProfileField::ManufacturingCountry => self.manufacturing_country.is_none(),
            ProfileField::ManufacturingType => self.manufacturing_type.is_none(),
            ProfileField::History => self.history.is_empty(),
        }
    }

    /// Empty gap-fillable fields, in [`ProfileField::ALL`] order.
    #[must_use]
    pub fn empty_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.is_field_empty(*field))
            .collect()
    }

    /// Overwrites fields with the values of a partial gap-fill object.
    ///
    /// Only keys naming a [`ProfileField`] are considered. A present key fully
    /// replaces the current value (including with `null`); absent keys leave
    /// the field untouched. Values of the wrong shape are reported in
    /// [`GapFillReport::rejected`] and the field is kept as is.
    pub fn merge_gap_fill(&mut self, patch: &Map<String, Value>) -> GapFillReport {
        let mut report = GapFillReport::default();

        for field in ProfileField::ALL {
            let Some(value) = patch.get(field.as_str()) else {
                continue;
            };
            match self.apply_field(field, value.clone()) {
                Ok(()) => report.applied.push(field),
                Err(e) => report.rejected.push((field, e.to_string())),
            }
        }

        if report.applied.contains(&ProfileField::History) {
            self.sort_history();
        }

        report
    }

    /// Orders history events chronologically; events in the same year keep
    /// their relative order.
    pub fn sort_history(&mut self) {
        self.history.sort_by_key(|event| event.year);
    }

    fn apply_field(&mut self, field: ProfileField, value: Value) -> Result<(), serde_json::Error> {
        match field {
            ProfileField::FoundedYear => self.founded_year = lenient_year(value)?,
            ProfileField::BrandConcept => self.brand_concept = serde_json::from_value(value)?,
            ProfileField::MainExportCountries => {
                self.main_export_countries = null_as_default(value)?;
            }
            ProfileField::Awards => self.awards = null_as_default(value)?,
            ProfileField::Certifications => self.certifications = null_as_default(value)?,
            ProfileField::ManufacturingCountry => {
                self.manufacturing_country = serde_json::from_value(value)?;
            }
            ProfileField::ManufacturingType => {
                self.manufacturing_type = serde_json::from_value(value)?;
            }
            ProfileField::History => self.history = lenient_history(value)?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
