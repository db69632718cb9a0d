//! Lenient deserializers for loosely-typed model output.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::profile::HistoryEvent;

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `1997`, `1997.0`, `"1997"` or `"1997년"`. Any other shape,
/// including prose like `"c. 1990"`, becomes `None`.
pub(crate) fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(year_from_value(&raw))
}

fn year_from_value(raw: &Value) -> Option<i32> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            let f = n.as_f64()?;
            if f.fract() != 0.0 || f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
                return None;
            }
            #[allow(clippy::cast_possible_truncation)]
            let year = f as i32;
            Some(year)
        }
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

#[derive(Deserialize)]
struct RawHistoryEvent {
    #[serde(default)]
    year: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    event: String,
}

/// Reads a history list, dropping entries without a usable year instead of
/// failing the whole profile. `null` reads as an empty list.
pub(crate) fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<HistoryEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawHistoryEvent>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|entry| match year_from_value(&entry.year) {
            Some(year) => Some(HistoryEvent {
                year,
                event: entry.event,
            }),
            None => {
                tracing::warn!(year = %entry.year, event = %entry.event, "dropping history event without a usable year");
                None
            }
        })
        .collect())
}
