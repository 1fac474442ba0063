use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::listing::Filterable;

// ---------------------------------------------------------------------------
// CountryName
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryName {
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub official: String,
    pub native_name: Option<BTreeMap<String, NativeName>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

// ---------------------------------------------------------------------------
// Country — One entry of the countries dataset
// ---------------------------------------------------------------------------

/// A country as served by the countries API.
///
/// `currencies` is kept as raw JSON: entries whose currency mapping is absent
/// or not an object are excluded by the currency filter rather than failing
/// to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub languages: Map<String, Value>,
    pub currencies: Option<Value>,
    pub independent: Option<bool>,
    #[serde(default)]
    pub cca2: String,
    #[serde(default)]
    pub cca3: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flag: String,
    pub borders: Option<Vec<String>>,
    #[serde(default)]
    pub landlocked: bool,
}

const NOT_AVAILABLE: &str = "N/A";

impl Country {
    /// The first listed capital, or `"N/A"`.
    pub fn primary_capital(&self) -> &str {
        self.capital
            .first()
            .map(String::as_str)
            .unwrap_or(NOT_AVAILABLE)
    }

    /// The first listed language, or `"N/A"`.
    pub fn primary_language(&self) -> &str {
        self.languages
            .values()
            .next()
            .and_then(Value::as_str)
            .filter(|l| !l.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// First currency as `"CODE (symbol)"`, bare `"CODE"` without a symbol,
    /// or `"N/A"`.
    pub fn primary_currency(&self) -> String {
        let Some(Value::Object(map)) = &self.currencies else {
            return NOT_AVAILABLE.to_string();
        };
        let Some((code, details)) = map.iter().next() else {
            return NOT_AVAILABLE.to_string();
        };
        if code.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        match details.get("symbol").and_then(|s| s.as_str()) {
            Some(symbol) if !symbol.is_empty() => format!("{} ({})", code, symbol),
            _ => code.clone(),
        }
    }

    /// All currency codes joined with `", "`, or `"N/A"`.
    pub fn all_currencies(&self) -> String {
        match &self.currencies {
            Some(Value::Object(map)) if !map.is_empty() => {
                map.keys().cloned().collect::<Vec<_>>().join(", ")
            }
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

impl Filterable for Country {
    fn id(&self) -> &str {
        &self.cca3
    }

    fn flag(&self) -> bool {
        self.independent.unwrap_or(false)
    }

    fn category_keys(&self) -> Option<Vec<&str>> {
        match &self.currencies {
            Some(Value::Object(map)) => Some(map.keys().map(String::as_str).collect()),
            _ => None,
        }
    }
}
