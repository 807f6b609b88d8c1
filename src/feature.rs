use std::collections::BTreeSet;

use geo::Geometry;
use regex::Regex;
use serde_json::{Map, Value};

/// Election year, as it appears in property suffixes like `redness_2024`.
pub type Year = u16;

/// A single precinct: parsed geometry plus its raw property map.
///
/// Properties come straight off the source rows, so values are usually
/// strings; numeric access parses on demand and treats missing, empty, or
/// unparsable values as absent. Features are never mutated after load.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    pub properties: Map<String, Value>,
}

impl Feature {
    /// The district grouping key. Missing or non-string values group under "".
    pub fn district_name(&self) -> String {
        self.string("district_name")
    }

    /// Precinct identifier, for popups and diagnostics.
    pub fn precinct(&self) -> String {
        self.string("precinct")
    }

    /// String property access; numbers are stringified, anything else is "".
    pub fn string(&self, key: &str) -> String {
        match self.properties.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Numeric property access: accepts JSON numbers or numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        parse_number(self.properties.get(key)?)
    }

    pub fn redness(&self, year: Year) -> Option<f64> {
        self.number(&format!("redness_{year}"))
    }

    pub fn ballots(&self, year: Year) -> Option<f64> {
        self.number(&format!("ballots_{year}"))
    }

    pub fn voters(&self, year: Year) -> Option<f64> {
        self.number(&format!("voters_{year}"))
    }
}

/// Parse a property value as a float. NaN counts as absent so that nothing
/// downstream ever has to classify it.
fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { s.parse::<f64>().ok() }
        }
        _ => None,
    };
    parsed.filter(|v| !v.is_nan())
}

/// Owns all features from one dataset load. Rebuilt from scratch on every
/// load; districts and statistics borrow from it and never outlive it.
#[derive(Debug, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Feature at `index`. Indices come from this store's own iteration
    /// order, so out-of-range access is a caller bug.
    #[inline] pub fn get(&self, index: usize) -> &Feature { &self.features[index] }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Years present in the data, discovered from `redness_<year>` property
    /// keys across all features. Sorted ascending, deduplicated.
    pub fn years(&self) -> Vec<Year> {
        let pattern = Regex::new(r"^redness_(\d+)$").expect("static pattern");
        let mut years = BTreeSet::new();
        for feature in &self.features {
            for key in feature.properties.keys() {
                if let Some(caps) = pattern.captures(key) {
                    if let Ok(year) = caps[1].parse::<Year>() {
                        years.insert(year);
                    }
                }
            }
        }
        years.into_iter().collect()
    }
}
