use crate::core::{config::SearchConfig, geo::LatLng};
use serde::{Deserialize, Serialize};

/// Result-type filter applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Poi,
    Address,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Poi => "poi",
            ResultType::Address => "address",
        }
    }
}

/// Whether the backend should resolve concrete results or only return
/// lightweight suggestions for autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Suggest,
    Search,
}

/// One search invocation. Built fresh each time and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    text: String,
    proximity: LatLng,
    limit: usize,
    types: Vec<ResultType>,
    languages: Vec<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, proximity: LatLng, config: &SearchConfig) -> Self {
        Self {
            text: text.into(),
            proximity,
            limit: config.limit,
            types: config.result_types.clone(),
            languages: vec![config.language.clone()],
        }
    }

    /// Same options, different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bias center results are ranked relative to
    pub fn proximity(&self) -> LatLng {
        self.proximity
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn types(&self) -> &[ResultType] {
        &self.types
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn primary_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub address: Option<String>,
    pub coordinate: Option<LatLng>,
    pub result_type: Option<ResultType>,
}

/// Candidate from a two-phase backend; selecting it resolves full results.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<&SearchResult> for Suggestion {
    fn from(result: &SearchResult) -> Self {
        Self {
            id: result.name.clone(),
            name: result.name.clone(),
            description: result.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_takes_options_from_config() {
        let config = SearchConfig {
            language: "ja".to_string(),
            ..SearchConfig::default()
        };
        let query = SearchQuery::new("coffee shop", LatLng::from_lng_lat(139.70, 35.66), &config);

        assert_eq!(query.text(), "coffee shop");
        assert_eq!(query.limit(), 5);
        assert_eq!(query.types(), &[ResultType::Poi, ResultType::Address]);
        assert_eq!(query.primary_language(), Some("ja"));
        assert_eq!(query.proximity().lng_lat(), (139.70, 35.66));
    }
}
