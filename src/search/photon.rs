//! [Photon](https://photon.komoot.io) geocoder.
//!
//! Requests run on the async runtime from [`crate::runtime`]; each answer is
//! sent back over a channel as a [`SearchCompletion`] for the screen to pick
//! up on its own thread.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    core::constants,
    prelude::HashMap,
    runtime::{self, AsyncHandle},
    search::{
        backend::{SearchBackend, SearchCompletion, SearchResponse},
        query::{QueryMode, ResultType, SearchQuery, SearchResult, Suggestion},
        token::RequestId,
    },
    Error, LatLng, Result,
};

/// Languages Photon accepts for `lang`; anything else falls back to local names.
const SUPPORTED_LANGUAGES: &[&str] = &["default", "en", "de", "fr"];

/// OSM keys reported as points of interest.
const POI_KEYS: &[&str] = &[
    "amenity", "shop", "tourism", "leisure", "craft", "office", "historic",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("placemap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

pub struct PhotonBackend {
    endpoint: String,
    sender: Sender<SearchCompletion>,
    in_flight: HashMap<RequestId, Box<dyn AsyncHandle>>,
    last_query: Option<SearchQuery>,
}

impl PhotonBackend {
    /// Creates a backend and the receiver its completions arrive on.
    pub fn new(endpoint: impl Into<String>) -> (Self, Receiver<SearchCompletion>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let backend = Self {
            endpoint: endpoint.into(),
            sender,
            in_flight: HashMap::default(),
            last_query: None,
        };
        (backend, receiver)
    }

    pub fn with_default_endpoint() -> (Self, Receiver<SearchCompletion>) {
        Self::new(constants::DEFAULT_PHOTON_ENDPOINT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.values().filter(|h| !h.is_finished()).count()
    }

    fn dispatch(&mut self, request: RequestId, query: SearchQuery, mode: QueryMode) -> Result<()> {
        self.in_flight.retain(|_, handle| !handle.is_finished());

        let endpoint = self.endpoint.clone();
        let sender = self.sender.clone();
        let handle = runtime::spawn(async move {
            let response = match fetch(&endpoint, &query).await {
                Ok(results) => into_response(results, mode),
                Err(e) => {
                    log::warn!("photon request {} failed: {}", request, e);
                    SearchResponse::Failed(e.to_string())
                }
            };
            if sender.send(SearchCompletion::new(request, response)).is_err() {
                log::debug!("completion receiver dropped, discarding {}", request);
            }
        })?;
        self.in_flight.insert(request, handle);
        Ok(())
    }
}

impl SearchBackend for PhotonBackend {
    fn search(&mut self, request: RequestId, query: &SearchQuery, mode: QueryMode) -> Result<()> {
        if !query.proximity().is_valid() {
            return Err(Error::InvalidCoordinates(query.proximity().to_string()));
        }
        log::debug!("photon {:?} {} for {:?}", mode, request, query.text());
        self.dispatch(request, query.clone(), mode)?;
        self.last_query = Some(query.clone());
        Ok(())
    }

    /// Photon has no suggestion ids, so a suggestion resolves by searching
    /// its name again with the last query's options.
    fn select(&mut self, request: RequestId, suggestion: &Suggestion) -> Result<()> {
        let base = self
            .last_query
            .as_ref()
            .ok_or_else(|| Error::InvalidState("select without a prior search".into()))?;
        let query = base.with_text(suggestion.name.clone());
        self.dispatch(request, query, QueryMode::Search)
    }

    fn cancel(&mut self, request: RequestId) {
        if let Some(handle) = self.in_flight.remove(&request) {
            handle.cancel();
        }
    }
}

async fn fetch(endpoint: &str, query: &SearchQuery) -> Result<Vec<SearchResult>> {
    let (lng, lat) = query.proximity().lng_lat();
    let mut params = vec![
        ("q", query.text().to_string()),
        ("lat", lat.to_string()),
        ("lon", lng.to_string()),
        // over-fetch, type filtering happens locally
        ("limit", (query.limit() * 2).to_string()),
    ];
    if let Some(lang) = query
        .primary_language()
        .filter(|lang| SUPPORTED_LANGUAGES.contains(lang))
    {
        params.push(("lang", lang.to_string()));
    }

    let response = HTTP_CLIENT
        .get(endpoint)
        .query(&params)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(Error::Backend(format!(
            "photon returned status {}",
            response.status()
        )));
    }

    let body = response.text().await?;
    parse_results(&body, query)
}

fn into_response(results: Vec<SearchResult>, mode: QueryMode) -> SearchResponse {
    match mode {
        QueryMode::Search => SearchResponse::Results(results),
        QueryMode::Suggest => {
            SearchResponse::Suggestions(results.iter().map(Suggestion::from).collect())
        }
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

#[derive(Default, Deserialize)]
struct Properties {
    name: Option<String>,
    street: Option<String>,
    housenumber: Option<String>,
    city: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
    osm_key: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl Properties {
    fn result_type(&self) -> Option<ResultType> {
        if self.housenumber.is_some() || self.kind.as_deref() == Some("house") {
            return Some(ResultType::Address);
        }
        match self.osm_key.as_deref() {
            Some(key) if POI_KEYS.contains(&key) => Some(ResultType::Poi),
            _ => None,
        }
    }

    fn address(&self) -> Option<String> {
        let street = match (&self.street, &self.housenumber) {
            (Some(street), Some(number)) => Some(format!("{} {}", street, number)),
            (Some(street), None) => Some(street.clone()),
            _ => None,
        };
        let parts: Vec<String> = [street, self.postcode.clone(), self.city.clone(), self.country.clone()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Parses a Photon GeoJSON body, keeping only the query's result types.
fn parse_results(body: &str, query: &SearchQuery) -> Result<Vec<SearchResult>> {
    let collection: FeatureCollection = serde_json::from_str(body)?;

    let results = collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let result_type = feature.properties.result_type()?;
            if !query.types().contains(&result_type) {
                return None;
            }
            let address = feature.properties.address();
            let name = feature.properties.name.clone().or_else(|| address.clone())?;
            let coordinate = feature.geometry.and_then(|g| match g.coordinates[..] {
                [lng, lat, ..] => Some(LatLng::from_lng_lat(lng, lat)).filter(LatLng::is_valid),
                _ => None,
            });
            Some(SearchResult {
                name,
                address,
                coordinate,
                result_type: Some(result_type),
            })
        })
        .take(query.limit())
        .collect();

    Ok(results)
}
