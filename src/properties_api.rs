//! # Chemical Properties API Module
//!
//! ## Aim
//! This module talks to the remote chemical-properties web service. Given an
//! InChI key it issues a single GET request with a static bearer credential and
//! parses the JSON body into `SearchChemicalsResponse`: the chemical record
//! (name, IUPAC name, synonyms) plus its physical-property aggregates and
//! measurements.
//!
//! ## Main Data Structures and Logic
//! - `PropertiesClient<C>`: generic client with dependency injection for the
//!   HTTP transport (enables mocking in tests)
//! - `SearchChemicalsResponse` / `ChemicalDetail` / `ChemicalProperty` /
//!   `Measurement`: the wire payload for one detail screen
//! - `FetchError`: collapses transport failures, non-success statuses and
//!   malformed bodies into one taxonomy
//! - On any failure the public `fetch` substitutes a bundled fallback payload
//!   so the detail screen always has something to render; the failure is only
//!   logged
//!
//! ## Usage
//! ```rust, ignore
//! let client = PropertiesClient::new();
//! let response = client.fetch("LFQSCWFLJHTTHZ-UHFFFAOYSA-N", true);
//! println!("{}", response.chemical.name);
//! ```

use crate::config::with_config;
use log::{error, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Fallback payload with every measurement included.
const FALLBACK_RETURN_ALL_TRUE: &str = include_str!("../assets/mock_chemical_return_all_true.json");
/// Fallback payload with aggregates only.
const FALLBACK_RETURN_ALL_FALSE: &str =
    include_str!("../assets/mock_chemical_return_all_false.json");

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn get_json(&self, url: &str, bearer_token: &str) -> Result<String, FetchError>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_json(&self, url: &str, bearer_token: &str) -> Result<String, FetchError> {
        let response = self.get(url).bearer_auth(bearer_token).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

/// error types for the detail fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Service returned HTTP status {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// The chemical record of a detail payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChemicalDetail {
    pub inchi_key: String,
    pub iupac_name: String,
    pub name: String,
    pub synonyms: Vec<String>,
}

/// min/mean/max envelope some measurements carry instead of a single scalar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Free-form measurement context. The known fields cover what the service
/// emits today; anything else lands in `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MiscMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// "closed cup" or "open cup" for flash points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurementMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc: Option<MiscMetadata>,
}

/// One individual measurement of a physical property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    #[serde(rename = "type")]
    pub measurement_type: String,
    pub value: f64,
    #[serde(default)]
    pub metadata: MeasurementMetadata,
}

/// One physical property: a summary aggregate plus the individual measurements
/// it was derived from. The service serializes the measurement list under
/// `all_measurements` and omits it when `return_all=false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChemicalProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<f64>,
    #[serde(rename = "all_measurements", default)]
    pub measurements: Vec<Measurement>,
}

/// Full payload for one detail screen, owned by the screen that fetched it and
/// discarded on navigation away.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchChemicalsResponse {
    pub chemical: ChemicalDetail,
    pub properties: Vec<ChemicalProperty>,
}

pub struct PropertiesClient<C: HttpClient> {
    client: C,
    endpoint: String,
    bearer_token: String,
}

impl PropertiesClient<Client> {
    /// Creates a client with the configured endpoint and bearer token.
    pub fn new() -> Self {
        let (endpoint, bearer_token) = with_config(|config| {
            (
                config.endpoint().to_string(),
                config.bearer_token().to_string(),
            )
        });
        Self {
            client: Client::new(),
            endpoint,
            bearer_token,
        }
    }
}

impl Default for PropertiesClient<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> PropertiesClient<C> {
    pub fn with_client(client: C, endpoint: &str, bearer_token: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            bearer_token: bearer_token.to_string(),
        }
    }

    /// Fetches the detail payload for an InChI key.
    ///
    /// Never fails: transport errors, non-2xx statuses and malformed bodies are
    /// collapsed into one "fetch failed" outcome, logged, and masked with the
    /// bundled fallback payload selected by `return_all`. Use [`Self::try_fetch`]
    /// to observe the actual error.
    pub fn fetch(&self, inchi_key: &str, return_all: bool) -> SearchChemicalsResponse {
        match self.try_fetch(inchi_key, return_all) {
            Ok(response) => {
                info!("Fetched chemical details for {}", inchi_key);
                response
            }
            Err(e) => {
                error!(
                    "Error fetching chemical details for {}: {}. Falling back to bundled data",
                    inchi_key, e
                );
                fallback_payload(return_all)
            }
        }
    }

    /// Fetch without the fallback masking. One outbound GET with
    /// `search=<inchiKey>` and `return_all=true|false` query parameters and the
    /// bearer credential header.
    pub fn try_fetch(
        &self,
        inchi_key: &str,
        return_all: bool,
    ) -> Result<SearchChemicalsResponse, FetchError> {
        let url = self.construct_url(inchi_key, return_all)?;
        let body = self.client.get_json(url.as_str(), &self.bearer_token)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn construct_url(&self, inchi_key: &str, return_all: bool) -> Result<Url, FetchError> {
        let return_all = if return_all { "true" } else { "false" };
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[("search", inchi_key), ("return_all", return_all)],
        )?)
    }
}

/// Bundled payload served in place of a failed fetch, selected by the
/// `return_all` flag so its shape matches what the caller asked for.
pub fn fallback_payload(return_all: bool) -> SearchChemicalsResponse {
    let raw = if return_all {
        FALLBACK_RETURN_ALL_TRUE
    } else {
        FALLBACK_RETURN_ALL_FALSE
    };
    serde_json::from_str(raw).expect("bundled fallback payload must be valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock HTTP client for testing
    enum MockResponse {
        Body(String),
        Status(u16),
    }

    struct MockHttpClient {
        response: MockResponse,
    }

    impl MockHttpClient {
        fn with_body(body: &str) -> Self {
            Self {
                response: MockResponse::Body(body.to_string()),
            }
        }

        fn with_status(status: u16) -> Self {
            Self {
                response: MockResponse::Status(status),
            }
        }
    }

    impl HttpClient for MockHttpClient {
        fn get_json(&self, _url: &str, _bearer_token: &str) -> Result<String, FetchError> {
            match &self.response {
                MockResponse::Body(body) => Ok(body.clone()),
                MockResponse::Status(status) => Err(FetchError::Status(*status)),
            }
        }
    }

    const ENDPOINT: &str = "https://chemical-properties.example.com/v0/";
    const TOKEN: &str = "test-token";

    const WATER_BODY: &str = r#"{
        "chemical": {
            "inchi_key": "XLYOFNOQVPJJNP-UHFFFAOYSA-N",
            "iupac_name": "oxidane",
            "name": "water",
            "synonyms": ["dihydrogen monoxide", "aqua"]
        },
        "properties": [
            {
                "type": "boiling_point",
                "aggregate": 100.0,
                "all_measurements": [
                    {
                        "type": "boiling_point",
                        "value": 100.0,
                        "metadata": { "misc": { "pressure": 101.325 } }
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_url_construction() {
        let client = PropertiesClient::with_client(MockHttpClient::with_status(200), ENDPOINT, TOKEN);

        let url = client
            .construct_url("XLYOFNOQVPJJNP-UHFFFAOYSA-N", true)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://chemical-properties.example.com/v0/?search=XLYOFNOQVPJJNP-UHFFFAOYSA-N&return_all=true"
        );

        let url = client
            .construct_url("XLYOFNOQVPJJNP-UHFFFAOYSA-N", false)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://chemical-properties.example.com/v0/?search=XLYOFNOQVPJJNP-UHFFFAOYSA-N&return_all=false"
        );
    }

    #[test]
    fn test_successful_fetch_parses_body() {
        let client =
            PropertiesClient::with_client(MockHttpClient::with_body(WATER_BODY), ENDPOINT, TOKEN);
        let response = client.fetch("XLYOFNOQVPJJNP-UHFFFAOYSA-N", true);

        assert_eq!(response.chemical.name, "water");
        assert_eq!(response.chemical.iupac_name, "oxidane");
        assert_eq!(response.properties.len(), 1);
        let property = &response.properties[0];
        assert_eq!(property.property_type, "boiling_point");
        assert_eq!(property.aggregate, Some(100.0));
        assert_eq!(property.measurements.len(), 1);
        assert_eq!(
            property.measurements[0]
                .metadata
                .misc
                .as_ref()
                .unwrap()
                .pressure,
            Some(101.325)
        );
    }

    #[test]
    fn test_http_failure_yields_fallback() {
        let client =
            PropertiesClient::with_client(MockHttpClient::with_status(503), ENDPOINT, TOKEN);
        let response = client.fetch("XLYOFNOQVPJJNP-UHFFFAOYSA-N", true);
        assert_eq!(response, fallback_payload(true));
    }

    #[test]
    fn test_malformed_body_yields_fallback() {
        let client = PropertiesClient::with_client(
            MockHttpClient::with_body("<html>not json</html>"),
            ENDPOINT,
            TOKEN,
        );
        let response = client.fetch("XLYOFNOQVPJJNP-UHFFFAOYSA-N", false);
        assert_eq!(response, fallback_payload(false));
    }

    #[test]
    fn test_try_fetch_surfaces_errors() {
        let client =
            PropertiesClient::with_client(MockHttpClient::with_status(401), ENDPOINT, TOKEN);
        let result = client.try_fetch("XLYOFNOQVPJJNP-UHFFFAOYSA-N", true);
        assert!(matches!(result, Err(FetchError::Status(401))));

        let client = PropertiesClient::with_client(
            MockHttpClient::with_body("not json"),
            ENDPOINT,
            TOKEN,
        );
        let result = client.try_fetch("XLYOFNOQVPJJNP-UHFFFAOYSA-N", true);
        assert!(matches!(result, Err(FetchError::MalformedBody(_))));
    }

    #[test]
    fn test_fallback_payload_selected_by_flag() {
        let full = fallback_payload(true);
        let aggregates_only = fallback_payload(false);

        assert_eq!(full.chemical, aggregates_only.chemical);
        assert!(full.properties.iter().any(|p| !p.measurements.is_empty()));
        assert!(
            aggregates_only
                .properties
                .iter()
                .all(|p| p.measurements.is_empty())
        );
    }

    #[test]
    fn test_missing_measurements_default_to_empty() {
        let body = r#"{
            "chemical": {
                "inchi_key": "K", "iupac_name": "i", "name": "n", "synonyms": []
            },
            "properties": [ { "type": "melting_point", "aggregate": 0.0 } ]
        }"#;
        let response: SearchChemicalsResponse = serde_json::from_str(body).unwrap();
        assert!(response.properties[0].measurements.is_empty());
    }

    #[test]
    fn test_unknown_misc_fields_preserved() {
        let body = r#"{ "misc": { "temperature": 25.0, "observer": "lab 3" } }"#;
        let metadata: MeasurementMetadata = serde_json::from_str(body).unwrap();
        let misc = metadata.misc.unwrap();
        assert_eq!(misc.temperature, Some(25.0));
        assert_eq!(
            misc.extra.get("observer"),
            Some(&Value::String("lab 3".to_string()))
        );
    }
}
