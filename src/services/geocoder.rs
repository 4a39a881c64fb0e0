use crate::config::GEOCODING_LANGUAGE;
use crate::errors::{GatewayError, Upstream};
use crate::models::Location;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// City name → best matching location.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the provider has no candidate for `city`.
    async fn lookup(&self, city: &str) -> Result<Option<Location>, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    admin1: Option<String>,
    country_code: Option<String>,
}

impl Candidate {
    fn into_location(self) -> Result<Location, GatewayError> {
        let missing = |field: &str| {
            GatewayError::upstream(Upstream::Geocoding, format!("candidate without {}", field))
        };
        Ok(Location {
            latitude: self.latitude.ok_or_else(|| missing("latitude"))?,
            longitude: self.longitude.ok_or_else(|| missing("longitude"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            admin1: self.admin1.unwrap_or_default(),
            country_code: self.country_code.unwrap_or_default(),
        })
    }
}

/// Open-Meteo geocoding search. Asks for a single candidate and takes it as is;
/// there is no ranking or disambiguation beyond the provider's own ordering.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    client: Client,
    endpoint: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            language: GEOCODING_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn lookup(&self, city: &str) -> Result<Option<Location>, GatewayError> {
        let fail = |e: reqwest::Error| GatewayError::upstream(Upstream::Geocoding, e);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(fail)?
            .error_for_status()
            .map_err(fail)?;

        let body: SearchResponse = response.json().await.map_err(fail)?;

        match body.results.and_then(|results| results.into_iter().next()) {
            Some(candidate) => candidate.into_location().map(Some),
            None => Ok(None),
        }
    }
}
