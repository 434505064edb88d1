//! Google Maps Platform client.
//!
//! Geocoding, Directions and Places Autocomplete use the classic JSON web
//! services under `maps.googleapis.com`; text and nearby search use Places
//! API (New), which needs an explicit `X-Goog-FieldMask` on every call.
//!
//! All calls share one `reqwest::Client` with a 10 second timeout. Base URLs
//! are injectable so tests can point the client at a mock server.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::places::{CityPrediction, Coordinates};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP error: {0}")]
    Network(reqwest::Error),
    #[error("{status}: {message}")]
    Status { status: String, message: String },
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("No results for {0}")]
    NoResults(String),
}

// Classic endpoints take the key as a query parameter; keep it out of messages.
impl From<reqwest::Error> for MapsError {
    fn from(err: reqwest::Error) -> Self {
        MapsError::Network(err.without_url())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelMode {
    Driving,
    Walking,
    Transit,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitMode {
    Bus,
    Subway,
    Train,
    Tram,
    Rail,
}

impl TransitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitMode::Bus => "bus",
            TransitMode::Subway => "subway",
            TransitMode::Train => "train",
            TransitMode::Tram => "tram",
            TransitMode::Rail => "rail",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsQuery {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub transit_modes: Vec<TransitMode>,
}

#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub center: Coordinates,
    pub radius_meters: f64,
    pub included_types: Vec<&'static str>,
    pub max_results: Option<u32>,
    pub field_mask: &'static str,
}

// ---- Places API (New) wire types ----

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Photo {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub google_maps_uri: Option<String>,
    pub website_uri: Option<String>,
    pub national_phone_number: Option<String>,
    pub regular_opening_hours: Option<OpeningHours>,
    pub price_level: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Place {
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_ref().map(|n| n.text.as_str())
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.map(|l| Coordinates {
            lat: l.latitude,
            lng: l.longitude,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
struct PlacesResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct PlacesErrorEnvelope {
    error: PlacesErrorBody,
}

#[derive(Debug, Deserialize)]
struct PlacesErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

// ---- classic web service wire types ----

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Route {
    #[serde(default)]
    pub summary: String,
    pub fare: Option<Fare>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Fare {
    pub currency: Option<String>,
    pub value: Option<f64>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Leg {
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
    pub duration: Option<TextValue>,
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Step {
    pub html_instructions: Option<String>,
    pub transit_details: Option<TransitDetails>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TransitDetails {
    pub line: Option<TransitLine>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TransitLine {
    pub name: Option<String>,
    #[serde(default)]
    pub agencies: Vec<TransitAgency>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TransitAgency {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<AutocompletePrediction>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompletePrediction {
    place_id: String,
    description: String,
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: Option<String>,
    secondary_text: Option<String>,
}

/// Lookups the planner needs from a mapping/places provider.
pub trait MapsProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinates, MapsError>;
    async fn directions(&self, query: &DirectionsQuery) -> Result<Vec<Route>, MapsError>;
    async fn search_text(&self, query: &str, field_mask: &str) -> Result<Vec<Place>, MapsError>;
    async fn search_nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, MapsError>;
    async fn autocomplete_cities(&self, input: &str) -> Result<Vec<CityPrediction>, MapsError>;
}

#[derive(Clone)]
pub struct GoogleMapsClient {
    http: Client,
    api_key: String,
    maps_base_url: String,
    places_base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: &str, maps_base_url: &str, places_base_url: &str) -> Result<Self, MapsError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            maps_base_url: maps_base_url.trim_end_matches('/').to_string(),
            places_base_url: places_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MapsError> {
        let url = format!("{}{}", self.maps_base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| MapsError::Decode(format!("{}: {}", path, e)))
    }

    async fn post_places(
        &self,
        method: &str,
        body: serde_json::Value,
        field_mask: &str,
    ) -> Result<Vec<Place>, MapsError> {
        let url = format!("{}/v1/places:{}", self.places_base_url, method);
        let response = self
            .http
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(match serde_json::from_str::<PlacesErrorEnvelope>(&text) {
                Ok(envelope) => MapsError::Status {
                    status: envelope.error.status,
                    message: envelope.error.message,
                },
                Err(_) => MapsError::Status {
                    status: status.as_u16().to_string(),
                    message: text,
                },
            });
        }

        let parsed: PlacesResponse = serde_json::from_str(&text)
            .map_err(|e| MapsError::Decode(format!("places:{}: {}", method, e)))?;
        Ok(parsed.places)
    }
}

fn status_error(status: String, message: Option<String>) -> MapsError {
    MapsError::Status {
        status,
        message: message.unwrap_or_default(),
    }
}

impl MapsProvider for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Coordinates, MapsError> {
        log::debug!("Geocoding {}", address);
        let response: GeocodeResponse = self
            .get_json("/maps/api/geocode/json", &[("address", address)])
            .await?;

        match (response.status.as_str(), response.results.first()) {
            ("OK", Some(result)) => Ok(result.geometry.location),
            ("OK", None) | ("ZERO_RESULTS", _) => Err(MapsError::NoResults(format!(
                "Could not geocode destination: {}. Status: {}",
                address, response.status
            ))),
            _ => Err(status_error(response.status, response.error_message)),
        }
    }

    async fn directions(&self, query: &DirectionsQuery) -> Result<Vec<Route>, MapsError> {
        log::debug!(
            "Directions {} -> {} ({})",
            query.origin,
            query.destination,
            query.mode.as_str()
        );
        let transit_modes = query
            .transit_modes
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join("|");

        let mut params = vec![
            ("origin", query.origin.as_str()),
            ("destination", query.destination.as_str()),
            ("mode", query.mode.as_str()),
        ];
        if !transit_modes.is_empty() {
            params.push(("transit_mode", transit_modes.as_str()));
        }

        let response: DirectionsResponse = self
            .get_json("/maps/api/directions/json", &params)
            .await?;

        match response.status.as_str() {
            "OK" => Ok(response.routes),
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(Vec::new()),
            _ => Err(status_error(response.status, response.error_message)),
        }
    }

    async fn search_text(&self, query: &str, field_mask: &str) -> Result<Vec<Place>, MapsError> {
        log::debug!("Places text search: {}", query);
        self.post_places(
            "searchText",
            serde_json::json!({ "textQuery": query }),
            field_mask,
        )
        .await
    }

    async fn search_nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, MapsError> {
        log::debug!(
            "Places nearby search at ({:.4}, {:.4}) radius {}m",
            query.center.lat,
            query.center.lng,
            query.radius_meters
        );
        let mut body = serde_json::json!({
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": query.center.lat, "longitude": query.center.lng },
                    "radius": query.radius_meters,
                }
            },
            "includedTypes": query.included_types,
        });
        if let Some(max) = query.max_results {
            body["maxResultCount"] = serde_json::json!(max);
        }
        self.post_places("searchNearby", body, query.field_mask).await
    }

    async fn autocomplete_cities(&self, input: &str) -> Result<Vec<CityPrediction>, MapsError> {
        let response: AutocompleteResponse = self
            .get_json(
                "/maps/api/place/autocomplete/json",
                &[("input", input), ("types", "(cities)")],
            )
            .await?;

        if response.status != "OK" && response.status != "ZERO_RESULTS" {
            log::error!("Google Places API error: {:?}", response.error_message);
            return Err(status_error(response.status, response.error_message));
        }

        Ok(response
            .predictions
            .into_iter()
            .map(|p| {
                let formatting = p.structured_formatting;
                let main_text = formatting
                    .as_ref()
                    .and_then(|f| f.main_text.clone())
                    .unwrap_or_else(|| p.description.clone());
                let secondary_text = formatting
                    .and_then(|f| f.secondary_text)
                    .unwrap_or_default();
                CityPrediction {
                    place_id: p.place_id,
                    description: p.description,
                    main_text,
                    secondary_text,
                }
            })
            .collect())
    }
}
