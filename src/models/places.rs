use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyDining {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<String>,
    pub address: String,
    pub map_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsInfo {
    pub origin: String,
    pub destination: String,
    pub travel_mode: String,
    pub duration: String,
    pub distance: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub price_per_night: f64,
    pub booking_link: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSpot {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<String>,
    pub map_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainOption {
    pub train_name: String,
    pub departure_station: String,
    pub arrival_station: String,
    pub price: String,
    pub fare_value: f64,
    pub duration: String,
    pub details: String,
}

/// City suggestion returned by the autocomplete endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityPrediction {
    pub place_id: String,
    pub description: String,
    pub main_text: String,
    pub secondary_text: String,
}
