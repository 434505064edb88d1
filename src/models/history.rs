use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::plan::OptimizedTrip;
use crate::models::trip_request::{TripRequest, TripType};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFormData {
    pub travel_type: TripType,
    pub dates: SearchDates,
    /// Human readable range, e.g. "75000 - 175000 INR".
    pub budget: String,
    /// The full wizard payload, so a search can be replayed.
    pub preferences: TripRequest,
}

/// A submitted search, recorded for signed-in travellers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserSearch {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub source: String,
    pub destination: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub search_date: DateTime<Utc>,
    pub form_data: SearchFormData,
}

impl UserSearch {
    pub fn from_request(user_id: ObjectId, request: &TripRequest, now: DateTime<Utc>) -> Self {
        let [low, high] = request.budget_range;
        Self {
            id: None,
            user_id,
            source: request.source.trim().to_string(),
            destination: request.destination.trim().to_string(),
            search_date: now,
            form_data: SearchFormData {
                travel_type: request.trip_type,
                dates: SearchDates {
                    start_date: request.start_date,
                    end_date: request.end_date,
                },
                budget: format!("{} - {} {}", low, high, request.currency.code()),
                preferences: request.clone(),
            },
        }
    }
}

/// An optimisation result kept in the traveller's history.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavedItinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub search_id: Option<ObjectId>,
    pub source: String,
    pub destination: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    pub optimization_result: OptimizedTrip,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub id: String,
    pub source: String,
    pub destination: String,
    pub search_date: DateTime<Utc>,
    pub form_data: SearchFormData,
}

impl From<UserSearch> for SearchView {
    fn from(search: UserSearch) -> Self {
        Self {
            id: search.id.map(|id| id.to_hex()).unwrap_or_default(),
            source: search.source,
            destination: search.destination,
            search_date: search.search_date,
            form_data: search.form_data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryView {
    pub id: String,
    pub search_id: Option<String>,
    pub source: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
    pub optimization_result: OptimizedTrip,
    pub is_favorite: bool,
}

impl From<SavedItinerary> for ItineraryView {
    fn from(saved: SavedItinerary) -> Self {
        Self {
            id: saved.id.map(|id| id.to_hex()).unwrap_or_default(),
            search_id: saved.search_id.map(|id| id.to_hex()),
            source: saved.source,
            destination: saved.destination,
            created_at: saved.created_at,
            optimization_result: saved.optimization_result,
            is_favorite: saved.is_favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip_request::fixtures::trip_request;

    #[test]
    fn test_search_from_request() {
        let mut request = trip_request();
        request.destination = "  Jaipur ".to_string();
        let user_id = ObjectId::new();
        let search = UserSearch::from_request(user_id, &request, Utc::now());

        assert_eq!(search.user_id, user_id);
        assert_eq!(search.destination, "Jaipur");
        assert_eq!(search.form_data.travel_type, TripType::Leisure);
        assert_eq!(search.form_data.budget, "75000 - 175000 INR");
        assert_eq!(search.form_data.dates.start_date, request.start_date);
    }

    #[test]
    fn test_search_view_uses_hex_id() {
        let id = ObjectId::new();
        let mut search = UserSearch::from_request(ObjectId::new(), &trip_request(), Utc::now());
        search.id = Some(id);

        let view = SearchView::from(search);
        assert_eq!(view.id, id.to_hex());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["formData"]["preferences"]["tripType"].is_string());
    }
}
