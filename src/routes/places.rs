use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::places::CityPrediction;
use crate::services::maps_service::MapsProvider;
use crate::services::trip_planner_service::TripPlanner;

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub input: String,
}

#[derive(Serialize)]
struct AutocompleteResponse {
    predictions: Vec<CityPrediction>,
}

/*
    /api/places/autocomplete?input=
*/
pub async fn autocomplete(
    planner: web::Data<TripPlanner>,
    query: web::Query<AutocompleteQuery>,
) -> Result<HttpResponse, ApiError> {
    let input = query.input.trim();
    if input.is_empty() {
        return Ok(HttpResponse::Ok().json(AutocompleteResponse {
            predictions: Vec::new(),
        }));
    }

    let predictions = planner.maps().autocomplete_cities(input).await?;
    Ok(HttpResponse::Ok().json(AutocompleteResponse { predictions }))
}
