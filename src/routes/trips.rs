use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::auth_context::{AuthenticatedUser, OptionalUser};
use crate::models::plan::OptimizedTrip;
use crate::models::trip_request::TripRequest;
use crate::services::cost_service::CostBreakdown;
use crate::services::history_service::HistoryStore;
use crate::services::trip_planner_service::TripPlanner;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeResponse {
    #[serde(flatten)]
    trip: OptimizedTrip,
    #[serde(skip_serializing_if = "Option::is_none")]
    itinerary_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Percentages {
    flight: f64,
    accommodation: f64,
    activities: f64,
    other: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CostBreakdownResponse {
    #[serde(flatten)]
    breakdown: CostBreakdown,
    percentages: Percentages,
}

impl From<CostBreakdown> for CostBreakdownResponse {
    fn from(breakdown: CostBreakdown) -> Self {
        let percentages = Percentages {
            flight: breakdown.percentage(breakdown.flight),
            accommodation: breakdown.percentage(breakdown.accommodation),
            activities: breakdown.percentage(breakdown.activities),
            other: breakdown.percentage(breakdown.other),
        };
        Self {
            breakdown,
            percentages,
        }
    }
}

// History is a convenience: failing to save never fails the optimisation.
async fn save_history(
    store: &HistoryStore,
    user: &AuthenticatedUser,
    request: &TripRequest,
    trip: &OptimizedTrip,
) -> Option<String> {
    let user_id = user.object_id().ok()?;

    let search_id = match store.record_search(user_id, request).await {
        Ok(id) => id,
        Err(e) => {
            log::warn!("Failed to record search for {}: {}", user.email, e);
            None
        }
    };

    match store.save_itinerary(user_id, search_id, request, trip).await {
        Ok(saved) => saved.id.map(|id| id.to_hex()),
        Err(e) => {
            log::warn!("Failed to save itinerary for {}: {}", user.email, e);
            None
        }
    }
}

/*
    /api/trips/optimize
*/
pub async fn optimize(
    planner: web::Data<TripPlanner>,
    store: web::Data<HistoryStore>,
    user: OptionalUser,
    body: web::Json<TripRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let trip = planner.optimize(&request).await?;

    let itinerary_id = match &user.0 {
        Some(user) => save_history(&store, user, &request, &trip).await,
        None => None,
    };

    Ok(HttpResponse::Ok().json(OptimizeResponse { trip, itinerary_id }))
}

/*
    /api/trips/cost-breakdown
*/
pub async fn cost_breakdown(body: web::Json<OptimizedTrip>) -> HttpResponse {
    let breakdown = CostBreakdown::from_trip(&body);
    HttpResponse::Ok().json(CostBreakdownResponse::from(breakdown))
}
