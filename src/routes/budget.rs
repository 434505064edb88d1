use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::budget::{budget_ranges, default_budget_range, BudgetTiers};
use crate::models::trip_request::{Currency, TripType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetQuery {
    pub trip_type: Option<TripType>,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetResponse {
    currency: Currency,
    symbol: &'static str,
    ranges: BudgetTiers,
    default_range: [f64; 2],
}

/*
    /api/budget-ranges?tripType=&currency=
*/
pub async fn get_budget_ranges(query: web::Query<BudgetQuery>) -> impl Responder {
    let currency = query.currency;
    let trip_type = query.trip_type.unwrap_or(TripType::Leisure);

    HttpResponse::Ok().json(BudgetResponse {
        currency,
        symbol: currency.symbol(),
        ranges: budget_ranges(trip_type, currency),
        default_range: default_budget_range(currency),
    })
}
