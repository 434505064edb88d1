use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::trip_request::TripRequest;

const OPTIMIZE_TRIP: &str = "optimize_trip";
const OPTIMIZE_TRIP_TEMPLATE: &str = include_str!("../prompts/optimize_trip.hbs");

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Invalid prompt template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Failed to render prompt: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders the itinerary prompt from the embedded Handlebars template.
pub struct PromptRenderer {
    hbs: Handlebars<'static>,
}

impl PromptRenderer {
    pub fn new() -> Result<Self, PromptError> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string(OPTIMIZE_TRIP, OPTIMIZE_TRIP_TEMPLATE)?;
        Ok(Self { hbs })
    }

    pub fn render(&self, request: &TripRequest) -> Result<String, PromptError> {
        log::debug!(
            "Rendering itinerary prompt for {} -> {}",
            request.source,
            request.destination
        );
        Ok(self.hbs.render(OPTIMIZE_TRIP, &prompt_context(request))?)
    }
}

// Enum variants render as their wire names ("sole-searching", not "SoleSearching").
fn label<T: Serialize>(value: &Option<T>) -> String {
    match value.as_ref().map(serde_json::to_value) {
        Some(Ok(Value::String(s))) => s,
        Some(Ok(Value::Bool(b))) => b.to_string(),
        _ => String::new(),
    }
}

fn list(values: &[String]) -> String {
    values.join(", ")
}

fn prompt_context(request: &TripRequest) -> Value {
    let [low, high] = request.budget_range;
    json!({
        "source": request.source.trim(),
        "destination": request.destination.trim(),
        "startDate": request.start_date.format("%Y-%m-%d").to_string(),
        "endDate": request.end_date.format("%Y-%m-%d").to_string(),
        "tripDays": request.trip_days(),
        "tripType": request.trip_type.as_str(),
        "budgetRange": format!("{} - {}", low, high),
        "currency": request.currency.code(),
        "easyBooking": label(&request.easy_booking),
        "standardPlans": label(&request.standard_plans),
        "travelOptions": list(&request.travel_options),
        "stayOptions": list(&request.stay_options),
        "honeymoonType": label(&request.honeymoon_type),
        "honeymoonAddOns": list(&request.honeymoon_add_ons),
        "adventureLevel": label(&request.adventure_level),
        "adventureMembers": label(&request.adventure_members),
        "leisurePreference": list(&request.leisure_preference),
        "activityLevel": label(&request.activity_level),
        "isPersonalised": label(&request.is_personalised),
        "culturalImmersion": label(&request.cultural_immersion),
        "culturalActivities": list(&request.cultural_activities),
        "languageBarriers": label(&request.language_barriers),
        "foodDining": label(&request.food_dining),
        "foodPreference": label(&request.food_preference),
        "nightlifeInterest": label(&request.nightlife_interest),
    })
}
