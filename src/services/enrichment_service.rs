//! Attaches live place data to the activities of a drafted itinerary.
//!
//! Each activity is looked up by name within the destination city. A hit
//! contributes address, coordinates, rating, hours and an entry-fee band;
//! driving directions are then requested from the previous stop of the same
//! day and, when coordinates are known, the best dining nearby.
//!
//! Enrichment is best effort: a failed lookup is logged and the activity is
//! kept with whatever it already had.

use futures::future::join_all;
use regex::Regex;
use std::sync::OnceLock;

use crate::models::places::DirectionsInfo;
use crate::models::plan::{DayPlan, ItineraryActivity};
use crate::models::trip_request::Currency;
use crate::services::maps_service::{DirectionsQuery, MapsProvider, Place, Route, TravelMode};
use crate::services::places_service::nearby_dining;

const SKIP_KEYWORDS: [&str; 9] = [
    "check-in",
    "check out",
    "checkout",
    "dinner at",
    "lunch at",
    "relaxation",
    "departure",
    "arrival at",
    "breakfast",
];

const MAX_DIRECTION_STEPS: usize = 5;
const NEARBY_DINING_LIMIT: usize = 3;
const UNKNOWN_FEE: &str = "Contact venue for pricing";

const ACTIVITY_FIELDS: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.rating,places.googleMapsUri,places.websiteUri,places.nationalPhoneNumber,places.regularOpeningHours,places.priceLevel";

fn html_tags() -> Option<&'static Regex> {
    static TAGS: OnceLock<Option<Regex>> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

/// Logistics entries (meals, check-in, transfers) are not worth a lookup,
/// unless they explicitly involve visiting somewhere.
pub fn should_skip(activity: &str) -> bool {
    let name = activity.to_lowercase();
    if name.contains("visit") || name.contains("explore") {
        return false;
    }
    SKIP_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Maps a Places price level to an entry-fee band in the trip currency.
pub fn entry_fee(price_level: &str, currency: Currency) -> String {
    let level = price_level.trim_start_matches("PRICE_LEVEL_");

    if level == "FREE" {
        return "Free".to_string();
    }

    let bands: [&str; 4] = match currency {
        Currency::Inr => ["0-500", "500-1500", "1500-3000", "3000+"],
        Currency::Usd | Currency::Eur => ["0-10", "10-25", "25-50", "50+"],
    };
    let band = match level {
        "INEXPENSIVE" => bands[0],
        "MODERATE" => bands[1],
        "EXPENSIVE" => bands[2],
        "VERY_EXPENSIVE" => bands[3],
        _ => return UNKNOWN_FEE.to_string(),
    };
    format!("{}{}", currency.symbol(), band)
}

pub fn strip_html(text: &str) -> String {
    match html_tags() {
        Some(tags) => tags.replace_all(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}

fn address_or(address: &str, fallback: &str) -> String {
    if address.is_empty() {
        fallback.to_string()
    } else {
        address.to_string()
    }
}

/// Summary of the first leg, named by the addresses the provider resolved.
fn directions_info(origin: &str, destination: &str, routes: &[Route]) -> Option<DirectionsInfo> {
    let leg = routes.first()?.legs.first()?;
    Some(DirectionsInfo {
        origin: address_or(&leg.start_address, origin),
        destination: address_or(&leg.end_address, destination),
        travel_mode: TravelMode::Driving.as_str().to_string(),
        duration: leg
            .duration
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        distance: leg
            .distance
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        steps: leg
            .steps
            .iter()
            .take(MAX_DIRECTION_STEPS)
            .filter_map(|s| s.html_instructions.as_deref())
            .map(strip_html)
            .collect(),
    })
}

fn apply_place(activity: &mut ItineraryActivity, place: &Place, currency: Currency) {
    activity.place_id = place.id.clone();
    activity.address = place.formatted_address.clone();
    activity.coordinates = place.coordinates();
    activity.map_url = place.google_maps_uri.clone();
    activity.rating = place.rating;
    activity.website_url = place.website_uri.clone();
    activity.phone_number = place.national_phone_number.clone();
    activity.opening_hours = place
        .regular_opening_hours
        .as_ref()
        .map(|h| h.weekday_descriptions.join(", "))
        .filter(|h| !h.is_empty());
    if let Some(level) = place.price_level.as_deref() {
        activity.entry_fee = Some(entry_fee(level, currency));
    }
}

pub async fn enrich_activity<M: MapsProvider>(
    maps: &M,
    mut activity: ItineraryActivity,
    city: &str,
    previous_location: Option<&str>,
    currency: Currency,
) -> ItineraryActivity {
    if should_skip(&activity.activity) {
        return activity;
    }

    let query = format!("{}, {}", activity.activity, city);
    match maps.search_text(&query, ACTIVITY_FIELDS).await {
        Ok(places) => match places.first() {
            Some(place) => apply_place(&mut activity, place, currency),
            None => {
                log::warn!("No place found for activity \"{}\"", query);
                return activity;
            }
        },
        Err(e) => {
            log::warn!("Place lookup failed for \"{}\": {}", query, e);
            return activity;
        }
    }

    if let (Some(from), Some(to)) = (previous_location, activity.address.clone()) {
        let request = DirectionsQuery {
            origin: from.to_string(),
            destination: to.clone(),
            mode: TravelMode::Driving,
            transit_modes: Vec::new(),
        };
        match maps.directions(&request).await {
            Ok(routes) => activity.directions = directions_info(from, &to, &routes),
            Err(e) => log::warn!("Directions lookup failed for \"{}\": {}", query, e),
        }
    }

    if let Some(center) = activity.coordinates {
        match nearby_dining(maps, center, NEARBY_DINING_LIMIT).await {
            Ok(dining) if !dining.is_empty() => activity.nearby_dining = Some(dining),
            Ok(_) => {}
            Err(e) => log::warn!("Nearby dining lookup failed for \"{}\": {}", query, e),
        }
    }

    activity
}

async fn enrich_day<M: MapsProvider>(maps: &M, day: DayPlan, city: &str, currency: Currency) -> DayPlan {
    let mut previous: Option<String> = None;
    let mut activities = Vec::with_capacity(day.activities.len());
    for activity in day.activities {
        let enriched = enrich_activity(maps, activity, city, previous.as_deref(), currency).await;
        if enriched.address.is_some() {
            previous = enriched.address.clone();
        }
        activities.push(enriched);
    }
    DayPlan { activities, ..day }
}

/// Enriches all days concurrently; activities within a day stay ordered so
/// each one can be routed from the stop before it.
pub async fn enrich_itinerary<M: MapsProvider>(
    maps: &M,
    days: Vec<DayPlan>,
    city: &str,
    currency: Currency,
) -> Vec<DayPlan> {
    join_all(
        days.into_iter()
            .map(|day| enrich_day(maps, day, city, currency)),
    )
    .await
}
