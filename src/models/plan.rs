use serde::{Deserialize, Deserializer, Serialize};

use crate::models::places::{
    Accommodation, Coordinates, DirectionsInfo, FoodSpot, NearbyDining, TrainOption,
};
use crate::models::trip_request::Currency;

/// First amount in free text such as "₹1,500-3,000" or "Rs. 450". Negative
/// or unreadable amounts count as zero.
pub fn first_amount(text: &str) -> f64 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0.0;
    };
    if text[..start].trim_end().ends_with('-') {
        return 0.0;
    }
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect();
    digits.trim_end_matches('.').parse().unwrap_or(0.0)
}

// The model is asked for numbers but now and then answers "1,200" or "₹450".
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = serde_json::Value::deserialize(deserializer)?;
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => first_amount(&s),
        _ => 0.0,
    };
    Ok(amount.max(0.0))
}

// "inr", "Rs" or "₹" are all read as a currency; anything unrecognised falls
// back to the default and is overwritten with the requested currency later.
fn deserialize_lenient_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(Currency::from_label)
        .unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub airline: String,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub price: f64,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetails {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransportationDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub estimated_cost: String,
    pub details: String,
}

/// One stop of a day plan. The first three fields come from the model, the
/// rest are filled in by enrichment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryActivity {
    pub time: String,
    pub activity: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions: Option<DirectionsInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_dining: Option<Vec<NearbyDining>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ItineraryActivity {
    pub fn new(time: &str, activity: &str, description: &str) -> Self {
        Self {
            time: time.to_string(),
            activity: activity.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub title: String,
    pub activities: Vec<ItineraryActivity>,
}

/// Structured answer of the itinerary prompt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    #[serde(default)]
    pub optimal_dates: String,
    #[serde(default)]
    pub alternative_destinations: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub places_to_visit: Vec<String>,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub total_estimated_cost_per_person: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_currency")]
    pub currency: Currency,
    pub cheapest_flight: FlightDetails,
    #[serde(default)]
    pub recommended_activities: Vec<ActivityDetails>,
    #[serde(default)]
    pub local_transportation: Vec<TransportationDetails>,
    pub itinerary: Vec<DayPlan>,
}

/// Plan after enrichment with live places data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedTrip {
    #[serde(flatten)]
    pub plan: TravelPlan,
    #[serde(default)]
    pub direct_trains: Vec<TrainOption>,
    #[serde(default)]
    pub recommended_accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub famous_food_spots: Vec<FoodSpot>,
}

impl OptimizedTrip {
    pub fn trip_days(&self) -> usize {
        self.plan.itinerary.len()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::travel_plan;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_model_output() {
        let raw = json!({
            "optimalDates": "2025-03-10",
            "alternativeDestinations": "",
            "reasoning": "Good season",
            "placesToVisit": ["Amber Fort"],
            "totalEstimatedCostPerPerson": "₹45,000",
            "currency": "INR",
            "cheapestFlight": {"airline": "IndiGo", "price": 9000, "details": "Direct"},
            "recommendedActivities": [{"name": "Fort", "description": "Old", "price": "500"}],
            "localTransportation": [{"type": "Metro", "estimatedCost": "₹30", "details": "Fast"}],
            "itinerary": [{
                "day": 1,
                "title": "Arrival",
                "activities": [{"time": "Morning", "activity": "Amber Fort", "description": "Fort"}]
            }]
        });

        let plan: TravelPlan = serde_json::from_value(raw).unwrap();
        assert_eq!(plan.total_estimated_cost_per_person, 45000.0);
        assert_eq!(plan.recommended_activities[0].price, 500.0);
        assert_eq!(plan.local_transportation[0].kind, "Metro");
        assert!(plan.itinerary[0].activities[0].address.is_none());
    }

    #[test]
    fn test_first_amount() {
        assert_eq!(first_amount("₹1,500-3,000"), 1500.0);
        assert_eq!(first_amount("Rs. 450"), 450.0);
        assert_eq!(first_amount("$12.50 per person"), 12.5);
        assert_eq!(first_amount("45000."), 45000.0);
        assert_eq!(first_amount("-500"), 0.0);
        assert_eq!(first_amount("₹ -500"), 0.0);
        assert_eq!(first_amount("Free"), 0.0);
        assert_eq!(first_amount("1.2.3"), 0.0);
    }

    #[test]
    fn test_lenient_currency_and_negative_prices() {
        let mut raw = serde_json::to_value(travel_plan()).unwrap();
        raw["cheapestFlight"]["price"] = json!(-9000);
        for (label, expected) in [
            ("inr", Currency::Inr),
            ("Rs", Currency::Inr),
            ("₹", Currency::Inr),
            ("usd", Currency::Usd),
            ("€", Currency::Eur),
            ("dollars", Currency::Inr),
        ] {
            raw["currency"] = json!(label);
            let plan: TravelPlan = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(plan.currency, expected, "label {}", label);
            assert_eq!(plan.cheapest_flight.price, 0.0);
        }

        raw.as_object_mut().unwrap().remove("currency");
        let plan: TravelPlan = serde_json::from_value(raw).unwrap();
        assert_eq!(plan.currency, Currency::Inr);
    }

    #[test]
    fn test_optimized_trip_flattens_plan() {
        let trip = OptimizedTrip {
            plan: travel_plan(),
            direct_trains: vec![],
            recommended_accommodations: vec![],
            famous_food_spots: vec![],
        };
        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(value["cheapestFlight"]["airline"], "IndiGo");
        assert!(value["directTrains"].is_array());
        assert!(value.get("plan").is_none());

        let back: OptimizedTrip = serde_json::from_value(value).unwrap();
        assert_eq!(back, trip);
        assert_eq!(back.trip_days(), 2);
    }

    #[test]
    fn test_unenriched_fields_are_omitted() {
        let activity = ItineraryActivity::new("Evening", "Chokhi Dhani", "Village dinner");
        let value = serde_json::to_value(&activity).unwrap();
        assert!(value.get("address").is_none());
        assert!(value.get("nearbyDining").is_none());
    }
}
