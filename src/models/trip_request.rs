use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Adventure,
    Honeymoon,
    Leisure,
    Luxury,
    Pilgrim,
    Others,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Adventure => "adventure",
            TripType::Honeymoon => "honeymoon",
            TripType::Leisure => "leisure",
            TripType::Luxury => "luxury",
            TripType::Pilgrim => "pilgrim",
            TripType::Others => "others",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[default]
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
        }
    }

    /// Reads a code or symbol the way people write it: "inr", "Rs.", "€".
    pub fn from_label(label: &str) -> Option<Currency> {
        match label.trim().trim_end_matches('.').to_uppercase().as_str() {
            "USD" | "$" | "US$" => Some(Currency::Usd),
            "EUR" | "€" => Some(Currency::Eur),
            "INR" | "₹" | "RS" => Some(Currency::Inr),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HoneymoonType {
    Private,
    Social,
    Mix,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AdventureLevel {
    Mild,
    Moderate,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AdventureMembers {
    Solo,
    SoleSearching,
    Group,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    CompleteRest,
    LightActivities,
    Balanced,
    ActiveRelaxation,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CulturalImmersion {
    TouristSites,
    AuthenticLocal,
    Homestays,
    TemporaryLocal,
    NotKeen,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageBarriers {
    Comfortable,
    NeedHelp,
    LearnBasics,
    NotConcern,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FoodDining {
    PureVeg,
    NonVeg,
    Mix,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPreference {
    Familiar,
    LocalSafe,
    StreetAuthentic,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NightlifeInterest {
    EarlyQuiet,
    LocalBars,
    VibrantClubs,
    CulturalEvening,
}

/// Trip parameters collected by the three-level form wizard.
///
/// Level 1 is the basic trip (places, dates, type, budget). Level 2, the
/// "trip character", depends on the trip type. Level 3, the "experience
/// levels", only matters when the traveller asks for a personalised plan.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip_type: TripType,
    pub budget_range: [f64; 2],
    #[serde(default)]
    pub currency: Currency,

    // Level 2: trip character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy_booking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_plans: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub travel_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stay_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honeymoon_type: Option<HoneymoonType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub honeymoon_add_ons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adventure_level: Option<AdventureLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adventure_members: Option<AdventureMembers>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leisure_preference: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,

    // Level 3: experience levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_personalised: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_immersion: Option<CulturalImmersion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cultural_activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_barriers: Option<LanguageBarriers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_dining: Option<FoodDining>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_preference: Option<FoodPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nightlife_interest: Option<NightlifeInterest>,
}

impl TripRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.source.trim().chars().count() < 2 {
            return Err(ApiError::Validation("Source location is required".to_string()));
        }
        if self.destination.trim().chars().count() < 2 {
            return Err(ApiError::Validation("Destination is required".to_string()));
        }
        if self.end_date < self.start_date {
            return Err(ApiError::Validation(
                "A complete date range is required.".to_string(),
            ));
        }

        let [low, high] = self.budget_range;
        if !low.is_finite() || !high.is_finite() || low < 0.0 || high < 0.0 {
            return Err(ApiError::Validation(
                "Budget values must be non-negative numbers".to_string(),
            ));
        }
        if low > high {
            return Err(ApiError::Validation(
                "Budget minimum cannot exceed the maximum".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of calendar days the trip covers, both ends included.
    pub fn trip_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::trip_request;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wizard_payload() {
        let payload = json!({
            "source": "Delhi",
            "destination": "Goa",
            "startDate": "2025-12-20",
            "endDate": "2025-12-27",
            "tripType": "honeymoon",
            "budgetRange": [150000, 300000],
            "currency": "INR",
            "honeymoonType": "private",
            "honeymoonAddOns": ["candle-light-dinner"],
            "adventureMembers": "sole-searching",
            "culturalImmersion": "authentic-local",
            "nightlifeInterest": "cultural-evening"
        });

        let request: TripRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.trip_type, TripType::Honeymoon);
        assert_eq!(request.honeymoon_type, Some(HoneymoonType::Private));
        assert_eq!(request.adventure_members, Some(AdventureMembers::SoleSearching));
        assert_eq!(request.cultural_immersion, Some(CulturalImmersion::AuthenticLocal));
        assert_eq!(request.nightlife_interest, Some(NightlifeInterest::CulturalEvening));
        assert_eq!(request.trip_days(), 8);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_currency_defaults_to_inr() {
        let payload = json!({
            "source": "Delhi",
            "destination": "Goa",
            "startDate": "2025-12-20",
            "endDate": "2025-12-21",
            "tripType": "others",
            "budgetRange": [1, 2]
        });
        let request: TripRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.currency, Currency::Inr);
        assert_eq!(request.currency.symbol(), "₹");
    }

    #[test]
    fn test_rejects_unknown_trip_type() {
        let payload = json!({
            "source": "Delhi",
            "destination": "Goa",
            "startDate": "2025-12-20",
            "endDate": "2025-12-21",
            "tripType": "business",
            "budgetRange": [1, 2]
        });
        assert!(serde_json::from_value::<TripRequest>(payload).is_err());
    }

    #[test]
    fn test_short_places_rejected() {
        let mut request = trip_request();
        request.source = " M ".to_string();
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "Source location is required");

        let mut request = trip_request();
        request.destination = "J".to_string();
        assert_eq!(request.validate().unwrap_err().to_string(), "Destination is required");
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let mut request = trip_request();
        request.end_date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "A complete date range is required."
        );
    }

    #[test]
    fn test_budget_bounds() {
        let mut request = trip_request();
        request.budget_range = [500.0, 100.0];
        assert!(request.validate().is_err());

        request.budget_range = [-1.0, 100.0];
        assert!(request.validate().is_err());

        request.budget_range = [100.0, 100.0];
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_single_day_trip() {
        let mut request = trip_request();
        request.end_date = request.start_date;
        assert_eq!(request.trip_days(), 1);
    }
}
