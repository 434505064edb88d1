use serde::{Deserialize, Serialize};

use crate::models::plan::OptimizedTrip;
use crate::models::trip_request::Currency;

/// Per-person cost split derived from an optimized trip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub flight: f64,
    pub accommodation: f64,
    pub activities: f64,
    pub other: f64,
    pub total: f64,
    pub currency: Currency,
}

impl CostBreakdown {
    pub fn from_trip(trip: &OptimizedTrip) -> Self {
        let flight = trip.plan.cheapest_flight.price;
        let accommodation = Self::accommodation_cost(trip);
        let activities = Self::activity_cost(trip);
        let total = trip.plan.total_estimated_cost_per_person;

        Self {
            flight,
            accommodation,
            activities,
            other: (total - flight - accommodation - activities).max(0.0),
            total,
            currency: trip.plan.currency,
        }
    }

    /// Nightly rate of the top recommendation times the number of planned days.
    pub fn accommodation_cost(trip: &OptimizedTrip) -> f64 {
        trip.recommended_accommodations
            .first()
            .map(|a| a.price_per_night * trip.trip_days() as f64)
            .unwrap_or(0.0)
    }

    pub fn activity_cost(trip: &OptimizedTrip) -> f64 {
        trip.plan
            .recommended_activities
            .iter()
            .map(|a| a.price)
            .sum()
    }

    /// Share of the total, in percent.
    pub fn percentage(&self, amount: f64) -> f64 {
        if self.total > 0.0 {
            amount / self.total * 100.0
        } else {
            0.0
        }
    }

    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, f64); 4] {
        [
            ("Flight", self.flight),
            ("Accommodation", self.accommodation),
            ("Activities", self.activities),
            ("Other", self.other),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::places::Accommodation;
    use crate::models::plan::fixtures::travel_plan;

    fn trip(accommodations: Vec<Accommodation>) -> OptimizedTrip {
        OptimizedTrip {
            plan: travel_plan(),
            direct_trains: vec![],
            recommended_accommodations: accommodations,
            famous_food_spots: vec![],
        }
    }

    fn hotel(price: f64) -> Accommodation {
        Accommodation {
            name: "Rambagh Palace".to_string(),
            kind: "hotel".to_string(),
            rating: 4.6,
            price_per_night: price,
            booking_link: String::new(),
            photos: vec![],
        }
    }

    #[test]
    fn test_breakdown_from_trip() {
        let breakdown = CostBreakdown::from_trip(&trip(vec![hotel(6000.0), hotel(1.0)]));

        assert_eq!(breakdown.flight, 9000.0);
        assert_eq!(breakdown.accommodation, 12000.0);
        assert_eq!(breakdown.activities, 2000.0);
        assert_eq!(breakdown.other, 17000.0);
        assert_eq!(breakdown.total, 40000.0);
        assert_eq!(breakdown.currency, Currency::Inr);
        assert_eq!(breakdown.percentage(breakdown.flight), 22.5);
    }

    #[test]
    fn test_other_never_negative() {
        let breakdown = CostBreakdown::from_trip(&trip(vec![hotel(50000.0)]));
        assert_eq!(breakdown.other, 0.0);
    }

    #[test]
    fn test_no_accommodation_and_zero_total() {
        let mut t = trip(vec![]);
        t.plan.total_estimated_cost_per_person = 0.0;
        let breakdown = CostBreakdown::from_trip(&t);
        assert_eq!(breakdown.accommodation, 0.0);
        assert_eq!(breakdown.percentage(100.0), 0.0);
    }
}
