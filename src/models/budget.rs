use serde::Serialize;

use crate::models::trip_request::{Currency, TripType};

/// Suggested per-person budget bands offered by the form wizard.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct BudgetTiers {
    pub low: [f64; 2],
    pub medium: [f64; 2],
    pub high: [f64; 2],
    pub luxury: [f64; 2],
}

const fn tiers(low: [f64; 2], medium: [f64; 2], high: [f64; 2], luxury: [f64; 2]) -> BudgetTiers {
    BudgetTiers {
        low,
        medium,
        high,
        luxury,
    }
}

const USD_ADVENTURE: BudgetTiers = tiers([800.0, 2000.0], [2000.0, 4500.0], [4500.0, 9000.0], [9000.0, 18000.0]);
const USD_HONEYMOON: BudgetTiers = tiers([1200.0, 3000.0], [3000.0, 6000.0], [6000.0, 12000.0], [12000.0, 25000.0]);
const USD_LEISURE: BudgetTiers = tiers([500.0, 1500.0], [1500.0, 3500.0], [3500.0, 7500.0], [7500.0, 15000.0]);
const USD_LUXURY: BudgetTiers = tiers([2000.0, 5000.0], [5000.0, 10000.0], [10000.0, 20000.0], [20000.0, 50000.0]);
const USD_PILGRIM: BudgetTiers = tiers([300.0, 800.0], [800.0, 2000.0], [2000.0, 4000.0], [4000.0, 8000.0]);

const EUR_ADVENTURE: BudgetTiers = tiers([720.0, 1800.0], [1800.0, 4000.0], [4000.0, 8100.0], [8100.0, 16200.0]);
const EUR_HONEYMOON: BudgetTiers = tiers([1080.0, 2700.0], [2700.0, 5400.0], [5400.0, 10800.0], [10800.0, 22500.0]);
const EUR_LEISURE: BudgetTiers = tiers([450.0, 1300.0], [1300.0, 3200.0], [3200.0, 6800.0], [6800.0, 13500.0]);
const EUR_LUXURY: BudgetTiers = tiers([1800.0, 4500.0], [4500.0, 9000.0], [9000.0, 18000.0], [18000.0, 45000.0]);
const EUR_PILGRIM: BudgetTiers = tiers([270.0, 720.0], [720.0, 1800.0], [1800.0, 3600.0], [3600.0, 7200.0]);

const INR_ADVENTURE: BudgetTiers = tiers(
    [40000.0, 100000.0],
    [100000.0, 225000.0],
    [225000.0, 450000.0],
    [450000.0, 900000.0],
);
const INR_HONEYMOON: BudgetTiers = tiers(
    [60000.0, 150000.0],
    [150000.0, 300000.0],
    [300000.0, 600000.0],
    [600000.0, 1250000.0],
);
const INR_LEISURE: BudgetTiers = tiers(
    [25000.0, 75000.0],
    [75000.0, 175000.0],
    [175000.0, 375000.0],
    [375000.0, 750000.0],
);
const INR_LUXURY: BudgetTiers = tiers(
    [100000.0, 250000.0],
    [250000.0, 500000.0],
    [500000.0, 1000000.0],
    [1000000.0, 2500000.0],
);
const INR_PILGRIM: BudgetTiers = tiers(
    [15000.0, 40000.0],
    [40000.0, 100000.0],
    [100000.0, 200000.0],
    [200000.0, 400000.0],
);

pub fn budget_ranges(trip_type: TripType, currency: Currency) -> BudgetTiers {
    match (currency, trip_type) {
        (Currency::Usd, TripType::Adventure) => USD_ADVENTURE,
        (Currency::Usd, TripType::Honeymoon) => USD_HONEYMOON,
        (Currency::Usd, TripType::Luxury) => USD_LUXURY,
        (Currency::Usd, TripType::Pilgrim) => USD_PILGRIM,
        (Currency::Usd, TripType::Leisure | TripType::Others) => USD_LEISURE,

        (Currency::Eur, TripType::Adventure) => EUR_ADVENTURE,
        (Currency::Eur, TripType::Honeymoon) => EUR_HONEYMOON,
        (Currency::Eur, TripType::Luxury) => EUR_LUXURY,
        (Currency::Eur, TripType::Pilgrim) => EUR_PILGRIM,
        (Currency::Eur, TripType::Leisure | TripType::Others) => EUR_LEISURE,

        (Currency::Inr, TripType::Adventure) => INR_ADVENTURE,
        (Currency::Inr, TripType::Honeymoon) => INR_HONEYMOON,
        (Currency::Inr, TripType::Luxury) => INR_LUXURY,
        (Currency::Inr, TripType::Pilgrim) => INR_PILGRIM,
        (Currency::Inr, TripType::Leisure | TripType::Others) => INR_LEISURE,
    }
}

/// Range preselected by the wizard before the traveller picks a trip type.
pub fn default_budget_range(currency: Currency) -> [f64; 2] {
    budget_ranges(TripType::Leisure, currency).medium
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_others_matches_leisure() {
        for currency in [Currency::Usd, Currency::Eur, Currency::Inr] {
            assert_eq!(
                budget_ranges(TripType::Others, currency),
                budget_ranges(TripType::Leisure, currency)
            );
        }
    }

    #[test]
    fn test_default_range_is_leisure_medium() {
        assert_eq!(default_budget_range(Currency::Usd), [1500.0, 3500.0]);
        assert_eq!(default_budget_range(Currency::Eur), [1300.0, 3200.0]);
        assert_eq!(default_budget_range(Currency::Inr), [75000.0, 175000.0]);
    }

    #[test]
    fn test_tiers_are_contiguous() {
        let all_types = [
            TripType::Adventure,
            TripType::Honeymoon,
            TripType::Leisure,
            TripType::Luxury,
            TripType::Pilgrim,
            TripType::Others,
        ];
        for currency in [Currency::Usd, Currency::Eur, Currency::Inr] {
            for trip_type in all_types {
                let t = budget_ranges(trip_type, currency);
                assert_eq!(t.low[1], t.medium[0]);
                assert_eq!(t.medium[1], t.high[0]);
                assert_eq!(t.high[1], t.luxury[0]);
            }
        }
    }

    #[test]
    fn test_honeymoon_usd() {
        let t = budget_ranges(TripType::Honeymoon, Currency::Usd);
        assert_eq!(t.luxury, [12000.0, 25000.0]);
    }
}
