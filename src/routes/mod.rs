pub mod auth;
pub mod budget;
pub mod health;
pub mod itineraries;
pub mod places;
pub mod trips;
