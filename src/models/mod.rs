pub mod budget;
pub mod google_auth;
pub mod history;
pub mod places;
pub mod plan;
pub mod trip_request;
pub mod user;
