pub mod cost_service;
pub mod enrichment_service;
pub mod export_service;
pub mod gemini_service;
pub mod google_auth_service;
pub mod history_service;
pub mod maps_service;
pub mod places_service;
pub mod prompt_service;
pub mod retry;
pub mod trip_planner_service;
