pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use actix_web::web;

use crate::error::ApiError;
use crate::middleware::auth::AuthMiddleware;

/// Registers every route. Shared state (`AppConfig`, `HistoryStore`,
/// `TripPlanner`) is expected as `web::Data` on the app.
pub fn configure_app(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid query: {}", err)).into()
    }))
    .route("/health", web::get().to(routes::health::liveness))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/auth")
                    .route("/google", web::get().to(routes::auth::google_auth_init))
                    .route(
                        "/google/callback",
                        web::get().to(routes::auth::google_auth_callback),
                    )
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware::new(jwt_secret))
                            .route("/session", web::get().to(routes::auth::user_session)),
                    ),
            )
            .route(
                "/places/autocomplete",
                web::get().to(routes::places::autocomplete),
            )
            .route(
                "/budget-ranges",
                web::get().to(routes::budget::get_budget_ranges),
            )
            .route("/trips/optimize", web::post().to(routes::trips::optimize))
            .route(
                "/trips/cost-breakdown",
                web::post().to(routes::trips::cost_breakdown),
            )
            // Protected routes
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route("/searches", web::get().to(routes::itineraries::list_searches))
                    .route(
                        "/itineraries",
                        web::get().to(routes::itineraries::list_itineraries),
                    )
                    .service(
                        web::resource("/itineraries/{id}")
                            .route(web::get().to(routes::itineraries::get_itinerary))
                            .route(web::delete().to(routes::itineraries::delete_itinerary)),
                    )
                    .route(
                        "/itineraries/{id}/favorite",
                        web::put().to(routes::itineraries::set_favorite),
                    )
                    .route(
                        "/itineraries/{id}/export",
                        web::get().to(routes::itineraries::export_itinerary),
                    ),
            ),
    );
}
