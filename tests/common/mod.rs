#![allow(dead_code)]

use actix_web::{web, App};
use httpmock::MockServer;
use mongodb::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use travel_optimizer_api::config::AppConfig;
use travel_optimizer_api::configure_app;
use travel_optimizer_api::middleware::auth::issue_token;
use travel_optimizer_api::services::history_service::HistoryStore;
use travel_optimizer_api::services::retry::BackoffPolicy;
use travel_optimizer_api::services::trip_planner_service::TripPlanner;

pub const JWT_SECRET: &str = "test-secret";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

/// App wired exactly like the binary, with every Google endpoint pointed at
/// a local mock server. MongoDB is never reached: the client is lazy and
/// tests only exercise paths that fail before a query.
pub struct TestApp {
    pub config: AppConfig,
    pub mock: MockServer,
    pub store: HistoryStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    pub async fn with_vars(extra: &[(&str, &str)]) -> Self {
        let mock = MockServer::start_async().await;
        let base = mock.base_url();

        let mut vars: HashMap<String, String> = HashMap::new();
        for (k, v) in [
            ("MONGODB_URI", "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200"),
            ("MONGODB_DATABASE", "TravelOptimizerTest"),
            ("JWT_SECRET", JWT_SECRET),
            ("GOOGLE_API_KEY", "test-key"),
            ("MAPS_BASE_URL", base.as_str()),
            ("PLACES_BASE_URL", base.as_str()),
            ("GEMINI_BASE_URL", base.as_str()),
        ] {
            vars.insert(k.to_string(), v.to_string());
        }
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }

        let config = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        let client = Client::with_uri_str(&config.mongodb_uri).await.unwrap();
        let store = HistoryStore::new(&client, &config.database);

        Self {
            config,
            mock,
            store,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let planner = TripPlanner::from_config(&self.config)
            .unwrap()
            .with_backoff(BackoffPolicy {
                max_attempts: 3,
                base_delay: Duration::from_millis(5),
            });
        let secret = self.config.jwt_secret.clone();

        App::new()
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(planner))
            .configure(move |cfg| configure_app(cfg, &secret))
    }

    pub fn token(&self) -> String {
        issue_token(JWT_SECRET, "asha@example.com", "65f1a2b3c4d5e6f708192a3b").unwrap()
    }
}

pub fn trip_request_json() -> Value {
    json!({
        "source": "Mumbai",
        "destination": "Jaipur",
        "startDate": "2025-03-10",
        "endDate": "2025-03-11",
        "tripType": "leisure",
        "budgetRange": [75000, 175000],
        "currency": "INR",
        "foodDining": "pure-veg"
    })
}

pub fn plan_json() -> Value {
    json!({
        "optimalDates": "2025-03-10 to 2025-03-11",
        "alternativeDestinations": "",
        "reasoning": "Pleasant weather",
        "placesToVisit": ["Hawa Mahal", "Amber Fort"],
        "totalEstimatedCostPerPerson": 30000,
        "currency": "INR",
        "cheapestFlight": { "airline": "IndiGo", "price": 9000, "details": "Non-stop" },
        "recommendedActivities": [{ "name": "Amber Fort", "description": "Fort", "price": 500 }],
        "localTransportation": [{ "type": "Auto", "estimatedCost": "₹200", "details": "Haggle" }],
        "itinerary": [
            {
                "day": 1,
                "title": "Arrival",
                "activities": [
                    { "time": "10:00 AM", "activity": "Hotel Check-in", "description": "Settle in" },
                    { "time": "2:00 PM", "activity": "Hawa Mahal", "description": "Palace of winds" }
                ]
            },
            {
                "day": 2,
                "title": "Forts",
                "activities": [
                    { "time": "9:00 AM", "activity": "Amber Fort", "description": "Hilltop fort" }
                ]
            }
        ]
    })
}

pub fn gemini_reply(plan: &Value) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": plan.to_string() }] },
            "finishReason": "STOP"
        }]
    })
}
