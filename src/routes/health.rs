use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::AppConfig;
use crate::services::history_service::HistoryStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: BTreeMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn error(details: String) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details),
        }
    }
}

/*
    /health
*/
pub async fn liveness() -> impl Responder {
    "OK"
}

/*
    /api/health
*/
pub async fn health_check(
    store: web::Data<HistoryStore>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mut services = BTreeMap::new();
    services.insert("mongodb".to_string(), check_mongodb(&store).await);
    services.insert(
        "google_maps".to_string(),
        check_key("Google Maps API key", &config.maps_api_key),
    );
    services.insert(
        "gemini".to_string(),
        check_key("Gemini API key", &config.gemini_api_key),
    );
    services.insert("google_auth".to_string(), check_google_auth(&config));

    let status = if services.values().all(|s| s.status == "ok") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_mongodb(store: &HistoryStore) -> ServiceStatus {
    match store.ping().await {
        Ok(_) => ServiceStatus::ok("Connected successfully to MongoDB".to_string()),
        Err(e) => {
            log::error!("MongoDB health check failed: {}", e);
            ServiceStatus::error(format!("Failed to connect: {}", e))
        }
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

fn check_key(label: &str, key: &str) -> ServiceStatus {
    if key.is_empty() {
        ServiceStatus::error(format!("{} not configured", label))
    } else {
        ServiceStatus::ok(format!("{} configured ({})", label, mask(key)))
    }
}

fn check_google_auth(config: &AppConfig) -> ServiceStatus {
    match &config.google_oauth {
        Some(oauth) => ServiceStatus::ok(format!(
            "Google Auth configured, Client ID: {}, Redirect: {}",
            mask(&oauth.client_id),
            oauth.redirect_uri
        )),
        None => ServiceStatus::error(
            "Missing configuration: GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET, GOOGLE_REDIRECT_URI"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("AIzaSyD-1234567890"), "AIza***7890");
        assert_eq!(mask("short"), "***");
    }

    #[test]
    fn test_check_key() {
        assert_eq!(check_key("Gemini API key", "").status, "error");
        let ok = check_key("Gemini API key", "AIzaSyD-1234567890");
        assert_eq!(ok.status, "ok");
        assert_eq!(
            ok.details.as_deref(),
            Some("Gemini API key configured (AIza***7890)")
        );
    }
}
