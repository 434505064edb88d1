use std::env;

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "TravelOptimizer";
const GEMINI_MODEL: &str = "gemini-2.0-flash";
const FRONTEND_URL: &str = "http://localhost:3000";

pub const MAPS_BASE_URL: &str = "https://maps.googleapis.com";
pub const PLACES_BASE_URL: &str = "https://places.googleapis.com";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub jwt_secret: String,
    pub maps_api_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub maps_base_url: String,
    pub places_base_url: String,
    pub gemini_base_url: String,
    pub google_oauth: Option<GoogleOAuthConfig>,
    pub frontend_url: String,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => PORT,
        };

        let maps_api_key = require("GOOGLE_API_KEY")?;
        let gemini_api_key = get("GEMINI_API_KEY").unwrap_or_else(|| maps_api_key.clone());

        let google_oauth = match (
            get("GOOGLE_CLIENT_ID"),
            get("GOOGLE_CLIENT_SECRET"),
            get("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(GoogleOAuthConfig {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            mongodb_uri: require("MONGODB_URI")?,
            database: get("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            jwt_secret: require("JWT_SECRET")?,
            maps_api_key,
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
            maps_base_url: get("MAPS_BASE_URL").unwrap_or_else(|| MAPS_BASE_URL.to_string()),
            places_base_url: get("PLACES_BASE_URL").unwrap_or_else(|| PLACES_BASE_URL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            google_oauth,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| FRONTEND_URL.to_string()),
            environment: get("RUST_ENV").unwrap_or_else(|| "development".to_string()),
        })
    }
}
