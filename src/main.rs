use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travel_optimizer_api::config::AppConfig;
use travel_optimizer_api::db::mongo::create_mongo_client;
use travel_optimizer_api::services::history_service::HistoryStore;
use travel_optimizer_api::services::trip_planner_service::TripPlanner;

fn cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url.trim_end_matches('/'))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = create_mongo_client(&config.mongodb_uri, &config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let store = web::Data::new(HistoryStore::new(&client, &config.database));

    let planner = TripPlanner::from_config(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let planner = web::Data::new(planner);

    if config.google_oauth.is_none() {
        log::warn!("Google OAuth is not configured; sign-in routes will answer 503");
    }

    let bind = (config.host.clone(), config.port);
    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let jwt_secret = config.jwt_secret.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&config.frontend_url))
            .app_data(config.clone())
            .app_data(store.clone())
            .app_data(planner.clone())
            .configure(|cfg| travel_optimizer_api::configure_app(cfg, &jwt_secret))
    })
    .bind(bind)?
    .run()
    .await
}
