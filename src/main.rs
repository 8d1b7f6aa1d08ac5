use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use felicity_ems::auth::TokenVerifier;
use felicity_ems::config::Settings;
use felicity_ems::error::{handle_json_payload_error, handle_query_payload_error};
use felicity_ems::routes::{self, AppState};
use felicity_ems::{CatalogStore, Ranker, RankingWeights};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the [logging] section applies
    let settings = Settings::load();

    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .overridden_by(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&logging.level))
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Felicity EMS service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    // Load the document store
    let store = match settings.store.seed_path.as_deref() {
        Some(path) if std::path::Path::new(path).exists() => {
            CatalogStore::load_seed_file(path).map_err(|e| {
                error!("Failed to load seed {}: {}", path, e);
                io::Error::new(io::ErrorKind::InvalidData, e.to_string())
            })?
        }
        Some(path) => {
            info!("Seed file {} not found, starting with an empty store", path);
            CatalogStore::new()
        }
        None => CatalogStore::new(),
    };

    // Initialize ranker with configured weights
    let weights = RankingWeights::from(&settings.ranking.weights);
    let ranker = Ranker::new(weights);

    info!("Ranker initialized with weights: {:?}", weights);

    let email_policy = settings.accounts.email_policy();
    info!("Institute signups accepted for {}", email_policy.describe());

    // Build application state
    let app_state = AppState {
        store: Arc::new(store),
        ranker,
        verifier: Arc::new(TokenVerifier::new(&settings.auth.jwt_secret)),
        email_policy: Arc::new(email_policy),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
