use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{error, info, warn};

use sg_api::{create_app, AppState};
use sg_core::repositories::{InMemoryRevocationStore, RevocationStore};
use sg_core::services::{RevocationSweepConfig, RevocationSweeper, TokenService, TokenServiceConfig};
use sg_infra::cache::RedisRevocationStore;
use sg_shared::config::{AppConfig, RevocationBackend};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // logger is configured from this config, so report directly
            eprintln!("Failed to load configuration: {}", e);
            return Err(startup_error(e));
        }
    };

    // Initialize logger
    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .init();

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(startup_error(e));
    }

    if config.jwt.is_using_default_secret() {
        warn!("Using the development JWT secret; set JWT_PRIVATE_KEY before deploying");
    }

    info!(
        "Starting SessionGate in {} mode with {} revocation store",
        config.environment, config.revocation.backend
    );

    match config.revocation.backend {
        RevocationBackend::Memory => run(config, InMemoryRevocationStore::new()).await,
        RevocationBackend::Redis => {
            let store = RedisRevocationStore::connect(&config.revocation.redis)
                .await
                .map_err(|e| {
                    error!("Failed to initialise Redis revocation store: {}", e);
                    startup_error(e)
                })?;
            run(config, store).await
        }
    }
}

/// Wire the token service around `store` and serve until shutdown
async fn run<S>(config: AppConfig, store: S) -> io::Result<()>
where
    S: RevocationStore + 'static,
{
    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt).map_err(|e| {
        error!("{}", e);
        startup_error(e)
    })?;
    let token_service = Arc::new(TokenService::new(store, token_config).map_err(|e| {
        error!("{}", e);
        startup_error(e)
    })?);

    let sweeper = Arc::new(RevocationSweeper::new(
        token_service.clone(),
        RevocationSweepConfig::from(&config.revocation),
    ));
    sweeper.start_background_task();

    let state = web::Data::new(AppState::new(token_service, config.revocation.backend));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}
