mod app;
mod config;
mod doc;
mod dtos;
mod error;
mod extract;
mod routes;
mod state;
mod utils;

use crate::{
    config::{Config, StoreKind},
    state::AppState,
    utils::shutdown::shutdown_signal,
};
use database::{
    InMemoryTermStore, SeaOrmTermStore, TermStore, db::create_connection, services::seed_store,
};
use identity::HttpIdentityClient;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn open_store(config: &Config) -> Result<Arc<dyn TermStore>, BoxError> {
    let store: Arc<dyn TermStore> = match config.store {
        StoreKind::Memory => {
            info!("Using the in-memory store");
            Arc::new(InMemoryTermStore::new())
        }
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL must be set")?;
            let db = create_connection(database_url).await?;

            if config.run_migrations {
                Migrator::up(&db, None).await?;
                info!("Database migrations applied");
            }

            Arc::new(SeaOrmTermStore::new(db))
        }
    };

    if config.seed_data {
        seed_store(store.as_ref()).await?;
    }

    Ok(store)
}

async fn run() -> Result<(), BoxError> {
    let config = Config::from_env()?;

    let store = open_store(&config).await?;
    let identity = HttpIdentityClient::new(
        config.user_service_urls.clone(),
        config.identity_timeout,
    )?;
    info!("Authorizing hosts against {:?}", identity.upstreams());

    let state = AppState::new(store, Arc::new(identity));
    let app = app::router(state, app::cors_layer(&config.cors_allowed_origin)?);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Running axum on http://{}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        error!("Server failed: {err}");
        std::process::exit(1);
    }
}
