//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    AddressService, AddressServiceImpl, CustomerService, CustomerServiceImpl, DishService,
    DishServiceImpl,
};
use crate::config::{DatabaseBackend, Settings};
use crate::domain::UnitOfWork;
use crate::infrastructure::database::{self, PgUnitOfWork};
use crate::infrastructure::memory::MemoryUnitOfWork;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn UnitOfWork>,
    pub dishes: Arc<dyn DishService>,
    pub customers: Arc<dyn CustomerService>,
    pub addresses: Arc<dyn AddressService>,
}

impl AppState {
    /// Wire the services on top of a unit of work.
    pub fn new(db: Arc<dyn UnitOfWork>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            dishes: Arc::new(DishServiceImpl::new(db.clone(), id_generator.clone())),
            customers: Arc::new(CustomerServiceImpl::new(db.clone(), id_generator.clone())),
            addresses: Arc::new(AddressServiceImpl::new(db.clone(), id_generator)),
            db,
        }
    }
}

/// Build the router with its middleware stack.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(&settings.cors))
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db: Arc<dyn UnitOfWork> = match settings.database.backend {
            DatabaseBackend::Postgres => {
                let pool = database::create_pool(&settings.database)
                    .await
                    .context("failed to connect to PostgreSQL")?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }
                Arc::new(PgUnitOfWork::from_pool(pool))
            }
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Arc::new(MemoryUnitOfWork::new())
            }
        };

        let id_generator = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id,
            settings.snowflake.epoch,
        ));

        let state = AppState::new(db, id_generator);
        let router = build_router(state, &settings);

        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until Ctrl+C
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
