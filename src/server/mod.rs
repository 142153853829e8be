//! Server initialization and routing

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::middleware::auth::{authorization_gate, AuthGate};
use crate::middleware::error_response::standard_error_responses;
use crate::repository::{CondominiumRepositoryImpl, MachineRepositoryImpl};
use crate::service::{CondominiumService, MachineService};
use crate::state::HasServices;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub machine_service: Arc<MachineService<MachineRepositoryImpl, CondominiumRepositoryImpl>>,
    pub condominium_service: Arc<CondominiumService<CondominiumRepositoryImpl>>,
}

impl HasServices for AppState {
    type MachineRepo = MachineRepositoryImpl;
    type CondominiumRepo = CondominiumRepositoryImpl;

    fn machine_service(&self) -> &MachineService<Self::MachineRepo, Self::CondominiumRepo> {
        &self.machine_service
    }

    fn condominium_service(&self) -> &CondominiumService<Self::CondominiumRepo> {
        &self.condominium_service
    }

    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send {
        let pool = self.db_pool.clone();
        async move { sqlx::query("SELECT 1").execute(&pool).await.is_ok() }
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Create repositories and services
    let condominium_repo = Arc::new(CondominiumRepositoryImpl::new(db_pool.clone()));
    let machine_repo = Arc::new(MachineRepositoryImpl::new(db_pool.clone()));

    let machine_service = Arc::new(MachineService::new(
        machine_repo,
        condominium_repo.clone(),
    ));
    let condominium_service = Arc::new(CondominiumService::new(condominium_repo));

    let gate = AuthGate::from_config(&config)?;

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        machine_service,
        condominium_service,
    };

    let app = build_router(state, gate);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with a generic state type.
///
/// Generic so it works with both the production `AppState` and test states
/// implementing `HasServices`.
pub fn build_router<S: HasServices>(state: S, gate: AuthGate) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Access endpoints
        .route("/", get(api::access::index))
        .route("/home", get(api::access::home))
        .route("/farewell", get(api::access::farewell))
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Machine endpoints
        .route(
            "/machines",
            get(api::machine::list::<S>)
                .post(api::machine::create::<S>)
                .put(api::machine::update::<S>),
        )
        .route(
            "/machines/identifier",
            get(api::machine::get_by_identifier::<S>),
        )
        .route(
            "/machines/{id}",
            get(api::machine::get::<S>).delete(api::machine::delete::<S>),
        )
        // Condominium endpoints
        .route(
            "/condominiums",
            get(api::condominium::list::<S>).post(api::condominium::create::<S>),
        )
        .route("/condominiums/{id}", get(api::condominium::get::<S>))
        .fallback(api::access::not_found)
        // Add middleware; the envelope layer sits outside the gate so gate
        // rejections carry the request path too.
        .layer(axum::middleware::from_fn_with_state(gate, authorization_gate))
        .layer(axum::middleware::from_fn(standard_error_responses))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
