//! Backend entry-point: wires configuration, migrations, persistence,
//! and the HTTP surface.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{AuthService, DeliveryService, ParcelQueryService, TokenIssuer};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselDeliveryRepository, DieselParcelRepository, DieselUserRepository, PoolConfig,
};
use backend::outbound::storage::FsPhotoStore;
use backend::server::{AppSettings, api_routes, cors_policy};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run pending migrations on a dedicated blocking thread.
async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&url)
                .map_err(|err| std::io::Error::other(format!("database connection: {err}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| std::io::Error::other(format!("migrations: {err}")))?;
        Ok(())
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task: {err}")))?
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("configuration: {err}")))?;
    let token_secret = settings.token_secret().map_err(std::io::Error::other)?;

    run_migrations(settings.database_url()).await?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()).with_max_size(settings.db_pool_size),
    )
    .await
    .map_err(|err| std::io::Error::other(format!("connection pool: {err}")))?;

    let uploads_dir = settings.uploads_dir();
    let photos = FsPhotoStore::new(&uploads_dir, "/uploads")
        .await
        .map_err(|err| std::io::Error::other(format!("uploads directory: {err}")))?;

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let parcels = Arc::new(DieselParcelRepository::new(pool.clone()));
    let deliveries = Arc::new(DieselDeliveryRepository::new(pool));
    let tokens = TokenIssuer::new(&token_secret, settings.token_ttl_minutes);

    let state = HttpState::new(
        Arc::new(AuthService::new(users, tokens)),
        Arc::new(ParcelQueryService::new(parcels.clone())),
        Arc::new(DeliveryService::new(
            parcels,
            deliveries,
            Arc::new(photos),
        )),
    );

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let bind_addr = settings.bind_addr().to_owned();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .wrap(cors_policy())
            .wrap(Trace)
            .configure(api_routes(state.clone(), uploads_dir.clone()))
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.route(
            "/api-docs/openapi.json",
            web::get().to(|| async { web::Json(ApiDoc::openapi()) }),
        );

        app
    })
    .bind(&bind_addr)?;

    info!(addr = %bind_addr, "server listening");
    health_state.mark_ready();
    server.run().await
}
