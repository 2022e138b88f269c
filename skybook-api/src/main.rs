use std::net::SocketAddr;
use std::sync::Arc;

use skybook_api::{
    app,
    state::{AppState, AuthConfig},
};
use skybook_store::{
    DbClient, PostgresBookingRepository, PostgresCatalogRepository, PostgresFlightRepository,
    PostgresOrderRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skybook_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skybook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Skybook API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let app_state = AppState {
        flights: Arc::new(PostgresFlightRepository::new(db.pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(db.pool.clone())),
        orders: Arc::new(PostgresOrderRepository::new(db.pool.clone())),
        catalog: Arc::new(PostgresCatalogRepository::new(db.pool.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
