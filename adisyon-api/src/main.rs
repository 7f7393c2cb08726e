use std::net::SocketAddr;

use adisyon_api::{app, AppState};
use adisyon_engine::OrderEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "adisyon_api=debug,adisyon_engine=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = adisyon_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Adisyon API on port {}", config.server.port);

    let db = adisyon_store::Db::connect(&config.database.url)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");
    adisyon_store::seed::ensure_demo_data(&db)
        .await
        .expect("Failed to seed demo data");

    let app_state = AppState {
        engine: OrderEngine::new(db),
    };
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
