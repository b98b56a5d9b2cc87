use axum::routing::{get, post};
use axum::Router;
use roastmytaste_app::infrastructure::db;
use roastmytaste_app::AppContext;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

mod config;
mod routes;
mod session;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let app_config = config::AppConfig::from_env();

    let db = db::create_connection(&app_config.database_url)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&db)
        .await
        .expect("Failed to run migrations");

    let app_context = AppContext::from_env(db);

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    let app = Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/api/ping", get(routes::ping))
        .route("/api/auth/status", get(routes::auth_status))
        .route("/api/roast", post(routes::generate_roast))
        .route("/api/roast/public", get(routes::get_public_roasts))
        .route("/api/roast/history", get(routes::get_history))
        .route("/api/roast/mine", get(routes::get_my_roasts))
        .route("/api/roast/{id}", get(routes::get_roast))
        .route("/auth/google/login", get(routes::google_login))
        .route("/auth/google/callback", get(routes::google_callback))
        .route("/auth/spotify/login", get(routes::spotify_login))
        .route("/auth/spotify/callback", get(routes::spotify_callback))
        .route("/auth/spotify/logout", get(routes::spotify_logout))
        .route("/auth/logout", get(routes::logout))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(app_context);

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
