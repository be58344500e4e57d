mod config;
mod error;
mod routes;
mod state;
mod upstream;

#[tokio::main]
async fn main() {
    // A missing .env is normal in production; real env vars still apply.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let port = config.port;

    let keys = &config.keys;
    for (name, value) in [
        ("WEATHER_API_KEY", &keys.weather),
        ("GOOGLE_MAPS_API_KEY", &keys.google_maps),
        ("GEOAPIFY_API_KEY", &keys.geoapify),
        ("UNSPLASH_API_KEY", &keys.unsplash),
    ] {
        if value.is_none() {
            tracing::warn!(var = name, "API key not set; dependent routes will return 500");
        }
    }
    tracing::info!(public_dir = %config.public_dir.display(), "serving static assets");

    let http = reqwest::Client::builder()
        .build()
        .expect("failed to build HTTP client");
    let state = state::AppState::new(config, http);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "wayfarer listening");
    axum::serve(listener, app).await.expect("server failed");
}
