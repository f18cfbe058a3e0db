use std::{sync::Arc, time::Duration};

use filmlog::{
    app::{AppState, build_router},
    config::Config,
    db,
    store::MovieStore,
    tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmlog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("filmlog/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let tmdb =
        TmdbClient::new(http, config.tmdb_access_token.clone(), config.tmdb_base_url.clone());

    let state = Arc::new(AppState { catalog: Arc::new(tmdb), store });

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
