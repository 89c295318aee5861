use std::{env, net::SocketAddr, sync::Arc};

use flux_studio_api::{app::env::Envy, replicate::service::ReplicateClient, router, AppState};

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // properties
    let port = envy.port.to_owned().unwrap_or(3000);
    let replicate = ReplicateClient::from_envy(reqwest::Client::new(), &envy);

    let state = AppState::new(envy, Arc::new(replicate)).expect("failed to build http client");

    // app
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
