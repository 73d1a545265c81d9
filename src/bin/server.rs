use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_summarizer::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,web_summarizer=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (reads .env before anything else touches the environment)
    let config = Config::load()?;
    let server_addr = config.server_addr;
    tracing::info!(
        model = %config.generation.model_id,
        max_input_chars = config.max_input_chars,
        "Configuration loaded"
    );

    let app_state = AppState::from_config(config);
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
