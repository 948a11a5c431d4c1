use log::{error, info};
use video_recipe_import::{build_app, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }
    info!(
        "Store backend: {}, daily recipe limit (not enforced): {}",
        config.store.backend, config.rate_limit.max_recipes_per_day
    );

    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.server.bind.as_str()).await?;
    info!("Listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
