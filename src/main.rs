use anyhow::Result;
use std::sync::Arc;

use commit2act::backend::factory::{create_backend, resolve_endpoint, ENDPOINT_ENV};
use commit2act::backend::identity::{IdentityProvider, SessionIdentity};
use commit2act::backend::Backend;
use commit2act::config::Config;
use commit2act::constants::{ERROR_NOT_SIGNED_IN, ERROR_NO_ENDPOINT};
use commit2act::logger::Logger;
use commit2act::ui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = Config::load()?;

    let logger = Logger::from_config(config.logging.enabled)?;
    logger.install(log::LevelFilter::Debug)?;
    log::info!("Starting commit2act {}", env!("CARGO_PKG_VERSION"));

    // Check that an endpoint is configured
    if resolve_endpoint(&config.api).is_none() {
        eprintln!("{}", ERROR_NO_ENDPOINT);
        eprintln!("\n💡 To use this app:");
        eprintln!("1. Run `commit2act --generate-config` to write a default configuration file");
        eprintln!("2. Set [api] endpoint, or export {}=https://...", ENDPOINT_ENV);
        eprintln!("3. Export your API key as {}", config.api.api_key_env);
        return Ok(());
    }

    let backend: Arc<dyn Backend> = Arc::from(create_backend(&config.api)?);
    log::info!("Using {} backend", backend.backend_type());

    let identity = SessionIdentity::from_config(&config.identity);
    let Some(user) = identity.current_user().await? else {
        eprintln!("{}", ERROR_NOT_SIGNED_IN);
        return Ok(());
    };

    // Run the TUI application
    ui::run_app(&config, backend, user, logger).await?;

    Ok(())
}
