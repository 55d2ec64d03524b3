//! `xcms-bridge run` — start the bridge.
//!
//! Loads configuration, applies CLI/env overrides, prints the tunnel
//! options banner and serves the front door until Ctrl+C / SIGTERM.

use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::model::Config;
use crate::config::{self, validation, ConfigOrigin};
use crate::error::BridgeError;
use crate::logging;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), BridgeError> {
    logging::init(
        &args.log_level,
        logging::resolve_format(args.pretty, args.json),
    );

    let (config, origin) = resolve_config(&args).await?;

    if !args.no_banner {
        println!("{}", banner(&config));
    }

    let state = Arc::new(AppState::from_config(&config));
    let router = server::build_router(state, config.max_body);

    let listener =
        tokio::net::TcpListener::bind((config.listen.host.as_str(), config.listen.port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!(
        addr = %addr,
        backend = %config.backend,
        timeout_ms = config.timeout,
        config = %origin,
        "xcms-bridge started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("xcms-bridge stopped");
    Ok(())
}

/// Load the config, apply overrides, then validate the merged result.
pub async fn resolve_config(args: &RunArgs) -> Result<(Config, ConfigOrigin), BridgeError> {
    let (mut config, origin) = config::load(args.config.as_deref()).await?;
    apply_overrides(&mut config, args);

    validation::validate(&config).map_err(|errors| BridgeError::ConfigValidation { errors })?;
    Ok((config, origin))
}

/// Flags and environment variables win over the config file.
pub fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(ref host) = args.host {
        config.listen.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.listen.port = port;
    }
    if let Some(ref host) = args.backend_host {
        config.backend.host.clone_from(host);
    }
    if let Some(port) = args.backend_port {
        config.backend.port = port;
    }
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }
    if let Some(max_body) = args.max_body {
        config.max_body = max_body;
    }
}

/// Static description of the ways to expose the bridge. Nothing here is
/// acted on automatically.
#[must_use]
pub fn banner(config: &Config) -> String {
    let port = config.listen.port;
    let subdomain = &config.tunnel.subdomain;
    format!(
        "\n  ==========================================\n  \
         xcms-bridge v{version}\n  \
         forwarding {prefix}/* -> {backend}\n  \
         ==========================================\n\n  \
         Expose the bridge:\n    \
         1. ngrok (account required, more stable)\n         \
         xcms-bridge tunnel ngrok -p {port}\n    \
         2. localtunnel (free)\n         \
         xcms-bridge tunnel localtunnel -p {port} --subdomain {subdomain}\n    \
         3. local only: nothing to do\n",
        version = env!("CARGO_PKG_VERSION"),
        prefix = crate::proxy::PROXY_PREFIX,
        backend = config.backend.base_url(),
    )
}
