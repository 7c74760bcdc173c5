//! chanbind - load channel bindings from config and report the registry.

use anyhow::Context;
use chanbind::config::{self, Config};
use chanbind::registry::{MemoryRegistry, Registry};
use chanbind::{ChannelActions, metrics, seed, telemetry};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "chanbind.toml".to_string());

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    telemetry::init_tracing(&config.logging);

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        service = %config.service.name,
        bindings = config.bindings.len(),
        "Starting chanbind"
    );

    if config.service.metrics {
        metrics::init();
        info!("Metrics initialized");
    } else {
        info!("Metrics disabled");
    }

    let registry = Arc::new(MemoryRegistry::new());
    let actions = ChannelActions::new(registry.clone());

    seed::apply_bindings(&actions, &config.bindings)
        .await
        .context("failed to apply seed bindings")?;

    for channel in registry.list_channels().await? {
        let members = registry.list_memberships(channel.id).await?;
        let admins = members.iter().filter(|m| m.is_admin).count();
        info!(
            id = channel.id,
            channel = %channel.name,
            project = %channel.project,
            restricted = channel.restricted,
            admins,
            members = members.len(),
            "Channel binding"
        );
    }
    info!(channels = registry.channel_count(), "Registry loaded");

    Ok(())
}
