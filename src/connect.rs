use crate::StoreOpts;
use anyhow::Context;
use es_client::{HttpStore, SearchStore};

// Connect to the store and verify it answers
pub async fn connect(opts: &StoreOpts) -> anyhow::Result<HttpStore> {
    let store = HttpStore::new(&opts.host)
        .with_context(|| format!("Failed to create client for {}", opts.host))?;
    check_connectivity(&store).await?;
    Ok(store)
}

/// Ping the store root. Only an unreachable store is an error; any answer,
/// whatever its status, is logged and accepted.
pub async fn check_connectivity<S: SearchStore + ?Sized>(store: &S) -> anyhow::Result<()> {
    let ping = store
        .ping()
        .await
        .context("Connectivity check failed")?;

    if !ping.is_success() {
        tracing::warn!(
            "Connectivity check returned status {}: {}",
            ping.status,
            ping.body
        );
        return Ok(());
    }

    match ping.banner() {
        Some(banner) => tracing::info!(
            "Connected to cluster '{}' (node '{}', version {})",
            banner.cluster_name.as_deref().unwrap_or("unknown"),
            banner.name.as_deref().unwrap_or("unknown"),
            banner.version_number().unwrap_or("unknown")
        ),
        None => tracing::info!("{}", ping.body),
    }
    Ok(())
}
