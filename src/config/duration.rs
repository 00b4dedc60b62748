//! Duration parsing utilities.

use anyhow::Context;
use es_client::KeepAlive;

/// Parse a duration string like "1h", "30m", "300s", "300" into seconds.
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration_to_secs(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    if let Some(num_str) = s.strip_suffix('h') {
        let hours: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid hours value: {num_str}"))?;
        return hours.checked_mul(3600).context("Duration too large");
    }
    if let Some(num_str) = s.strip_suffix('m') {
        let minutes: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid minutes value: {num_str}"))?;
        return minutes.checked_mul(60).context("Duration too large");
    }
    if let Some(num_str) = s.strip_suffix('s') {
        let secs: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid seconds value: {num_str}"))?;
        return Ok(secs);
    }

    s.parse::<u64>()
        .with_context(|| format!("Invalid duration value: {s}"))
}

/// Parse a scroll keep-alive. Zero is rejected since the cursor would expire
/// before the next fetch.
pub fn parse_keep_alive(s: &str) -> anyhow::Result<KeepAlive> {
    let secs = parse_duration_to_secs(s)?;
    if secs == 0 {
        anyhow::bail!("Keep-alive must be greater than zero: {s}");
    }
    Ok(KeepAlive::from_secs(secs))
}
