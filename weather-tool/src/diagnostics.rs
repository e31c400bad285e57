//! Optional network probes logged before a lookup.
//!
//! Nothing here affects the lookup itself: every outcome is only logged.

use std::time::Duration;

use reqwest::Url;
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};

use crate::Config;

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Resolve both configured hosts and dump the system resolver configuration.
///
/// Each DNS lookup is bounded by the configured request timeout.
pub async fn probe(config: &Config) {
    for base in [&config.geocoding_url, &config.forecast_url] {
        probe_host(base, config.timeout()).await;
    }
    log_resolver_config(RESOLV_CONF).await;
}

#[instrument(skip(limit))]
async fn probe_host(base_url: &str, limit: Duration) {
    let Some((host, port)) = host_and_port(base_url) else {
        warn!("Cannot extract host from base url");
        return;
    };

    let lookup = timeout(limit, tokio::net::lookup_host((host.as_str(), port))).await;
    match lookup {
        Ok(Ok(addrs)) => {
            let addrs: Vec<String> = addrs.map(|a| a.ip().to_string()).collect();
            debug!(%host, addresses = ?addrs, "DNS resolution succeeded");
        }
        Ok(Err(e)) => error!(%host, error = %e, "DNS resolution failed"),
        Err(_) => error!(%host, timeout = ?limit, "DNS resolution timed out"),
    }
}

async fn log_resolver_config(path: &str) {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => debug!(path, contents = %contents.trim(), "Resolver configuration"),
        Err(e) => error!(path, error = %e, "Failed to read resolver configuration"),
    }
}

fn host_and_port(base_url: &str) -> Option<(String, u16)> {
    let url = Url::parse(base_url).ok()?;
    let host = url.host_str()?.to_string();
    let port = url.port_or_known_default()?;
    Some((host, port))
}
