// Keep-alive pinger for the hosted deployment.
//
// Free-tier hosts spin services down after a period without traffic. Running
// `claimsense keep-alive` on a schedule pings each deployed service's root
// endpoint so the first real user doesn't hit a cold start.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, warn};

/// Per-request timeout.
pub const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// A deployed service to keep warm.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceTarget {
    pub name: String,
    pub url: String,
}

impl ServiceTarget {
    /// Build a target from a base URL, naming it by host.
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        let name = match reqwest::Url::parse(trimmed) {
            Ok(parsed) => match (parsed.host_str(), parsed.port()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                (None, _) => trimmed.to_string(),
            },
            Err(_) => trimmed.to_string(),
        };
        Self {
            name,
            url: format!("{trimmed}/"),
        }
    }
}

/// What happened when a service was pinged.
#[derive(Debug, Clone, PartialEq)]
pub enum PingOutcome {
    /// 2xx response
    Success(u16),
    /// Any other HTTP status: the service is up but unhappy
    Warning(u16),
    Error(String),
    Timeout,
}

impl PingOutcome {
    /// Classify an HTTP status code.
    pub fn from_status(code: u16) -> Self {
        if (200..300).contains(&code) {
            PingOutcome::Success(code)
        } else {
            PingOutcome::Warning(code)
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PingOutcome::Error(_) | PingOutcome::Timeout)
    }
}

/// One ping result.
#[derive(Debug, Clone)]
pub struct PingReport {
    pub target: ServiceTarget,
    pub outcome: PingOutcome,
    pub at: DateTime<Utc>,
}

/// Tally of a keep-alive run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepAliveSummary {
    pub successful: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl KeepAliveSummary {
    pub fn from_reports(reports: &[PingReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                PingOutcome::Success(_) => summary.successful += 1,
                PingOutcome::Warning(_) => summary.warnings += 1,
                PingOutcome::Error(_) | PingOutcome::Timeout => summary.errors += 1,
            }
        }
        summary
    }
}

/// HTTP client with the keep-alive timeout applied.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent("claimsense-keepalive/0.1")
        .timeout(PING_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Ping one service.
pub async fn ping(client: &Client, target: &ServiceTarget) -> PingReport {
    debug!(service = %target.name, url = %target.url, "Pinging service");

    let outcome = match client.get(&target.url).send().await {
        Ok(response) => PingOutcome::from_status(response.status().as_u16()),
        Err(e) if e.is_timeout() => PingOutcome::Timeout,
        Err(e) => PingOutcome::Error(e.to_string()),
    };

    if outcome.is_failure() {
        warn!(service = %target.name, outcome = ?outcome, "Keep-alive ping failed");
    }

    PingReport {
        target: target.clone(),
        outcome,
        at: Utc::now(),
    }
}

/// Ping every target in order. Failures are reported, not returned as errors.
pub async fn run(client: &Client, targets: &[ServiceTarget]) -> Vec<PingReport> {
    let mut reports = Vec::with_capacity(targets.len());
    for target in targets {
        reports.push(ping(client, target).await);
    }
    reports
}
