//! Ramp-up load generator for `POST /shorten`.
//!
//! Concurrency starts at `initial_concurrency` and grows by `step_size` every
//! `ramp_interval` until the error rate of a level exceeds `max_error_rate`
//! or `max_concurrency` is reached. A request is an error when it fails at
//! transport level (including the per-request timeout) or returns a status
//! of 500 or above.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Parameters of a ramp-up run.
#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub target: String,
    /// URL posted in every request body.
    pub url: String,
    pub initial_concurrency: usize,
    pub step_size: usize,
    pub ramp_interval: Duration,
    pub max_error_rate: f64,
    pub request_timeout: Duration,
    pub max_concurrency: Option<usize>,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            target: "http://localhost:8080/shorten".to_string(),
            url: "http://example.com".to_string(),
            initial_concurrency: 10,
            step_size: 50,
            ramp_interval: Duration::from_secs(5),
            max_error_rate: 0.05,
            request_timeout: Duration::from_secs(2),
            max_concurrency: None,
        }
    }
}

impl LoadTestConfig {
    /// Checks the parameters before any traffic is sent.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.initial_concurrency == 0 {
            anyhow::bail!("initial concurrency must be at least 1");
        }
        if self.step_size == 0 {
            anyhow::bail!("step size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.max_error_rate) {
            anyhow::bail!(
                "max error rate must be between 0 and 1, got {}",
                self.max_error_rate
            );
        }
        if self.ramp_interval.is_zero() {
            anyhow::bail!("ramp interval must be greater than 0");
        }
        if let Some(cap) = self.max_concurrency
            && cap < self.initial_concurrency
        {
            anyhow::bail!(
                "max concurrency ({}) is below initial concurrency ({})",
                cap,
                self.initial_concurrency
            );
        }
        Ok(())
    }
}

/// Aggregated results of one concurrency level.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMetrics {
    pub concurrency: usize,
    pub total_requests: u64,
    pub errors: u64,
    pub elapsed: Duration,
    pub requests_per_second: f64,
    pub avg_latency_ms: f64,
    pub error_rate: f64,
}

impl LoadMetrics {
    /// Derives rates from raw counters. With zero requests, latency and
    /// error rate are both 0.
    pub fn from_totals(
        concurrency: usize,
        total_requests: u64,
        errors: u64,
        total_latency: Duration,
        elapsed: Duration,
    ) -> Self {
        let secs = elapsed.as_secs_f64();
        let requests_per_second = if secs > 0.0 {
            total_requests as f64 / secs
        } else {
            0.0
        };

        let (avg_latency_ms, error_rate) = if total_requests == 0 {
            (0.0, 0.0)
        } else {
            (
                total_latency.as_secs_f64() * 1000.0 / total_requests as f64,
                errors as f64 / total_requests as f64,
            )
        };

        Self {
            concurrency,
            total_requests,
            errors,
            elapsed,
            requests_per_second,
            avg_latency_ms,
            error_rate,
        }
    }

    pub fn exceeds(&self, max_error_rate: f64) -> bool {
        self.error_rate > max_error_rate
    }
}

/// How a ramp-up run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RampOutcome {
    /// The error rate of `metrics.concurrency` crossed the threshold.
    BreakingPoint(LoadMetrics),
    /// The concurrency cap was reached without crossing the threshold.
    CapReached(LoadMetrics),
}

#[derive(Default)]
struct Counters {
    requests: AtomicU64,
    errors: AtomicU64,
    latency_micros: AtomicU64,
}

/// Builds the HTTP client shared by all workers.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(config: &LoadTestConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Runs `concurrency` workers against the target for one ramp interval.
pub async fn run_level(client: &Client, config: &LoadTestConfig, concurrency: usize) -> LoadMetrics {
    let counters = Arc::new(Counters::default());
    let body = Arc::new(json!({ "url": config.url }));
    let target: Arc<str> = Arc::from(config.target.as_str());

    let started = Instant::now();
    let deadline = started + config.ramp_interval;

    let workers: Vec<_> = (0..concurrency)
        .map(|_| {
            let client = client.clone();
            let counters = counters.clone();
            let body = body.clone();
            let target = target.clone();

            tokio::spawn(async move {
                while Instant::now() < deadline {
                    let sent = Instant::now();
                    let failed = match client.post(&*target).json(&*body).send().await {
                        Ok(response) => {
                            let status = response.status();
                            // Drain so the connection goes back to the pool.
                            let _ = response.bytes().await;
                            status.as_u16() >= 500
                        }
                        Err(e) => {
                            debug!(error = %e, "Request failed");
                            true
                        }
                    };

                    let latency = u64::try_from(sent.elapsed().as_micros()).unwrap_or(u64::MAX);
                    counters.requests.fetch_add(1, Ordering::Relaxed);
                    counters.latency_micros.fetch_add(latency, Ordering::Relaxed);
                    if failed {
                        counters.errors.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        if let Err(e) = worker.await {
            debug!(error = %e, "Load worker panicked");
        }
    }

    LoadMetrics::from_totals(
        concurrency,
        counters.requests.load(Ordering::Relaxed),
        counters.errors.load(Ordering::Relaxed),
        Duration::from_micros(counters.latency_micros.load(Ordering::Relaxed)),
        started.elapsed(),
    )
}

/// Ramps concurrency until the error threshold or the cap is hit.
///
/// `on_level` is called with the metrics of every completed level, in order.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client
/// cannot be built. Failed requests are counted, not returned.
pub async fn find_breaking_point<F>(config: &LoadTestConfig, mut on_level: F) -> Result<RampOutcome>
where
    F: FnMut(&LoadMetrics),
{
    config.validate()?;
    let client = build_client(config)?;

    let mut concurrency = config.initial_concurrency;
    loop {
        let metrics = run_level(&client, config, concurrency).await;
        on_level(&metrics);

        if metrics.exceeds(config.max_error_rate) {
            return Ok(RampOutcome::BreakingPoint(metrics));
        }

        match config.max_concurrency {
            Some(cap) if concurrency >= cap => return Ok(RampOutcome::CapReached(metrics)),
            Some(cap) => concurrency = (concurrency + config.step_size).min(cap),
            None => concurrency += config.step_size,
        }
    }
}
