//! Load generator for the shortening endpoint.
//!
//! Ramps up concurrent `POST /shorten` workers until the error rate crosses a
//! threshold, then reports the breaking point.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin loadtest -- --target http://localhost:8080/shorten
//!
//! # Stop at 500 concurrent workers
//! cargo run --release --bin loadtest -- --max-concurrency 500
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::*;
use url_shortener::loadtest::{self, LoadMetrics, LoadTestConfig, RampOutcome};

/// Finds the concurrency at which the shortener starts failing.
#[derive(Parser)]
#[command(name = "loadtest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Endpoint receiving the POST requests
    #[arg(long, default_value = "http://localhost:8080/shorten")]
    target: String,

    /// Workers in the first level
    #[arg(long, default_value_t = 10)]
    initial_concurrency: usize,

    /// Workers added per level
    #[arg(long, default_value_t = 50)]
    step_size: usize,

    /// Duration of each level in seconds
    #[arg(long, default_value_t = 5)]
    ramp_interval_secs: u64,

    /// Error rate (0..=1) above which a level counts as broken
    #[arg(long, default_value_t = 0.05)]
    max_error_rate: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 2)]
    request_timeout_secs: u64,

    /// Stop after this many workers even if nothing broke
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// URL sent in every request body
    #[arg(long, default_value = "http://example.com")]
    url: String,
}

impl From<Cli> for LoadTestConfig {
    fn from(cli: Cli) -> Self {
        Self {
            target: cli.target,
            url: cli.url,
            initial_concurrency: cli.initial_concurrency,
            step_size: cli.step_size,
            ramp_interval: Duration::from_secs(cli.ramp_interval_secs),
            max_error_rate: cli.max_error_rate,
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            max_concurrency: cli.max_concurrency,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config: LoadTestConfig = Cli::parse().into();

    println!("{}", "🚀 Load test".bright_blue().bold());
    println!("  Target:    {}", config.target.cyan());
    println!("  Interval:  {}s", config.ramp_interval.as_secs());
    println!(
        "  Threshold: {:.1}% errors",
        config.max_error_rate * 100.0
    );
    println!();
    println!(
        "  {:<12} {:<10} {:<12} {:<14} {}",
        "Concurrency".bright_white().bold(),
        "Requests".bright_white().bold(),
        "RPS".bright_white().bold(),
        "Avg latency".bright_white().bold(),
        "Errors".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    let max_error_rate = config.max_error_rate;
    let outcome = loadtest::find_breaking_point(&config, |metrics| {
        print_level(metrics, max_error_rate)
    })
    .await?;

    println!();
    match outcome {
        RampOutcome::BreakingPoint(metrics) => {
            println!(
                "{} {} concurrent workers ({:.1}% errors)",
                "💥 Breaking point:".red().bold(),
                metrics.concurrency.to_string().bright_yellow().bold(),
                metrics.error_rate * 100.0
            );
        }
        RampOutcome::CapReached(metrics) => {
            println!(
                "{} {} concurrent workers without crossing the threshold",
                "✅ Reached max concurrency:".green().bold(),
                metrics.concurrency.to_string().bright_yellow().bold()
            );
        }
    }
    println!();

    Ok(())
}

fn print_level(metrics: &LoadMetrics, max_error_rate: f64) {
    let errors = format!("{:.2}%", metrics.error_rate * 100.0);
    let errors = if metrics.exceeds(max_error_rate) {
        errors.red()
    } else {
        errors.green()
    };

    println!(
        "  {:<12} {:<10} {:<12.1} {:<14} {}",
        metrics.concurrency,
        metrics.total_requests,
        metrics.requests_per_second,
        format!("{:.2} ms", metrics.avg_latency_ms),
        errors
    );
}
