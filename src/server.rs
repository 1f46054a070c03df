//! HTTP Server and Quota Polling
//!
//! This module implements the Prometheus exporter HTTP server and the per-job polling loops.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Polling Loops**: One background task per configured job, polling on the job's interval
//! - **Snapshots**: Last successful metric list per job, shared with the HTTP handlers
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Health check (200 if the last poll of every job succeeded, 503 otherwise)
//!
//! # Error Handling
//!
//! A poll fails as a whole. A failed poll is logged, `aws_quota_exporter_up` drops to 0 for
//! that job and the previous successful snapshot keeps being served. Polls of one job never
//! overlap since each loop awaits its poll before waiting for the next tick.

use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::quotas::{ClientSource, MetricRecord, Poller, Scraper};
use anyhow::Context;
use aws_sdk_servicequotas::error::DisplayErrorContext;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{error, info};

/// Last successful poll result per service code
#[derive(Clone, Default)]
pub struct Snapshots {
    inner: Arc<RwLock<HashMap<String, Vec<MetricRecord>>>>,
}

impl Snapshots {
    pub async fn store(&self, service_code: &str, metrics: Vec<MetricRecord>) {
        self.inner
            .write()
            .await
            .insert(service_code.to_string(), metrics);
    }

    pub async fn get(&self, service_code: &str) -> Option<Vec<MetricRecord>> {
        self.inner.read().await.get(service_code).cloned()
    }

    /// Concatenates the snapshots of `service_codes`, in that order
    pub async fn collect(&self, service_codes: &[String]) -> Vec<MetricRecord> {
        let guard = self.inner.read().await;
        service_codes
            .iter()
            .filter_map(|code| guard.get(code))
            .flat_map(|metrics| metrics.iter().cloned())
            .collect()
    }
}

#[derive(Clone)]
struct AppState {
    service_codes: Arc<Vec<String>>,
    metrics: MetricsCollector,
    snapshots: Snapshots,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let metrics = MetricsCollector::new()?;
    let snapshots = Snapshots::default();
    let scraper = Scraper::from_env(&config.aws)
        .await
        .context("Failed to load AWS configuration")?;

    // Start one background polling loop per job
    for job in &config.jobs {
        metrics.register_job(&job.service_code);
        let poller = scraper.create_poller(job.regions.clone(), job.service_code.clone());
        let period = Duration::from_secs(job.interval_seconds(&config.scrape));

        info!(
            "Polling {} every {}s in regions: {}",
            job.service_code,
            period.as_secs(),
            job.regions.join(", ")
        );

        let metrics = metrics.clone();
        let snapshots = snapshots.clone();
        tokio::spawn(async move {
            poll_loop(poller, period, metrics, snapshots).await;
        });
    }

    let state = AppState {
        service_codes: Arc::new(config.jobs.iter().map(|j| j.service_code.clone()).collect()),
        metrics,
        snapshots,
    };

    // Build the router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn poll_loop<S: ClientSource>(
    poller: Poller<S>,
    period: Duration,
    metrics: MetricsCollector,
    snapshots: Snapshots,
) {
    let mut ticker = poll_ticker(period);

    loop {
        ticker.tick().await;
        poll_once(&poller, &metrics, &snapshots).await;
    }
}

/// A slow poll delays the next one instead of triggering catch-up polls
fn poll_ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Runs a single poll and publishes its outcome
///
/// On success the job's snapshot is replaced; on failure it is left untouched.
/// Returns whether the poll succeeded.
pub async fn poll_once<S: ClientSource>(
    poller: &Poller<S>,
    metrics: &MetricsCollector,
    snapshots: &Snapshots,
) -> bool {
    let service_code = poller.service_code();
    let started = Instant::now();

    match poller.poll().await {
        Ok(quotas) => {
            metrics.record_success(service_code, started.elapsed().as_secs_f64());
            snapshots.store(service_code, quotas).await;
            true
        }
        Err(e) => {
            metrics.record_failure(service_code, started.elapsed().as_secs_f64());
            error!(
                "Failed to poll quotas for {}: {}",
                service_code,
                DisplayErrorContext(&e)
            );
            false
        }
    }
}

async fn root_handler() -> impl IntoResponse {
    r#"<html>
<head><title>AWS Quota Exporter</title></head>
<body>
<h1>AWS Quota Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let quotas = state.snapshots.collect(&state.service_codes).await;

    match state.metrics.render(&quotas) {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    health_status(&state.service_codes, &state.metrics)
}

/// Maps job state to the `/health` response: 200 when the last poll of every job succeeded
pub fn health_status(
    service_codes: &[String],
    metrics: &MetricsCollector,
) -> (StatusCode, &'static str) {
    let all_up = service_codes.iter().all(|code| metrics.is_up(code));

    if all_up {
        (StatusCode::OK, "OK")
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "One or more quota polls failed",
        )
    }
}
