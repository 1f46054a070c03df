//! Prometheus Metrics Definitions
//!
//! This module owns everything that ends up on `/metrics`.
//!
//! # Metric Categories
//!
//! ## Quota Metrics
//! - One gauge family per quota, named `aws_quota_<service>_<quota>`
//! - Labels: adjustable, global_quota, unit, region
//! - Built fresh from the latest [`MetricRecord`] snapshot on every render
//!
//! ## Exporter Metrics
//! - `aws_quota_exporter_up` - 1 if the last poll of a job succeeded, 0 otherwise
//! - `aws_quota_exporter_scrape_duration_seconds` - Duration of the last poll of a job
//! - `aws_quota_exporter_scrape_errors_total` - Failed polls per job
//!
//! All exporter metrics are labeled by `service_code`.

use crate::error::Result;
use crate::quotas::types::{MetricRecord, LABEL_NAMES};
use prometheus::{Encoder, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;

/// Exporter self-metrics plus quota rendering
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    pub up: Arc<GaugeVec>,
    pub scrape_duration_seconds: Arc<GaugeVec>,
    pub scrape_errors_total: Arc<IntCounterVec>,
}

impl MetricsCollector {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let up = GaugeVec::new(
            Opts::new(
                "up",
                "Whether the last poll of a job succeeded (1=success, 0=failure)",
            )
            .namespace("aws_quota_exporter"),
            &["service_code"],
        )?;

        let scrape_duration_seconds = GaugeVec::new(
            Opts::new(
                "scrape_duration_seconds",
                "Duration of the last poll of a job in seconds",
            )
            .namespace("aws_quota_exporter"),
            &["service_code"],
        )?;

        let scrape_errors_total = IntCounterVec::new(
            Opts::new("scrape_errors_total", "Number of failed polls of a job")
                .namespace("aws_quota_exporter"),
            &["service_code"],
        )?;

        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(scrape_duration_seconds.clone()))?;
        registry.register(Box::new(scrape_errors_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            up: Arc::new(up),
            scrape_duration_seconds: Arc::new(scrape_duration_seconds),
            scrape_errors_total: Arc::new(scrape_errors_total),
        })
    }

    /// Pre-creates the per-job series so a job shows up before its first poll finishes
    pub fn register_job(&self, service_code: &str) {
        self.up.with_label_values(&[service_code]).set(0.0);
        self.scrape_errors_total.with_label_values(&[service_code]);
    }

    pub fn record_success(&self, service_code: &str, duration_seconds: f64) {
        self.up.with_label_values(&[service_code]).set(1.0);
        self.scrape_duration_seconds
            .with_label_values(&[service_code])
            .set(duration_seconds);
    }

    pub fn record_failure(&self, service_code: &str, duration_seconds: f64) {
        self.up.with_label_values(&[service_code]).set(0.0);
        self.scrape_duration_seconds
            .with_label_values(&[service_code])
            .set(duration_seconds);
        self.scrape_errors_total
            .with_label_values(&[service_code])
            .inc();
    }

    /// Whether the last poll of `service_code` succeeded
    pub fn is_up(&self, service_code: &str) -> bool {
        self.up.with_label_values(&[service_code]).get() > 0.0
    }

    /// Render exporter metrics and `quotas` in Prometheus text format
    pub fn render(&self, quotas: &[MetricRecord]) -> Result<String> {
        let quota_registry = quota_registry(quotas)?;

        let mut metric_families = self.registry.gather();
        metric_families.extend(quota_registry.gather());

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()).into())
    }
}

/// Builds a throwaway registry holding one gauge family per distinct quota name
///
/// A record sharing name and label values with an earlier one overwrites it.
fn quota_registry(quotas: &[MetricRecord]) -> Result<Registry> {
    let registry = Registry::new();
    let mut families: HashMap<&str, GaugeVec> = HashMap::new();

    for record in quotas {
        if !families.contains_key(record.name.as_str()) {
            let help = if record.description.is_empty() {
                record.name.as_str()
            } else {
                record.description.as_str()
            };
            let gauge = GaugeVec::new(Opts::new(record.name.as_str(), help), &LABEL_NAMES)?;
            registry.register(Box::new(gauge.clone()))?;
            families.insert(record.name.as_str(), gauge);
        }

        families[record.name.as_str()]
            .with_label_values(&record.label_values())
            .set(record.value);
    }

    Ok(registry)
}
