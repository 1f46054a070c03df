//! Region fetcher, scraper and poller
//!
//! A [`Scraper`] owns the provider configuration for the lifetime of the process. Each
//! configured job gets a [`Poller`] from [`Scraper::create_poller`], which the exposition
//! layer invokes once per scheduled poll.
//!
//! # Failure contract
//!
//! A poll either succeeds for every region or fails as a whole: the first region error
//! aborts the poll and every metric collected so far is dropped. Nothing is retried here;
//! the next scheduled poll is the retry.

use crate::config::AwsConfig;
use crate::error::Result;
use crate::quotas::client::{load_sdk_config, ClientSource, QuotaService};
use crate::quotas::transform::transform;
use crate::quotas::types::MetricRecord;
use aws_config::SdkConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches applied and default quotas for one region and merges them
///
/// The default quotas are only requested once the applied quotas have been listed
/// successfully. Either error is returned as-is.
pub async fn fetch_region_quotas<C>(
    client: &C,
    region: &str,
    service_code: &str,
) -> Result<Vec<MetricRecord>>
where
    C: QuotaService + ?Sized,
{
    let applied = client.list_service_quotas(service_code, region).await?;
    let defaults = client
        .list_default_service_quotas(service_code, region)
        .await?;

    debug!(
        region,
        service_code,
        applied = applied.len(),
        defaults = defaults.len(),
        "Fetched quotas"
    );

    Ok(transform(&applied, &defaults, region))
}

/// Holds provider configuration and hands out pollers
pub struct Scraper<S = SdkConfig> {
    source: Arc<S>,
}

impl<S> Clone for Scraper<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl Scraper<SdkConfig> {
    /// Builds a scraper from the ambient AWS configuration
    pub async fn from_env(aws: &AwsConfig) -> Result<Self> {
        Ok(Self::new(load_sdk_config(aws).await?))
    }
}

impl<S: ClientSource> Scraper<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Creates a poller for `service_code` across `regions`, polled in the given order
    pub fn create_poller(&self, regions: Vec<String>, service_code: impl Into<String>) -> Poller<S> {
        Poller {
            source: Arc::clone(&self.source),
            regions,
            service_code: service_code.into(),
        }
    }
}

/// One full scrape of a service code across its regions
///
/// Stateless between invocations: every [`Poller::poll`] builds a new client and returns a
/// freshly built metric list.
pub struct Poller<S = SdkConfig> {
    source: Arc<S>,
    regions: Vec<String>,
    service_code: String,
}

impl<S: ClientSource> Poller<S> {
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn service_code(&self) -> &str {
        &self.service_code
    }

    /// Polls every region in order and concatenates their metrics
    ///
    /// Returns the first region error without any partial results.
    pub async fn poll(&self) -> Result<Vec<MetricRecord>> {
        let client = self.source.client();

        let mut metrics = Vec::new();
        for region in &self.regions {
            let region_metrics = fetch_region_quotas(&client, region, &self.service_code).await?;
            metrics.extend(region_metrics);
        }

        info!(
            "Polled {} quota metrics for {} across {} region(s)",
            metrics.len(),
            self.service_code,
            self.regions.len()
        );

        Ok(metrics)
    }
}
