//! Service Quotas API client
//!
//! [`QuotaService`] is the seam between the polling pipeline and the provider. The
//! production implementation, [`AwsQuotaClient`], wraps the AWS SDK client and scopes each
//! request to a region through a per-operation config override, so a single client serves
//! every region of a poll.
//!
//! [`ClientSource`] hands out a fresh client for each poll from stored configuration.

use crate::config::AwsConfig;
use crate::error::{ExporterError, Result};
use crate::quotas::types::QuotaRecord;
use async_trait::async_trait;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_servicequotas::{config::Region, types::ServiceQuota, Client};
use std::time::Duration;
use tracing::{debug, info};

/// Quota listing operations for one service code in one region
#[async_trait]
pub trait QuotaService: Send + Sync {
    /// Quotas currently in effect for the account (applied quotas)
    async fn list_service_quotas(&self, service_code: &str, region: &str)
        -> Result<Vec<QuotaRecord>>;

    /// Provider baseline quotas
    async fn list_default_service_quotas(
        &self,
        service_code: &str,
        region: &str,
    ) -> Result<Vec<QuotaRecord>>;
}

/// Produces a [`QuotaService`] bound to stored configuration
pub trait ClientSource: Send + Sync {
    type Client: QuotaService;

    fn client(&self) -> Self::Client;
}

impl ClientSource for SdkConfig {
    type Client = AwsQuotaClient;

    fn client(&self) -> AwsQuotaClient {
        AwsQuotaClient::new(Client::new(self))
    }
}

/// Loads the ambient AWS configuration (environment, shared config files, IMDS, ...)
///
/// Credentials are resolved eagerly so that a host without any credentials fails at
/// startup with [`ExporterError::ConfigSource`], carrying the SDK error as its source,
/// instead of on the first poll.
pub async fn load_sdk_config(aws: &AwsConfig) -> Result<SdkConfig> {
    let timeouts = TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(aws.request_timeout_seconds))
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeouts);
    if let Some(profile) = &aws.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(endpoint) = &aws.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        ExporterError::Config("no AWS credentials provider configured".to_string())
    })?;
    provider
        .provide_credentials()
        .await
        .map_err(|e| ExporterError::config_source("failed to resolve AWS credentials", e))?;

    info!(
        "Loaded AWS configuration (default region: {})",
        sdk_config
            .region()
            .map(|r| r.as_ref())
            .unwrap_or("<unset>")
    );

    Ok(sdk_config)
}

/// [`QuotaService`] backed by the AWS SDK
#[derive(Clone, Debug)]
pub struct AwsQuotaClient {
    client: Client,
}

impl AwsQuotaClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn region_override(region: &str) -> aws_sdk_servicequotas::config::Builder {
        aws_sdk_servicequotas::config::Builder::default().region(Region::new(region.to_string()))
    }
}

#[async_trait]
impl QuotaService for AwsQuotaClient {
    async fn list_service_quotas(
        &self,
        service_code: &str,
        region: &str,
    ) -> Result<Vec<QuotaRecord>> {
        debug!(region, service_code, "ListServiceQuotas");
        let output = self
            .client
            .list_service_quotas()
            .service_code(service_code)
            .customize()
            .config_override(Self::region_override(region))
            .send()
            .await
            .map_err(|e| ExporterError::fetch(region, "list applied quotas", e))?;

        to_records(output.quotas(), region)
    }

    async fn list_default_service_quotas(
        &self,
        service_code: &str,
        region: &str,
    ) -> Result<Vec<QuotaRecord>> {
        debug!(region, service_code, "ListAWSDefaultServiceQuotas");
        let output = self
            .client
            .list_aws_default_service_quotas()
            .service_code(service_code)
            .customize()
            .config_override(Self::region_override(region))
            .send()
            .await
            .map_err(|e| ExporterError::fetch(region, "list default quotas", e))?;

        to_records(output.quotas(), region)
    }
}

fn to_records(quotas: &[ServiceQuota], region: &str) -> Result<Vec<QuotaRecord>> {
    quotas.iter().map(|q| to_record(q, region)).collect()
}

/// Rejects SDK quotas missing a field the pipeline relies on
fn to_record(quota: &ServiceQuota, region: &str) -> Result<QuotaRecord> {
    let missing = |field| ExporterError::MalformedQuota {
        region: region.to_string(),
        field,
    };

    Ok(QuotaRecord {
        service_code: quota.service_code().ok_or_else(|| missing("service code"))?.to_string(),
        quota_name: quota.quota_name().ok_or_else(|| missing("quota name"))?.to_string(),
        value: quota.value().ok_or_else(|| missing("value"))?,
        unit: quota.unit().ok_or_else(|| missing("unit"))?.to_string(),
        adjustable: quota.adjustable(),
        global_quota: quota.global_quota(),
    })
}
