use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AwsConfig {
    /// Named profile from the shared AWS config files
    #[serde(default)]
    pub profile: Option<String>,
    /// Custom endpoint, e.g. a local Service Quotas emulator
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    #[serde(default = "default_scrape_interval")]
    pub interval_seconds: u64,
}

/// One service code polled across a set of regions
#[derive(Debug, Deserialize, Clone)]
pub struct JobConfig {
    pub service_code: String,
    pub regions: Vec<String>,
    /// Overrides `scrape.interval_seconds` for this job
    #[serde(default)]
    pub interval_seconds: Option<u64>,
}

impl JobConfig {
    pub fn interval_seconds(&self, scrape: &ScrapeConfig) -> u64 {
        self.interval_seconds.unwrap_or(scrape.interval_seconds)
    }
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10100
}

fn default_request_timeout() -> u64 {
    30
}

fn default_scrape_interval() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            profile: None,
            endpoint_url: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_scrape_interval(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("AWS_QUOTA_EXPORTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ExporterError;

        if self.jobs.is_empty() {
            return Err(ExporterError::Config("no jobs configured".to_string()));
        }
        if self.scrape.interval_seconds == 0 {
            return Err(ExporterError::Config(
                "scrape.interval_seconds must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.jobs.len());
        for job in &self.jobs {
            if job.service_code.trim().is_empty() {
                return Err(ExporterError::Config("job with empty service_code".to_string()));
            }
            if job.regions.is_empty() {
                return Err(ExporterError::Config(format!(
                    "job {} has no regions",
                    job.service_code
                )));
            }
            if job.interval_seconds == Some(0) {
                return Err(ExporterError::Config(format!(
                    "job {} has a zero interval_seconds",
                    job.service_code
                )));
            }
            if !seen.insert(job.service_code.as_str()) {
                return Err(ExporterError::Config(format!(
                    "duplicate job for service_code {}",
                    job.service_code
                )));
            }
        }

        Ok(())
    }
}
