//! AWS Service Quotas Prometheus Exporter
//!
//! Polls the AWS Service Quotas API for a set of service codes and regions and exposes
//! every quota as a Prometheus gauge.
//!
//! # Overview
//!
//! For each region, both the applied quotas (what is in effect for the account) and the
//! AWS default quotas are listed. Applied values win; defaults only fill in quotas that
//! have no applied value. Each quota becomes a metric named
//! `aws_quota_<service_code>_<quota_name>` labeled with `adjustable`, `global_quota`,
//! `unit` and `region`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    Service Quotas    ┌──────────────┐
//! │     AWS     │ ◄─────────────────►  │   Exporter   │
//! │  (regions)  │    applied/default   │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Poller │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`quotas`] - Polling pipeline: client, fetcher, transformer and metric naming
//! - [`metrics`] - Prometheus rendering and exporter self-metrics
//! - [`server`] - HTTP server and polling loops
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use aws_quota_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod quotas;
pub mod server;
