//! AWS Service Quotas polling pipeline
//!
//! Fetches applied and default quotas per region, merges them and turns them into
//! [`MetricRecord`]s ready for exposition.
//!
//! ```text
//! Scraper::create_poller(regions, service_code) ─► Poller::poll()
//!     for each region (in order, first error aborts):
//!         fetch_region_quotas ─► (applied, defaults) ─► transform ─► Vec<MetricRecord>
//! ```

pub mod client;
pub mod naming;
pub mod scraper;
pub mod transform;
pub mod types;

pub use client::{AwsQuotaClient, ClientSource, QuotaService};
pub use naming::{build_metric_name, prom_string};
pub use scraper::{fetch_region_quotas, Poller, Scraper};
pub use transform::transform;
pub use types::{MetricRecord, QuotaRecord};
