//! Metric name construction
//!
//! Quota names are human-readable ("Running On-Demand Standard (A, C, D, H, I, M, R, T, Z)
//! instances") and must be folded into Prometheus identifiers.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix shared by every quota metric
pub const METRIC_PREFIX: &str = "aws_quota";

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid NON_ALPHANUMERIC pattern"));

/// Converts an arbitrary label into a metric-identifier-safe token
///
/// Lowercases the input, collapses every run of characters outside `[a-z0-9]` into a
/// single `_` and trims separators from both ends. A token starting with a digit is
/// prefixed with `_`.
///
/// # Examples
///
/// ```
/// use aws_quota_exporter::quotas::prom_string;
///
/// assert_eq!(prom_string("Running On-Demand instances"), "running_on_demand_instances");
/// assert_eq!(prom_string("EC2-VPC Elastic IPs"), "ec2_vpc_elastic_ips");
/// assert_eq!(prom_string("5 GiB volumes"), "_5_gib_volumes");
/// ```
pub fn prom_string(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let collapsed = NON_ALPHANUMERIC.replace_all(&lowered, "_");
    let token = collapsed.trim_matches('_');

    if token.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{token}")
    } else {
        token.to_string()
    }
}

/// Builds the canonical metric name for a quota, `aws_quota_<service>_<quota>`
///
/// Two distinct quota names may normalize to the same token; callers treat such names as
/// the same metric.
pub fn build_metric_name(service_code: &str, quota_name: &str) -> String {
    format!(
        "{}_{}_{}",
        METRIC_PREFIX,
        prom_string(service_code),
        prom_string(quota_name)
    )
}
