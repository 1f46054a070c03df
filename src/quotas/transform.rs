//! Applied/default quota merge

use super::naming::build_metric_name;
use super::types::{MetricRecord, QuotaRecord};
use std::collections::HashSet;

/// Merges applied and default quotas for one region into metric records
///
/// Applied quotas come first, in input order. A default quota is only emitted when no
/// applied quota produced the same metric name; it then follows in input order. Duplicates
/// are matched on the normalized metric name, not the raw quota name.
///
/// # Examples
///
/// ```
/// use aws_quota_exporter::quotas::{transform, QuotaRecord};
///
/// let quota = |name: &str, value: f64| QuotaRecord {
///     service_code: "ec2".to_string(),
///     quota_name: name.to_string(),
///     value,
///     unit: "None".to_string(),
///     adjustable: true,
///     global_quota: false,
/// };
///
/// let metrics = transform(&[quota("A", 1.0)], &[quota("A", 2.0), quota("B", 3.0)], "us-east-1");
/// assert_eq!(metrics.len(), 2);
/// assert_eq!(metrics[0].value, 1.0);
/// assert_eq!(metrics[1].name, "aws_quota_ec2_b");
/// ```
pub fn transform(
    applied: &[QuotaRecord],
    defaults: &[QuotaRecord],
    region: &str,
) -> Vec<MetricRecord> {
    let mut metrics = Vec::with_capacity(applied.len() + defaults.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(applied.len());

    for quota in applied {
        let name = build_metric_name(&quota.service_code, &quota.quota_name);
        seen.insert(name.clone());
        metrics.push(MetricRecord::from_quota(name, quota, region));
    }

    for quota in defaults {
        let name = build_metric_name(&quota.service_code, &quota.quota_name);
        if !seen.contains(&name) {
            metrics.push(MetricRecord::from_quota(name, quota, region));
        }
    }

    metrics
}
