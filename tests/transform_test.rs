//! Applied/default merge tests

mod common;

use aws_quota_exporter::quotas::{transform, QuotaRecord};
use common::quota;

#[test]
fn test_applied_value_wins_over_default() {
    // Given: "A" in both sources and "B" only in defaults
    let applied = vec![quota("ec2", "A", 1.0)];
    let defaults = vec![quota("ec2", "A", 2.0), quota("ec2", "B", 3.0)];

    // When: Merging
    let metrics = transform(&applied, &defaults, "us-east-1");

    // Then: Exactly A=1 then B=3
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].name, "aws_quota_ec2_a");
    assert_eq!(metrics[0].value, 1.0);
    assert_eq!(metrics[1].name, "aws_quota_ec2_b");
    assert_eq!(metrics[1].value, 3.0);
}

#[test]
fn test_empty_inputs_produce_no_metrics() {
    assert!(transform(&[], &[], "us-east-1").is_empty());
}

#[test]
fn test_defaults_only() {
    let defaults = vec![quota("ec2", "VPCs", 5.0), quota("ec2", "Elastic IPs", 5.0)];

    let metrics = transform(&[], &defaults, "us-east-1");

    let names: Vec<&str> = metrics.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["aws_quota_ec2_vpcs", "aws_quota_ec2_elastic_ips"]);
}

#[test]
fn test_applied_metrics_precede_default_only_metrics() {
    // Given: Defaults listed before the overlapping applied quota in alphabetical terms
    let applied = vec![quota("ec2", "Zeta", 1.0), quota("ec2", "Mu", 2.0)];
    let defaults = vec![
        quota("ec2", "Alpha", 3.0),
        quota("ec2", "Mu", 4.0),
        quota("ec2", "Beta", 5.0),
    ];

    // When: Merging
    let metrics = transform(&applied, &defaults, "us-east-1");

    // Then: Applied in input order, then unseen defaults in input order
    let observed: Vec<(&str, f64)> = metrics.iter().map(|m| (m.name.as_str(), m.value)).collect();
    assert_eq!(
        observed,
        vec![
            ("aws_quota_ec2_zeta", 1.0),
            ("aws_quota_ec2_mu", 2.0),
            ("aws_quota_ec2_alpha", 3.0),
            ("aws_quota_ec2_beta", 5.0),
        ]
    );
}

#[test]
fn test_labels_come_from_the_record() {
    // Given: A default quota with distinct metadata
    let record = QuotaRecord {
        service_code: "s3".to_string(),
        quota_name: "Buckets".to_string(),
        value: 100.0,
        unit: "None".to_string(),
        adjustable: false,
        global_quota: true,
    };

    // When: Merging with no applied quotas
    let metrics = transform(&[], &[record], "eu-central-1");

    // Then: Labels reflect the record and the region
    let metric = &metrics[0];
    assert_eq!(metric.labels.len(), 4);
    assert_eq!(metric.label("adjustable"), Some("false"));
    assert_eq!(metric.label("global_quota"), Some("true"));
    assert_eq!(metric.label("unit"), Some("None"));
    assert_eq!(metric.label("region"), Some("eu-central-1"));
    assert_eq!(metric.description, "Buckets");
}

#[test]
fn test_dedup_matches_on_normalized_name() {
    // Given: Raw names that differ but normalize identically
    let applied = vec![quota("ec2", "Elastic IPs", 5.0)];
    let defaults = vec![quota("ec2", "elastic-IPs", 10.0)];

    // When: Merging
    let metrics = transform(&applied, &defaults, "us-east-1");

    // Then: The default is treated as a duplicate of the applied quota
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].value, 5.0);
    assert_eq!(metrics[0].description, "Elastic IPs");
}

#[test]
fn test_default_duplicates_are_only_checked_against_applied() {
    // Given: The same default listed twice and no applied quotas
    let defaults = vec![quota("ec2", "VPCs", 5.0), quota("ec2", "VPCs", 6.0)];

    // When: Merging
    let metrics = transform(&[], &defaults, "us-east-1");

    // Then: Both defaults are kept, in order
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].value, 5.0);
    assert_eq!(metrics[1].value, 6.0);
}

#[test]
fn test_applied_duplicates_are_kept() {
    let applied = vec![quota("ec2", "VPCs", 5.0), quota("ec2", "VPCs", 6.0)];

    let metrics = transform(&applied, &[quota("ec2", "VPCs", 1.0)], "us-east-1");

    let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
    assert_eq!(values, vec![5.0, 6.0]);
}
