//! Quota and metric value types
//!
//! - [`QuotaRecord`] - a quota as reported by the Service Quotas API, with every field
//!   the pipeline relies on guaranteed present
//! - [`MetricRecord`] - one named sample handed to the exposition layer

use std::collections::BTreeMap;

/// Label keys carried by every [`MetricRecord`]
pub const LABEL_ADJUSTABLE: &str = "adjustable";
pub const LABEL_GLOBAL_QUOTA: &str = "global_quota";
pub const LABEL_UNIT: &str = "unit";
pub const LABEL_REGION: &str = "region";

/// Label names in exposition order
pub const LABEL_NAMES: [&str; 4] = [LABEL_ADJUSTABLE, LABEL_GLOBAL_QUOTA, LABEL_UNIT, LABEL_REGION];

/// A quota reported by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaRecord {
    pub service_code: String,
    pub quota_name: String,
    pub value: f64,
    pub unit: String,
    pub adjustable: bool,
    pub global_quota: bool,
}

/// A single metric sample produced from a quota
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: String,
    pub value: f64,
    pub labels: BTreeMap<String, String>,
    pub description: String,
}

impl MetricRecord {
    /// Builds the record for `quota` observed in `region`
    pub fn from_quota(name: String, quota: &QuotaRecord, region: &str) -> Self {
        let labels = BTreeMap::from([
            (LABEL_ADJUSTABLE.to_string(), quota.adjustable.to_string()),
            (LABEL_GLOBAL_QUOTA.to_string(), quota.global_quota.to_string()),
            (LABEL_UNIT.to_string(), quota.unit.clone()),
            (LABEL_REGION.to_string(), region.to_string()),
        ]);

        Self {
            name,
            value: quota.value,
            labels,
            description: quota.quota_name.clone(),
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Label values ordered as [`LABEL_NAMES`]
    pub fn label_values(&self) -> [&str; 4] {
        LABEL_NAMES.map(|key| self.label(key).unwrap_or_default())
    }
}
