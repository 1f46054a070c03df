//! In-memory Service Quotas fixtures shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use aws_quota_exporter::error::{ExporterError, Result};
use aws_quota_exporter::quotas::{ClientSource, QuotaRecord, QuotaService};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn quota(service_code: &str, quota_name: &str, value: f64) -> QuotaRecord {
    QuotaRecord {
        service_code: service_code.to_string(),
        quota_name: quota_name.to_string(),
        value,
        unit: "None".to_string(),
        adjustable: true,
        global_quota: false,
    }
}

/// Canned responses for one region; `Err` holds the provider error message
#[derive(Clone)]
pub struct RegionFixture {
    pub applied: std::result::Result<Vec<QuotaRecord>, String>,
    pub defaults: std::result::Result<Vec<QuotaRecord>, String>,
}

impl RegionFixture {
    pub fn ok(applied: Vec<QuotaRecord>, defaults: Vec<QuotaRecord>) -> Self {
        Self {
            applied: Ok(applied),
            defaults: Ok(defaults),
        }
    }

    pub fn failing_applied(message: &str) -> Self {
        Self {
            applied: Err(message.to_string()),
            defaults: Ok(Vec::new()),
        }
    }

    pub fn failing_defaults(message: &str) -> Self {
        Self {
            applied: Ok(Vec::new()),
            defaults: Err(message.to_string()),
        }
    }
}

/// Records every call as `"<operation> <service_code> <region>"`
#[derive(Clone, Default)]
pub struct FixtureClient {
    regions: Arc<Mutex<HashMap<String, RegionFixture>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FixtureClient {
    pub fn with_region(self, region: &str, fixture: RegionFixture) -> Self {
        self.set_region(region, fixture);
        self
    }

    pub fn set_region(&self, region: &str, fixture: RegionFixture) {
        self.regions
            .lock()
            .unwrap()
            .insert(region.to_string(), fixture);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(
        &self,
        operation: &'static str,
        service_code: &str,
        region: &str,
    ) -> Result<Vec<QuotaRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {} {}", operation, service_code, region));

        let fixture = self
            .regions
            .lock()
            .unwrap()
            .get(region)
            .cloned()
            .unwrap_or_else(|| RegionFixture::ok(Vec::new(), Vec::new()));

        let response = match operation {
            "list applied quotas" => fixture.applied,
            _ => fixture.defaults,
        };
        response.map_err(|message| ExporterError::fetch(region, operation, message))
    }
}

#[async_trait]
impl QuotaService for FixtureClient {
    async fn list_service_quotas(
        &self,
        service_code: &str,
        region: &str,
    ) -> Result<Vec<QuotaRecord>> {
        self.respond("list applied quotas", service_code, region)
    }

    async fn list_default_service_quotas(
        &self,
        service_code: &str,
        region: &str,
    ) -> Result<Vec<QuotaRecord>> {
        self.respond("list default quotas", service_code, region)
    }
}

/// Hands out clones of one [`FixtureClient`] and counts how many were requested
#[derive(Clone, Default)]
pub struct FixtureSource {
    pub client: FixtureClient,
    clients_built: Arc<AtomicUsize>,
}

impl FixtureSource {
    pub fn new(client: FixtureClient) -> Self {
        Self {
            client,
            clients_built: Arc::default(),
        }
    }

    pub fn clients_built(&self) -> usize {
        self.clients_built.load(Ordering::SeqCst)
    }
}

impl ClientSource for FixtureSource {
    type Client = FixtureClient;

    fn client(&self) -> FixtureClient {
        self.clients_built.fetch_add(1, Ordering::SeqCst);
        self.client.clone()
    }
}
