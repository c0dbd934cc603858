//! Lifecycle tests for the generic reconciler, driven through in-memory
//! mock clients.

use std::collections::HashMap;
use std::sync::Mutex;

use ngfw_api::async_trait;
use ngfw_api::certificate::{CertificateClient, CertificateInfo, CertificateReadResponse};
use ngfw_api::error::{ApiError, ApiResult};
use ngfw_api::firewall::{
    FirewallClient, FirewallInfo, FirewallReadResponse, FirewallStatus, SubnetMapping,
};
use ngfw_api::rulestack::{RulestackClient, RulestackInfo, RulestackReadResponse};
use ngfw_api::types::ConfigPhase;

use ngfw_reconcile::prelude::*;

// ---------------------------------------------------------------------------
// Certificate mock
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockCertificateClient {
    candidate: Mutex<HashMap<(String, String), CertificateInfo>>,
    running: Mutex<HashMap<(String, String), CertificateInfo>>,
}

impl MockCertificateClient {
    fn promote(&self, rulestack: &str, name: &str) {
        let key = (rulestack.to_string(), name.to_string());
        let info = self.candidate.lock().unwrap().get(&key).cloned();
        if let Some(info) = info {
            self.running.lock().unwrap().insert(key, info);
        }
    }
}

#[async_trait]
impl CertificateClient for MockCertificateClient {
    async fn create(&self, certificate: &CertificateInfo) -> ApiResult<()> {
        let key = (certificate.rulestack.clone(), certificate.name.clone());
        let mut stored = certificate.clone();
        stored.update_token = "tok-1".into();
        self.candidate.lock().unwrap().insert(key, stored);
        Ok(())
    }

    async fn read(
        &self,
        rulestack: &str,
        name: &str,
        _phase: ConfigPhase,
    ) -> ApiResult<CertificateReadResponse> {
        let key = (rulestack.to_string(), name.to_string());
        let candidate = self.candidate.lock().unwrap().get(&key).cloned();
        let running = self.running.lock().unwrap().get(&key).cloned();
        if candidate.is_none() && running.is_none() {
            return Err(ApiError::not_found(format!("{rulestack}:{name}")));
        }
        Ok(CertificateReadResponse {
            rulestack: rulestack.to_string(),
            name: name.to_string(),
            candidate,
            running,
        })
    }

    async fn update(&self, certificate: &CertificateInfo) -> ApiResult<()> {
        let key = (certificate.rulestack.clone(), certificate.name.clone());
        let mut guard = self.candidate.lock().unwrap();
        if !guard.contains_key(&key) {
            return Err(ApiError::not_found(format!(
                "{}:{}",
                certificate.rulestack, certificate.name
            )));
        }
        let mut stored = certificate.clone();
        stored.update_token = "tok-2".into();
        guard.insert(key, stored);
        Ok(())
    }

    async fn delete(&self, rulestack: &str, name: &str) -> ApiResult<()> {
        let key = (rulestack.to_string(), name.to_string());
        match self.candidate.lock().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(format!("{rulestack}:{name}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Rulestack mock
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockRulestackClient {
    stacks: Mutex<HashMap<String, RulestackInfo>>,
}

#[async_trait]
impl RulestackClient for MockRulestackClient {
    async fn create(&self, rulestack: &RulestackInfo) -> ApiResult<()> {
        self.stacks
            .lock()
            .unwrap()
            .insert(rulestack.name.clone(), rulestack.clone());
        Ok(())
    }

    async fn read(&self, name: &str, _phase: ConfigPhase) -> ApiResult<RulestackReadResponse> {
        let info = self
            .stacks
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::not_found(name.to_string()))?;
        Ok(RulestackReadResponse {
            name: info.name.clone(),
            state: "Uncommitted".into(),
            candidate: Some(info.entry),
            running: None,
        })
    }

    async fn update(&self, rulestack: &RulestackInfo) -> ApiResult<()> {
        let mut guard = self.stacks.lock().unwrap();
        if !guard.contains_key(&rulestack.name) {
            return Err(ApiError::not_found(rulestack.name.clone()));
        }
        guard.insert(rulestack.name.clone(), rulestack.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        match self.stacks.lock().unwrap().remove(name) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(name.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Firewall mock
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockFirewallClient {
    firewalls: Mutex<HashMap<String, FirewallInfo>>,
    calls: Mutex<Vec<&'static str>>,
    associated: Mutex<Vec<SubnetMapping>>,
    disassociated: Mutex<Vec<SubnetMapping>>,
    fail_subnet_update: bool,
}

impl MockFirewallClient {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn response_for(fw: FirewallInfo) -> FirewallReadResponse {
        FirewallReadResponse {
            firewall: fw,
            status: Some(FirewallStatus {
                firewall_status: "CREATE_COMPLETE".into(),
                ..Default::default()
            }),
        }
    }
}

#[async_trait]
impl FirewallClient for MockFirewallClient {
    fn region(&self) -> &str {
        "us-east-1"
    }

    async fn create(&self, firewall: &FirewallInfo) -> ApiResult<FirewallReadResponse> {
        let mut stored = firewall.clone();
        if stored.account_id.is_empty() {
            stored.account_id = "111".into();
        }
        stored.update_token = "tok-1".into();
        stored.endpoint_service_name = format!("com.amazonaws.vpce.{}", stored.name);
        self.firewalls
            .lock()
            .unwrap()
            .insert(stored.name.clone(), stored.clone());
        Ok(Self::response_for(stored))
    }

    async fn read(&self, name: &str, _account_id: &str) -> ApiResult<FirewallReadResponse> {
        let stored = self
            .firewalls
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::not_found(name.to_string()))?;
        Ok(Self::response_for(stored))
    }

    async fn update_description(&self, firewall: &FirewallInfo) -> ApiResult<()> {
        self.calls.lock().unwrap().push("description");
        let mut guard = self.firewalls.lock().unwrap();
        let stored = guard
            .get_mut(&firewall.name)
            .ok_or_else(|| ApiError::not_found(firewall.name.clone()))?;
        stored.description = firewall.description.clone();
        Ok(())
    }

    async fn update_content_version(&self, firewall: &FirewallInfo) -> ApiResult<()> {
        self.calls.lock().unwrap().push("content_version");
        let mut guard = self.firewalls.lock().unwrap();
        let stored = guard
            .get_mut(&firewall.name)
            .ok_or_else(|| ApiError::not_found(firewall.name.clone()))?;
        stored.app_id_version = firewall.app_id_version.clone();
        Ok(())
    }

    async fn update_subnet_mappings(
        &self,
        firewall: &FirewallInfo,
        associate: &[SubnetMapping],
        disassociate: &[SubnetMapping],
    ) -> ApiResult<()> {
        self.calls.lock().unwrap().push("subnet_mappings");
        if self.fail_subnet_update {
            return Err(ApiError::transport("connection reset"));
        }
        self.associated.lock().unwrap().extend_from_slice(associate);
        self.disassociated
            .lock()
            .unwrap()
            .extend_from_slice(disassociate);

        let mut guard = self.firewalls.lock().unwrap();
        let stored = guard
            .get_mut(&firewall.name)
            .ok_or_else(|| ApiError::not_found(firewall.name.clone()))?;
        stored
            .subnet_mappings
            .retain(|m| !disassociate.iter().any(|d| d.subnet_id == m.subnet_id));
        stored.subnet_mappings.extend_from_slice(associate);
        Ok(())
    }

    async fn delete(&self, name: &str, _account_id: &str) -> ApiResult<()> {
        match self.firewalls.lock().unwrap().remove(name) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(name.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Certificate lifecycle
// ---------------------------------------------------------------------------

fn declared_certificate() -> CertificateState {
    CertificateState {
        rulestack: "stack1".into(),
        name: "cert1".into(),
        description: "edge cert".into(),
        self_signed: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn certificate_create_sets_id_and_refreshes_computed_fields() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();

    Reconciler::<Certificate>::create(&client, &mut declared)
        .await
        .unwrap();

    assert_eq!(declared.id, "stack1:cert1");
    // The post-create read pulled the server token in.
    assert_eq!(declared.update_token, "tok-1");
}

#[tokio::test]
async fn certificate_read_after_create_causes_no_drift() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();

    Reconciler::<Certificate>::create(&client, &mut declared)
        .await
        .unwrap();
    let after_create = declared.clone();

    Reconciler::<Certificate>::read(&client, &mut declared)
        .await
        .unwrap();
    assert_eq!(declared, after_create);
}

#[tokio::test]
async fn read_of_missing_object_clears_id_and_succeeds() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    declared.id = "s1:missing".into();

    Reconciler::<Certificate>::read(&client, &mut declared)
        .await
        .unwrap();
    assert_eq!(declared.id, "");
}

#[tokio::test]
async fn delete_tolerates_missing_object() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    declared.id = "stack1:cert1".into();

    Reconciler::<Certificate>::delete(&client, &mut declared)
        .await
        .unwrap();
    assert_eq!(declared.id, "");
}

#[tokio::test]
async fn malformed_id_is_a_fatal_error() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    declared.id = "no-separator".into();

    let err = Reconciler::<Certificate>::read(&client, &mut declared)
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::IdFormat(_)));
    // A corrupt id is never silently dropped.
    assert_eq!(declared.id, "no-separator");
}

#[tokio::test]
async fn certificate_update_pushes_wholesale_and_resyncs() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    Reconciler::<Certificate>::create(&client, &mut declared)
        .await
        .unwrap();

    let prior = declared.clone();
    declared.description = "rotated".into();
    Reconciler::<Certificate>::update(&client, &mut declared, &prior)
        .await
        .unwrap();

    assert_eq!(declared.description, "rotated");
    assert_eq!(declared.update_token, "tok-2");
}

// ---------------------------------------------------------------------------
// Data-source reads and phase selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn data_source_read_of_uncommitted_object_in_running_phase_is_absent() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    Reconciler::<Certificate>::create(&client, &mut declared)
        .await
        .unwrap();

    // Created but never committed: the running phase has no content even
    // though the outer read succeeds.
    let mut ds = declared_certificate();
    Reconciler::<Certificate>::read_data_source(&client, &mut ds, ConfigPhase::Running)
        .await
        .unwrap();
    assert_eq!(ds.id, "");
}

#[tokio::test]
async fn data_source_read_projects_the_running_phase_once_committed() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    Reconciler::<Certificate>::create(&client, &mut declared)
        .await
        .unwrap();
    client.promote("stack1", "cert1");

    let mut ds = declared_certificate();
    Reconciler::<Certificate>::read_data_source(&client, &mut ds, ConfigPhase::Running)
        .await
        .unwrap();
    assert_eq!(ds.id, "stack1:cert1");
    assert_eq!(ds.update_token, "tok-1");
    assert_eq!(ds.config_type, ConfigPhase::Running);
}

#[tokio::test]
async fn data_source_read_records_the_requested_phase() {
    let client = MockCertificateClient::default();
    let mut declared = declared_certificate();
    Reconciler::<Certificate>::create(&client, &mut declared)
        .await
        .unwrap();

    let mut ds = declared_certificate();
    Reconciler::<Certificate>::read_data_source(&client, &mut ds, ConfigPhase::Candidate)
        .await
        .unwrap();
    assert_eq!(ds.config_type, ConfigPhase::Candidate);

    // An absent projection records nothing.
    let mut gone = declared_certificate();
    gone.name = "missing".into();
    Reconciler::<Certificate>::read_data_source(&client, &mut gone, ConfigPhase::Candidate)
        .await
        .unwrap();
    assert_eq!(gone.config_type, ConfigPhase::Unspecified);
}

// ---------------------------------------------------------------------------
// Rulestack
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rulestack_id_is_the_bare_name() {
    let client = MockRulestackClient::default();
    let mut declared = RulestackState {
        name: "stack1".into(),
        ..Default::default()
    };

    Reconciler::<Rulestack>::create(&client, &mut declared)
        .await
        .unwrap();
    assert_eq!(declared.id, "stack1");
    assert_eq!(declared.state, "Uncommitted");
    // The profile block comes back as a list of one.
    assert_eq!(declared.profile_config.len(), 1);
}

// ---------------------------------------------------------------------------
// Firewall
// ---------------------------------------------------------------------------

fn declared_firewall() -> FirewallState {
    FirewallState {
        name: "fw1".into(),
        vpc_id: "vpc-1".into(),
        subnet_mapping: vec![SubnetMapping::new("subnet-a").with_availability_zone("us-east-1a")],
        rulestack: "stack1".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn firewall_create_captures_server_assigned_account_in_id() {
    let client = MockFirewallClient::default();
    let mut declared = declared_firewall();

    Reconciler::<Firewall>::create(&client, &mut declared)
        .await
        .unwrap();

    assert_eq!(declared.id, "111:us-east-1:fw1");
    assert_eq!(declared.account_id, "111");
    assert_eq!(declared.endpoint_service_name, "com.amazonaws.vpce.fw1");
    assert_eq!(declared.status.len(), 1);
}

#[tokio::test]
async fn firewall_subnet_change_sends_only_the_delta() {
    let client = MockFirewallClient::default();
    let mut declared = declared_firewall();
    Reconciler::<Firewall>::create(&client, &mut declared)
        .await
        .unwrap();

    let prior = declared.clone();
    declared.subnet_mapping = vec![SubnetMapping::new("subnet-b")];
    Reconciler::<Firewall>::update(&client, &mut declared, &prior)
        .await
        .unwrap();

    let associated = client.associated.lock().unwrap().clone();
    let disassociated = client.disassociated.lock().unwrap().clone();
    assert_eq!(associated.len(), 1);
    assert_eq!(associated[0].subnet_id, "subnet-b");
    assert_eq!(disassociated.len(), 1);
    assert_eq!(disassociated[0].subnet_id, "subnet-a");

    // Only the subnet verb fired; description was unchanged.
    assert_eq!(client.calls(), vec!["subnet_mappings"]);

    // Resync reflects the applied delta.
    assert_eq!(declared.subnet_mapping.len(), 1);
    assert_eq!(declared.subnet_mapping[0].subnet_id, "subnet-b");
}

#[tokio::test]
async fn firewall_scalar_change_skips_collection_verb() {
    let client = MockFirewallClient::default();
    let mut declared = declared_firewall();
    Reconciler::<Firewall>::create(&client, &mut declared)
        .await
        .unwrap();

    let prior = declared.clone();
    declared.description = "edge firewall".into();
    Reconciler::<Firewall>::update(&client, &mut declared, &prior)
        .await
        .unwrap();

    assert_eq!(client.calls(), vec!["description"]);
    assert_eq!(declared.description, "edge firewall");
}

#[tokio::test]
async fn firewall_empty_content_version_is_not_pushed() {
    let client = MockFirewallClient::default();
    let mut declared = declared_firewall();
    declared.app_id_version = "8433-7160".into();
    Reconciler::<Firewall>::create(&client, &mut declared)
        .await
        .unwrap();

    let prior = declared.clone();
    declared.app_id_version = String::new();
    declared.description = "bump".into();
    Reconciler::<Firewall>::update(&client, &mut declared, &prior)
        .await
        .unwrap();

    // description changed, content version cleared: only description fires.
    assert_eq!(client.calls(), vec!["description"]);
}

#[tokio::test]
async fn firewall_partial_update_surfaces_error_and_keeps_earlier_effects() {
    let client = MockFirewallClient {
        fail_subnet_update: true,
        ..Default::default()
    };
    let mut declared = declared_firewall();
    Reconciler::<Firewall>::create(&client, &mut declared)
        .await
        .unwrap();

    let prior = declared.clone();
    declared.description = "edge firewall".into();
    declared.subnet_mapping = vec![SubnetMapping::new("subnet-b")];

    let err = Reconciler::<Firewall>::update(&client, &mut declared, &prior)
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::Api(_)));

    // The description call landed before the subnet call failed; no
    // rollback happens and the next read reconverges.
    assert_eq!(client.calls(), vec!["description", "subnet_mappings"]);
    let stored = client.firewalls.lock().unwrap().get("fw1").cloned().unwrap();
    assert_eq!(stored.description, "edge firewall");
    assert_eq!(stored.subnet_mappings[0].subnet_id, "subnet-a");

    let mut resynced = declared.clone();
    Reconciler::<Firewall>::read(&client, &mut resynced)
        .await
        .unwrap();
    assert_eq!(resynced.subnet_mapping[0].subnet_id, "subnet-a");
}

#[tokio::test]
async fn firewall_delete_clears_id() {
    let client = MockFirewallClient::default();
    let mut declared = declared_firewall();
    Reconciler::<Firewall>::create(&client, &mut declared)
        .await
        .unwrap();

    Reconciler::<Firewall>::delete(&client, &mut declared)
        .await
        .unwrap();
    assert_eq!(declared.id, "");
    assert!(client.firewalls.lock().unwrap().is_empty());
}
