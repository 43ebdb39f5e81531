use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dop_app::{PreProvisioningOrchestrator, PreProvisioningPorts};
use dop_core::abort::AbortReason;
use dop_core::consent::{ConsentFlag, ConsentPrompt, ConsentRecord};
use dop_core::ids::AttemptId;
use dop_core::orchestration::{AttemptOutcome, OrchestrationState, ProvisioningResult};
use dop_core::params::ProvisioningParams;
use dop_core::parser::InvalidRequestKind;
use dop_core::ports::{
    ConsentPromptPort, ConsentStorePort, DeviceStatePort, PreProvisioningEventPort,
    ProvisioningExecutorPort, RemediationPort,
};
use dop_core::preconditions::{CallerClass, EnvironmentSnapshot};
use dop_core::remediation::{RemediationKind, RemediationOutcome, RemediationTicket};
use dop_core::request::{
    keys, DiscoveryRecord, ProvisioningRequest, RequestAction, RequestPayload,
    PROVISIONING_MIME_TYPE,
};
use dop_infra::FileConsentRepository;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

const ADMIN_PACKAGE: &str = "com.example.dpc";
const ADMIN_COMPONENT: &str = "com.example.dpc/.AdminReceiver";

#[tokio::test]
async fn scenario_a_discovery_request_launches_without_remediation() {
    let harness = Harness::build(CallerClass::Primary, encrypted_and_online());

    let outcome = harness
        .orchestrator
        .start(discovery_request())
        .await
        .expect("start");

    assert_eq!(outcome, AttemptOutcome::Completed(ProvisioningResult::Succeeded));
    assert!(harness.remediation.tickets().is_empty());
    assert!(harness.prompt.prompts().is_empty());
    let states = harness.events.states().await;
    assert!(states.contains(&OrchestrationState::Launching));
    let launched = harness.executor.launched();
    assert_eq!(launched.len(), 1);
    assert!(launched[0].started_by_discovery);
}

#[tokio::test]
async fn scenario_b_missing_principal_is_not_reported_as_permission_denied() {
    let harness = Harness::build(CallerClass::Primary, encrypted_and_online());

    let outcome = harness
        .orchestrator
        .start(minimal_request(None))
        .await
        .expect("start");

    let AttemptOutcome::Aborted(AbortReason::InvalidRequest(reason)) = outcome.clone() else {
        panic!("expected invalid request abort, got {outcome:?}");
    };
    assert_eq!(reason.kind, InvalidRequestKind::CallerUnknown);
    assert!(!reason.message.contains("permission denied"));
    assert!(harness.executor.launched().is_empty());
    assert_eq!(harness.events.aborts().await.len(), 1);
}

#[tokio::test]
async fn scenario_c_principal_mismatch_is_permission_denied() {
    let harness = Harness::build(CallerClass::Primary, encrypted_and_online());

    let outcome = harness
        .orchestrator
        .start(minimal_request(Some("com.attacker.app")))
        .await
        .expect("start");

    let AttemptOutcome::Aborted(AbortReason::InvalidRequest(reason)) = outcome.clone() else {
        panic!("expected invalid request abort, got {outcome:?}");
    };
    assert_eq!(reason.kind, InvalidRequestKind::PermissionDenied);
    assert!(reason.message.contains("permission denied"));
}

#[tokio::test]
async fn matching_principal_passes_authentication() {
    let harness = Harness::build(CallerClass::Primary, encrypted_and_online());

    let outcome = harness
        .orchestrator
        .start(minimal_request(Some(ADMIN_PACKAGE)))
        .await
        .expect("start");

    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
}

#[tokio::test]
async fn scenario_d_cancelled_encryption_aborts() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            network_connected: true,
            ..Default::default()
        },
    );

    let outcome = harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");

    let ticket = harness.single_ticket(RemediationKind::Encryption);
    assert_eq!(
        outcome,
        AttemptOutcome::Pending(OrchestrationState::AwaitingEncryptionRemediation {
            ticket: ticket.id.clone()
        })
    );

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(ticket.id, RemediationOutcome::Cancelled)
        .await
        .expect("resolve");

    assert_eq!(outcome, AttemptOutcome::Aborted(AbortReason::UserCancelledEncryption));
    assert_eq!(
        harness.events.aborts().await,
        vec![AbortReason::UserCancelledEncryption]
    );
    assert!(harness.executor.launched().is_empty());
}

#[tokio::test]
async fn scenario_e_cancelled_consent_keeps_attempt_alive() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            device_encrypted: true,
            ..Default::default()
        },
    );

    let outcome = harness
        .orchestrator
        .start(legacy_request(&[(keys::WIFI_SSID, json!("corp-net"))]))
        .await
        .expect("start");
    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    let prompts = harness.prompt.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].admin_package, ADMIN_PACKAGE);

    let outcome = harness.orchestrator.cancel_consent().await.expect("cancel");
    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    assert!(harness.executor.launched().is_empty());
    assert!(harness.events.aborts().await.is_empty());

    harness.orchestrator.request_proceed().await.expect("proceed");
    assert_eq!(harness.prompt.prompts().len(), 2);

    let outcome = harness.orchestrator.confirm_consent().await.expect("confirm");
    assert_eq!(outcome, AttemptOutcome::Completed(ProvisioningResult::Succeeded));

    let attempt = harness.orchestrator.attempt_id().await;
    let flag = harness
        .consent
        .load(&attempt, ADMIN_PACKAGE)
        .await
        .expect("load consent");
    assert!(flag.user_consented);
}

#[tokio::test]
async fn network_success_while_still_offline_issues_new_ticket() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            device_encrypted: true,
            ..Default::default()
        },
    );

    harness
        .orchestrator
        .start(legacy_request(&[(keys::STARTED_BY_DISCOVERY, json!(true))]))
        .await
        .expect("start");
    let first = harness.single_ticket(RemediationKind::Network);

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(first.id.clone(), RemediationOutcome::Success)
        .await
        .expect("resolve first");

    let tickets = harness.remediation.tickets();
    assert_eq!(tickets.len(), 2);
    let second = tickets[1].clone();
    assert_ne!(second.id, first.id);
    assert_eq!(second.kind, RemediationKind::Network);
    assert_eq!(
        outcome,
        AttemptOutcome::Pending(OrchestrationState::AwaitingNetworkRemediation {
            ticket: second.id.clone()
        })
    );

    harness.device.update(|facts| facts.network_connected = true);
    let outcome = harness
        .orchestrator
        .on_remediation_outcome(second.id, RemediationOutcome::Success)
        .await
        .expect("resolve second");

    assert_eq!(outcome, AttemptOutcome::Completed(ProvisioningResult::Succeeded));
}

#[tokio::test]
async fn cancelled_network_selection_aborts() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            device_encrypted: true,
            ..Default::default()
        },
    );
    harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");
    let ticket = harness.single_ticket(RemediationKind::Network);

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(ticket.id, RemediationOutcome::Cancelled)
        .await
        .expect("resolve");

    assert_eq!(outcome, AttemptOutcome::Aborted(AbortReason::UserCancelledNetwork));
}

#[tokio::test]
async fn failed_network_remediation_aborts_with_kind() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            device_encrypted: true,
            ..Default::default()
        },
    );
    harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");
    let ticket = harness.single_ticket(RemediationKind::Network);

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(ticket.id, RemediationOutcome::Failed)
        .await
        .expect("resolve");

    assert_eq!(
        outcome,
        AttemptOutcome::Aborted(AbortReason::RemediationFailed {
            kind: RemediationKind::Network
        })
    );
}

#[tokio::test]
async fn encryption_failure_resumes_at_network_check() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            network_connected: true,
            ..Default::default()
        },
    );
    harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");
    let ticket = harness.single_ticket(RemediationKind::Encryption);

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(ticket.id, RemediationOutcome::Failed)
        .await
        .expect("resolve");

    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    assert!(harness.events.aborts().await.is_empty());
    assert_eq!(harness.remediation.tickets().len(), 1);
}

#[tokio::test]
async fn ownership_abort_wins_over_later_query_failure() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            device_provisioned: true,
            ..Default::default()
        },
    );
    harness.device.fail_network.store(true, Ordering::SeqCst);

    let outcome = harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");

    assert_eq!(
        outcome,
        AttemptOutcome::Aborted(AbortReason::AlreadyProvisioned {
            caller: CallerClass::Primary
        })
    );
    assert_eq!(harness.device.reads(), vec!["provisioned"]);
}

#[tokio::test]
async fn network_resume_does_not_reread_earlier_checks() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            device_encrypted: true,
            ..Default::default()
        },
    );
    harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");
    let ticket = harness.single_ticket(RemediationKind::Network);
    harness.device.clear_reads();
    harness.device.update(|facts| {
        facts.network_connected = true;
        facts.frp_data_block_size = Some(4096);
    });

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(ticket.id, RemediationOutcome::Success)
        .await
        .expect("resolve");

    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    assert_eq!(harness.device.reads(), vec!["network"]);
}

#[tokio::test]
async fn retry_after_remediation_port_failure_resumes_attempt() {
    let harness = Harness::build(CallerClass::Primary, EnvironmentSnapshot::default());
    harness.remediation.fail_next.store(true, Ordering::SeqCst);

    harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect_err("remediation port failure");
    assert_eq!(
        harness.orchestrator.state().await,
        OrchestrationState::CheckingOwnershipProvisioned
    );

    let outcome = harness
        .orchestrator
        .retry_evaluation()
        .await
        .expect("retry");

    let ticket = harness.single_ticket(RemediationKind::Encryption);
    assert_eq!(
        outcome,
        AttemptOutcome::Pending(OrchestrationState::AwaitingEncryptionRemediation {
            ticket: ticket.id
        })
    );
}

#[tokio::test]
async fn encryption_success_resumes_at_network_check() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            network_connected: true,
            ..Default::default()
        },
    );
    harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");
    let ticket = harness.single_ticket(RemediationKind::Encryption);

    let outcome = harness
        .orchestrator
        .on_remediation_outcome(ticket.id, RemediationOutcome::Success)
        .await
        .expect("resolve");

    // The encryption check is not repeated.
    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    assert_eq!(harness.remediation.tickets().len(), 1);
}

#[tokio::test]
async fn resume_request_after_restart_continues_same_attempt() {
    let dir = TempDir::new().expect("temp dir");
    let store_path = dir.path().join("consent.json");

    let before = Harness::with_store(
        CallerClass::Primary,
        EnvironmentSnapshot {
            network_connected: true,
            ..Default::default()
        },
        &store_path,
    );
    before
        .orchestrator
        .start(discovery_request())
        .await
        .expect("start");
    let ticket = before.single_ticket(RemediationKind::Encryption);
    let attempt = before.orchestrator.attempt_id().await;

    // The device restarts encrypted and the actor re-delivers the attempt.
    let after = Harness::with_store(CallerClass::Primary, encrypted_and_online(), &store_path);
    let outcome = after
        .orchestrator
        .start(ticket.resume_request())
        .await
        .expect("resume");

    assert_eq!(after.orchestrator.attempt_id().await, attempt);
    assert_eq!(outcome, AttemptOutcome::Completed(ProvisioningResult::Succeeded));
    let launched = after.executor.launched();
    assert_eq!(launched, vec![ticket.resume_params.clone()]);
}

#[tokio::test]
async fn resumed_attempt_keeps_stored_consent_and_new_attempt_clears_it() {
    let dir = TempDir::new().expect("temp dir");
    let store_path = dir.path().join("consent.json");
    let attempt = AttemptId::from("attempt-with-consent");
    FileConsentRepository::new(store_path.clone())
        .save(&ConsentRecord::new(
            attempt.clone(),
            ADMIN_PACKAGE,
            ConsentFlag {
                user_consented: true,
            },
        ))
        .await
        .expect("seed consent");

    let resumed = Harness::with_store(CallerClass::Primary, encrypted_and_online(), &store_path);
    let outcome = resumed
        .orchestrator
        .start(legacy_request(&[]).resuming(attempt.clone()))
        .await
        .expect("resume");
    assert_eq!(outcome, AttemptOutcome::Completed(ProvisioningResult::Succeeded));
    assert!(resumed.prompt.prompts().is_empty());

    let fresh = Harness::with_store(CallerClass::Primary, encrypted_and_online(), &store_path);
    let outcome = fresh
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");
    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    let flag = fresh
        .consent
        .load(&attempt, ADMIN_PACKAGE)
        .await
        .expect("load");
    assert!(!flag.user_consented);
}

#[tokio::test]
async fn resumed_attempt_for_other_admin_prompts_again() {
    let dir = TempDir::new().expect("temp dir");
    let store_path = dir.path().join("consent.json");
    let attempt = AttemptId::from("attempt-with-consent");
    FileConsentRepository::new(store_path.clone())
        .save(&ConsentRecord::new(
            attempt.clone(),
            ADMIN_PACKAGE,
            ConsentFlag {
                user_consented: true,
            },
        ))
        .await
        .expect("seed consent");

    let harness = Harness::with_store(CallerClass::Primary, encrypted_and_online(), &store_path);
    let request = legacy_request(&[(
        keys::DEVICE_ADMIN_COMPONENT_NAME,
        json!("com.other.dpc/.AdminReceiver"),
    )])
    .resuming(attempt);
    let outcome = harness.orchestrator.start(request).await.expect("resume");

    assert_eq!(outcome, AttemptOutcome::Pending(OrchestrationState::AwaitingConsent));
    let prompts = harness.prompt.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].admin_package, "com.other.dpc");
    assert!(harness.executor.launched().is_empty());
}

#[tokio::test]
async fn secondary_caller_skips_reset_protection_and_consent() {
    let harness = Harness::build(
        CallerClass::Secondary,
        EnvironmentSnapshot {
            device_provisioned: true,
            frp_data_block_size: Some(4096),
            ..encrypted_and_online()
        },
    );

    let outcome = harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");

    assert_eq!(outcome, AttemptOutcome::Completed(ProvisioningResult::Succeeded));
    assert!(harness.prompt.prompts().is_empty());
}

#[tokio::test]
async fn reset_protection_blocks_primary_caller() {
    let harness = Harness::build(
        CallerClass::Primary,
        EnvironmentSnapshot {
            frp_data_block_size: Some(4096),
            ..Default::default()
        },
    );

    let outcome = harness
        .orchestrator
        .start(legacy_request(&[]))
        .await
        .expect("start");

    assert_eq!(outcome, AttemptOutcome::Aborted(AbortReason::FactoryResetProtected));
    assert!(harness.remediation.tickets().is_empty());
}

#[tokio::test]
async fn every_transition_is_emitted() {
    let harness = Harness::build(CallerClass::Primary, encrypted_and_online());

    harness
        .orchestrator
        .start(discovery_request())
        .await
        .expect("start");

    assert_eq!(
        harness.events.states().await,
        vec![
            OrchestrationState::CheckingOwnershipProvisioned,
            OrchestrationState::CheckingNetwork,
            OrchestrationState::Launching,
            OrchestrationState::Done {
                result: ProvisioningResult::Succeeded
            },
        ]
    );
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    orchestrator: PreProvisioningOrchestrator,
    device: Arc<FakeDeviceState>,
    remediation: Arc<RecordingRemediation>,
    prompt: Arc<RecordingPrompt>,
    executor: Arc<RecordingExecutor>,
    events: Arc<RecordingEvents>,
    consent: Arc<FileConsentRepository>,
    _dir: Option<TempDir>,
}

impl Harness {
    fn build(caller: CallerClass, facts: EnvironmentSnapshot) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let mut harness = Self::with_store(caller, facts, &dir.path().join("consent.json"));
        harness._dir = Some(dir);
        harness
    }

    fn with_store(
        caller: CallerClass,
        facts: EnvironmentSnapshot,
        store_path: &std::path::Path,
    ) -> Self {
        let device = Arc::new(FakeDeviceState {
            caller,
            facts: Mutex::new(facts),
            reads: Mutex::new(Vec::new()),
            fail_network: AtomicBool::new(false),
        });
        let remediation = Arc::new(RecordingRemediation::default());
        let prompt = Arc::new(RecordingPrompt::default());
        let executor = Arc::new(RecordingExecutor::default());
        let events = Arc::new(RecordingEvents::default());
        let consent = Arc::new(FileConsentRepository::new(store_path.to_path_buf()));

        let orchestrator = PreProvisioningOrchestrator::new(PreProvisioningPorts {
            device_state: device.clone(),
            remediation: remediation.clone(),
            consent_prompt: prompt.clone(),
            consent_store: consent.clone(),
            executor: executor.clone(),
            event_port: events.clone(),
        });

        Self {
            orchestrator,
            device,
            remediation,
            prompt,
            executor,
            events,
            consent,
            _dir: None,
        }
    }

    fn single_ticket(&self, kind: RemediationKind) -> RemediationTicket {
        let tickets = self.remediation.tickets();
        assert_eq!(tickets.len(), 1, "expected exactly one remediation ticket");
        assert_eq!(tickets[0].kind, kind);
        tickets[0].clone()
    }
}

fn encrypted_and_online() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        device_encrypted: true,
        network_connected: true,
        ..Default::default()
    }
}

fn discovery_request() -> ProvisioningRequest {
    let body = format!(
        "# provisioning tag\n{}={}\n",
        keys::DEVICE_ADMIN_COMPONENT_NAME,
        ADMIN_COMPONENT
    );
    ProvisioningRequest::new(
        RequestAction::NdefDiscovered,
        RequestPayload::Discovery {
            records: vec![DiscoveryRecord {
                mime_type: PROVISIONING_MIME_TYPE.to_string(),
                payload: body,
            }],
        },
    )
}

fn legacy_request(extras: &[(&str, Value)]) -> ProvisioningRequest {
    let mut map = Map::new();
    map.insert(
        keys::DEVICE_ADMIN_COMPONENT_NAME.to_string(),
        json!(ADMIN_COMPONENT),
    );
    for (key, value) in extras {
        map.insert(key.to_string(), value.clone());
    }
    ProvisioningRequest::new(
        RequestAction::LegacyProvisionManagedDevice,
        RequestPayload::Extras { extras: map },
    )
}

fn minimal_request(principal: Option<&str>) -> ProvisioningRequest {
    let mut map = Map::new();
    map.insert(
        keys::DEVICE_ADMIN_PACKAGE_NAME.to_string(),
        json!(ADMIN_PACKAGE),
    );
    let request = ProvisioningRequest::new(
        RequestAction::ProvisionManagedDevice,
        RequestPayload::Extras { extras: map },
    );
    match principal {
        Some(principal) => request.with_calling_principal(principal),
        None => request,
    }
}

struct FakeDeviceState {
    caller: CallerClass,
    facts: Mutex<EnvironmentSnapshot>,
    reads: Mutex<Vec<&'static str>>,
    fail_network: AtomicBool,
}

impl FakeDeviceState {
    fn update(&self, f: impl FnOnce(&mut EnvironmentSnapshot)) {
        f(&mut self.facts.lock().unwrap());
    }

    fn reads(&self) -> Vec<&'static str> {
        self.reads.lock().unwrap().clone()
    }

    fn clear_reads(&self) {
        self.reads.lock().unwrap().clear();
    }

    fn read<T>(
        &self,
        name: &'static str,
        f: impl FnOnce(&EnvironmentSnapshot) -> T,
    ) -> anyhow::Result<T> {
        self.reads.lock().unwrap().push(name);
        Ok(f(&self.facts.lock().unwrap()))
    }
}

#[async_trait]
impl DeviceStatePort for FakeDeviceState {
    async fn caller_class(&self) -> anyhow::Result<CallerClass> {
        Ok(self.caller)
    }

    async fn is_device_provisioned(&self) -> anyhow::Result<bool> {
        self.read("provisioned", |facts| facts.device_provisioned)
    }

    async fn is_user_setup_complete(&self) -> anyhow::Result<bool> {
        self.read("setup", |facts| facts.user_setup_complete)
    }

    async fn frp_data_block_size(&self) -> anyhow::Result<Option<u64>> {
        self.read("frp", |facts| facts.frp_data_block_size)
    }

    async fn is_device_encrypted(&self) -> anyhow::Result<bool> {
        self.read("encrypted", |facts| facts.device_encrypted)
    }

    async fn is_encryption_exempt(&self) -> anyhow::Result<bool> {
        self.read("exempt", |facts| facts.encryption_exempt)
    }

    async fn is_network_connected(&self) -> anyhow::Result<bool> {
        if self.fail_network.load(Ordering::SeqCst) {
            anyhow::bail!("connectivity service unavailable");
        }
        self.read("network", |facts| facts.network_connected)
    }
}

#[derive(Default)]
struct RecordingRemediation {
    tickets: Mutex<Vec<RemediationTicket>>,
    fail_next: AtomicBool,
}

impl RecordingRemediation {
    fn tickets(&self) -> Vec<RemediationTicket> {
        self.tickets.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemediationPort for RecordingRemediation {
    async fn request(&self, ticket: &RemediationTicket) -> anyhow::Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("settings activity unavailable");
        }
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPrompt {
    prompts: Mutex<Vec<ConsentPrompt>>,
}

impl RecordingPrompt {
    fn prompts(&self) -> Vec<ConsentPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConsentPromptPort for RecordingPrompt {
    async fn present_consent(&self, prompt: &ConsentPrompt) -> anyhow::Result<()> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingExecutor {
    launched: Mutex<Vec<ProvisioningParams>>,
}

impl RecordingExecutor {
    fn launched(&self) -> Vec<ProvisioningParams> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProvisioningExecutorPort for RecordingExecutor {
    async fn launch(&self, params: &ProvisioningParams) -> anyhow::Result<ProvisioningResult> {
        self.launched.lock().unwrap().push(params.clone());
        Ok(ProvisioningResult::Succeeded)
    }
}

#[derive(Default)]
struct RecordingEvents {
    states: tokio::sync::Mutex<Vec<OrchestrationState>>,
    aborts: tokio::sync::Mutex<Vec<AbortReason>>,
}

impl RecordingEvents {
    async fn states(&self) -> Vec<OrchestrationState> {
        self.states.lock().await.clone()
    }

    async fn aborts(&self) -> Vec<AbortReason> {
        self.aborts.lock().await.clone()
    }
}

#[async_trait]
impl PreProvisioningEventPort for RecordingEvents {
    async fn emit_state_changed(&self, _attempt: &AttemptId, state: &OrchestrationState) {
        self.states.lock().await.push(state.clone());
    }

    async fn emit_aborted(&self, _attempt: &AttemptId, reason: &AbortReason) {
        self.aborts.lock().await.push(reason.clone());
    }
}
