//! Pre-provisioning orchestrator.
//!
//! This module coordinates the pre-provisioning state machine and side effects.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};

use dop_core::{
    consent::{ConsentFlag, ConsentGate, ConsentPrompt, ConsentRecord},
    ids::{AttemptId, TicketId},
    orchestration::{
        AttemptOutcome, OrchestrationState, ProvisioningAction, ProvisioningEvent,
        ProvisioningResult, ProvisioningStateMachine,
    },
    params::ProvisioningParams,
    parser::RequestParser,
    ports::{
        ConsentPromptPort, ConsentStorePort, DeviceStatePort, PreProvisioningEventPort,
        ProvisioningExecutorPort, RemediationPort,
    },
    preconditions::{CallerClass, Decision, Evaluation, Precondition, PreconditionEvaluator},
    remediation::{CoordinatorError, RemediationCoordinator, RemediationOutcome, RemediationTicket},
    request::ProvisioningRequest,
};

use crate::usecases::preprovisioning::context::PreProvisioningContext;

/// Errors produced by the pre-provisioning orchestrator.
///
/// These are port or programming failures. Conditions the user should see
/// end the attempt in [`OrchestrationState::Aborted`] instead.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("device state query failed: {0}")]
    DeviceState(#[source] anyhow::Error),
    #[error("remediation request failed: {0}")]
    Remediation(#[source] anyhow::Error),
    #[error("consent store failed: {0}")]
    ConsentStore(#[source] anyhow::Error),
    #[error("consent prompt failed: {0}")]
    ConsentPrompt(#[source] anyhow::Error),
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
    #[error("an attempt is already running (state {0:?})")]
    AlreadyStarted(OrchestrationState),
    #[error("action {0} requires an accepted request")]
    NoAcceptedRequest(&'static str),
}

/// Ports driven by the orchestrator.
#[derive(Clone)]
pub struct PreProvisioningPorts {
    pub device_state: Arc<dyn DeviceStatePort>,
    pub remediation: Arc<dyn RemediationPort>,
    pub consent_prompt: Arc<dyn ConsentPromptPort>,
    pub consent_store: Arc<dyn ConsentStorePort>,
    pub executor: Arc<dyn ProvisioningExecutorPort>,
    pub event_port: Arc<dyn PreProvisioningEventPort>,
}

#[derive(Debug, Clone)]
struct AcceptedRequest {
    params: ProvisioningParams,
    caller: CallerClass,
}

/// Orchestrator that drives one pre-provisioning attempt.
pub struct PreProvisioningOrchestrator {
    context: Arc<PreProvisioningContext>,

    accepted: Mutex<Option<AcceptedRequest>>,
    consent_gate: Mutex<ConsentGate>,
    coordinator: Mutex<RemediationCoordinator>,

    ports: PreProvisioningPorts,
}

impl PreProvisioningOrchestrator {
    pub fn new(ports: PreProvisioningPorts) -> Self {
        Self {
            context: PreProvisioningContext::default().arc(),
            accepted: Mutex::new(None),
            consent_gate: Mutex::new(ConsentGate::default()),
            coordinator: Mutex::new(RemediationCoordinator::new()),
            ports,
        }
    }

    /// Parses `request` and drives the attempt to its first suspension
    /// point or terminal state.
    ///
    /// A request carrying a resumed attempt id keeps that attempt's consent
    /// flag. Any other request starts a new attempt and clears it.
    pub async fn start(
        &self,
        request: ProvisioningRequest,
    ) -> Result<AttemptOutcome, OrchestratorError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = self.context.get_state().await;
        if state != OrchestrationState::Init {
            return Err(OrchestratorError::AlreadyStarted(state));
        }

        let resumed = request.resumed_attempt.is_some();
        let attempt = request
            .resumed_attempt
            .clone()
            .unwrap_or_else(AttemptId::new);
        self.context.set_attempt_id(attempt.clone()).await;
        info!(%attempt, action = %request.action, resumed, "pre-provisioning request received");

        let event = match RequestParser::parse(&request) {
            Ok(params) => {
                self.accept(&attempt, params, resumed).await?;
                ProvisioningEvent::RequestAccepted
            }
            Err(reason) => {
                warn!(%attempt, kind = ?reason.kind, error = %reason, "pre-provisioning request rejected");
                ProvisioningEvent::RequestRejected { reason }
            }
        };

        self.dispatch_locked(event).await.map(AttemptOutcome::from)
    }

    /// Re-runs the checks interrupted by a port failure.
    ///
    /// A no-op while a remediation ticket is still outstanding or outside
    /// the checking and remediation states.
    pub async fn retry_evaluation(&self) -> Result<AttemptOutcome, OrchestratorError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = self.context.get_state().await;
        if state.pending_ticket().is_some() && self.coordinator.lock().await.outstanding().is_some()
        {
            info!(?state, "remediation still outstanding; retry ignored");
            return Ok(state.into());
        }

        self.dispatch_locked(ProvisioningEvent::RetryRequested)
            .await
            .map(AttemptOutcome::from)
    }

    /// Resume entry point for external remediation actors.
    pub async fn on_remediation_outcome(
        &self,
        ticket: TicketId,
        outcome: RemediationOutcome,
    ) -> Result<AttemptOutcome, OrchestratorError> {
        let signal = self.coordinator.lock().await.resolve(&ticket, outcome)?;
        self.dispatch(ProvisioningEvent::RemediationResolved { signal })
            .await
            .map(AttemptOutcome::from)
    }

    pub async fn confirm_consent(&self) -> Result<AttemptOutcome, OrchestratorError> {
        self.dispatch(ProvisioningEvent::ConsentConfirmed)
            .await
            .map(AttemptOutcome::from)
    }

    pub async fn cancel_consent(&self) -> Result<AttemptOutcome, OrchestratorError> {
        self.dispatch(ProvisioningEvent::ConsentCancelled)
            .await
            .map(AttemptOutcome::from)
    }

    /// Explicit proceed after a cancelled confirmation: shows the prompt again.
    pub async fn request_proceed(&self) -> Result<AttemptOutcome, OrchestratorError> {
        self.dispatch(ProvisioningEvent::ProceedRequested)
            .await
            .map(AttemptOutcome::from)
    }

    pub async fn state(&self) -> OrchestrationState {
        self.context.get_state().await
    }

    pub async fn outcome(&self) -> AttemptOutcome {
        self.state().await.into()
    }

    pub async fn attempt_id(&self) -> AttemptId {
        self.context.attempt_id().await
    }

    pub async fn outstanding_ticket(&self) -> Option<RemediationTicket> {
        self.coordinator.lock().await.outstanding().cloned()
    }

    async fn accept(
        &self,
        attempt: &AttemptId,
        params: ProvisioningParams,
        resumed: bool,
    ) -> Result<(), OrchestratorError> {
        let caller = self
            .ports
            .device_state
            .caller_class()
            .await
            .map_err(OrchestratorError::DeviceState)?;

        let admin_package = params
            .infer_device_admin_package_name()
            .unwrap_or_default()
            .to_string();
        let flag = if resumed {
            self.ports
                .consent_store
                .load(attempt, &admin_package)
                .await
                .map_err(OrchestratorError::ConsentStore)?
        } else {
            self.ports
                .consent_store
                .clear()
                .await
                .map_err(OrchestratorError::ConsentStore)?;
            ConsentFlag::default()
        };
        debug!(%attempt, %caller, user_consented = flag.user_consented, "pre-provisioning request accepted");

        *self.consent_gate.lock().await = ConsentGate::new(flag);
        *self.coordinator.lock().await = RemediationCoordinator::new();
        *self.accepted.lock().await = Some(AcceptedRequest { params, caller });
        Ok(())
    }

    async fn dispatch(
        &self,
        event: ProvisioningEvent,
    ) -> Result<OrchestrationState, OrchestratorError> {
        let event = self.capture_context(event).await;
        // Serializes concurrent dispatch calls so two callers never act on
        // the same state.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.dispatch_locked(event).await
    }

    /// Caller holds the dispatch lock.
    async fn dispatch_locked(
        &self,
        event: ProvisioningEvent,
    ) -> Result<OrchestrationState, OrchestratorError> {
        let attempt = self.context.attempt_id().await;

        let span = info_span!(
            "usecase.preprovisioning_orchestrator.dispatch",
            attempt = %attempt,
            event = ?event
        );
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                if current.is_terminal() {
                    info!(state = ?current, event = ?event, "event ignored in terminal state");
                    continue;
                }

                let from = current.clone();
                let event_name = format!("{:?}", event);
                let (next, actions) = ProvisioningStateMachine::transition(current, event);
                info!(from = ?from, to = ?next, event = %event_name, "pre-provisioning state transition");
                let follow_up_events = self.execute_actions(&attempt, actions).await?;
                self.set_state_and_emit(&attempt, next.clone()).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        attempt: &AttemptId,
        actions: Vec<ProvisioningAction>,
    ) -> Result<Vec<ProvisioningEvent>, OrchestratorError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "pre-provisioning executing action");
            match action {
                ProvisioningAction::Evaluate { from } => {
                    let accepted = self.accepted_request("Evaluate").await?;
                    let evaluation = self.evaluate_preconditions(from, &accepted).await?;
                    info!(
                        from = ?from,
                        decision = ?evaluation.decision,
                        trace = ?evaluation.trace,
                        "preconditions evaluated"
                    );
                    follow_up_events.push(ProvisioningEvent::PreconditionsEvaluated {
                        decision: evaluation.decision,
                    });
                }
                ProvisioningAction::BeginRemediation { kind } => {
                    let accepted = self.accepted_request("BeginRemediation").await?;
                    let ticket =
                        self.coordinator
                            .lock()
                            .await
                            .begin(kind, attempt, &accepted.params)?;
                    if let Err(err) = self.ports.remediation.request(&ticket).await {
                        error!(%kind, ticket = %ticket.id, error = %err, "remediation request failed");
                        self.coordinator.lock().await.abandon();
                        return Err(OrchestratorError::Remediation(err));
                    }
                    follow_up_events.push(ProvisioningEvent::RemediationRequested {
                        kind,
                        ticket: ticket.id,
                    });
                }
                ProvisioningAction::ConsultConsent => {
                    let accepted = self.accepted_request("ConsultConsent").await?;
                    let required = self
                        .consent_gate
                        .lock()
                        .await
                        .requires_consent(&accepted.params, accepted.caller);
                    debug!(required, "consent gate consulted");
                    follow_up_events.push(if required {
                        ProvisioningEvent::ConsentRequired
                    } else {
                        ProvisioningEvent::ConsentNotRequired
                    });
                }
                ProvisioningAction::PresentConsent => {
                    let accepted = self.accepted_request("PresentConsent").await?;
                    let prompt = ConsentPrompt {
                        attempt: attempt.clone(),
                        admin_package: accepted
                            .params
                            .infer_device_admin_package_name()
                            .unwrap_or_default()
                            .to_string(),
                        admin_component: accepted.params.device_admin_component_name.clone(),
                    };
                    self.ports
                        .consent_prompt
                        .present_consent(&prompt)
                        .await
                        .map_err(OrchestratorError::ConsentPrompt)?;
                }
                ProvisioningAction::PersistConsent => {
                    let accepted = self.accepted_request("PersistConsent").await?;
                    let admin_package = accepted
                        .params
                        .infer_device_admin_package_name()
                        .unwrap_or_default();
                    let flag = {
                        let mut gate = self.consent_gate.lock().await;
                        gate.on_confirm();
                        gate.flag()
                    };
                    self.ports
                        .consent_store
                        .save(&ConsentRecord::new(attempt.clone(), admin_package, flag))
                        .await
                        .map_err(|err| {
                            error!(action = "PersistConsent", error = %err, "failed to persist consent");
                            OrchestratorError::ConsentStore(err)
                        })?;
                }
                ProvisioningAction::LaunchProvisioning => {
                    let accepted = self.accepted_request("LaunchProvisioning").await?;
                    let result = match self.ports.executor.launch(&accepted.params).await {
                        Ok(result) => result,
                        Err(err) => {
                            error!(error = %err, "provisioning executor failed");
                            ProvisioningResult::Failed {
                                message: err.to_string(),
                            }
                        }
                    };
                    info!(?result, "provisioning finished");
                    follow_up_events.push(ProvisioningEvent::ProvisioningFinished { result });
                }
                ProvisioningAction::ReportAbort { reason } => {
                    if reason.is_user_cancellation() {
                        info!(kind = ?reason.kind(), %reason, "pre-provisioning cancelled by user");
                    } else {
                        warn!(kind = ?reason.kind(), %reason, "pre-provisioning aborted");
                    }
                    self.ports.event_port.emit_aborted(attempt, &reason).await;
                }
            }
        }

        Ok(follow_up_events)
    }

    /// Runs the checks from `from` in order, reading each check's facts
    /// only when that check runs.
    async fn evaluate_preconditions(
        &self,
        from: Precondition,
        accepted: &AcceptedRequest,
    ) -> Result<Evaluation, OrchestratorError> {
        let mut trace = Vec::new();
        for precondition in from.and_following() {
            let facts = self
                .ports
                .device_state
                .facts_for(precondition, accepted.caller)
                .await
                .map_err(|err| {
                    error!(action = "Evaluate", ?precondition, error = %err, "device state query failed");
                    OrchestratorError::DeviceState(err)
                })?;
            let (record, failed) = PreconditionEvaluator::check_one(
                precondition,
                &accepted.params,
                accepted.caller,
                &facts,
            );
            trace.push(record);
            if let Some(decision) = failed {
                return Ok(Evaluation { decision, trace });
            }
        }

        Ok(Evaluation {
            decision: Decision::Proceed,
            trace,
        })
    }

    async fn capture_context(&self, event: ProvisioningEvent) -> ProvisioningEvent {
        if matches!(event, ProvisioningEvent::ConsentCancelled)
            && self.context.get_state().await == OrchestrationState::AwaitingConsent
        {
            self.consent_gate.lock().await.on_cancel();
        }
        event
    }

    async fn accepted_request(
        &self,
        action: &'static str,
    ) -> Result<AcceptedRequest, OrchestratorError> {
        self.accepted
            .lock()
            .await
            .clone()
            .ok_or(OrchestratorError::NoAcceptedRequest(action))
    }

    async fn set_state_and_emit(&self, attempt: &AttemptId, state: OrchestrationState) {
        self.context.set_state(state.clone()).await;
        self.ports
            .event_port
            .emit_state_changed(attempt, &state)
            .await;
    }
}
