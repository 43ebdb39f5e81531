use std::sync::Arc;

use dop_core::ids::AttemptId;
use dop_core::orchestration::OrchestrationState;
use tokio::sync::Mutex;

/// Shared pre-provisioning context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: Held by `start`, `retry_evaluation` and `dispatch` to serialize concurrent calls.
/// - `state`: Used for both reading (`get_state`) and writing (during `dispatch`).
#[derive(Clone)]
pub struct PreProvisioningContext {
    /// Current orchestration state.
    state: Arc<Mutex<OrchestrationState>>,
    /// Attempt the state belongs to; replaced when a request is started.
    attempt: Arc<Mutex<AttemptId>>,
    /// Serializes dispatch calls so transition, actions and state update
    /// run as one step. Never acquired by `get_state`.
    dispatch_lock: Arc<Mutex<()>>,
}

impl PreProvisioningContext {
    pub fn new(initial_state: OrchestrationState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            attempt: Arc::new(Mutex::new(AttemptId::new())),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Lightweight read that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> OrchestrationState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: OrchestrationState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }

    pub async fn attempt_id(&self) -> AttemptId {
        self.attempt.lock().await.clone()
    }

    pub async fn set_attempt_id(&self, attempt: AttemptId) {
        *self.attempt.lock().await = attempt;
    }
}

impl Default for PreProvisioningContext {
    fn default() -> Self {
        Self::new(OrchestrationState::Init)
    }
}
