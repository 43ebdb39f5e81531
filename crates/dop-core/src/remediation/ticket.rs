use serde::{Deserialize, Serialize};

use crate::ids::{AttemptId, TicketId};
use crate::params::ProvisioningParams;
use crate::parser::extras_from_params;
use crate::remediation::RemediationKind;
use crate::request::{ProvisioningRequest, RequestAction, RequestPayload};

/// One outstanding suspension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationTicket {
    pub id: TicketId,
    pub kind: RemediationKind,
    pub attempt: AttemptId,
    /// What the attempt needs to continue once the actor reports back.
    pub resume_params: ProvisioningParams,
}

impl RemediationTicket {
    /// Request an actor re-delivers when it cannot hand control back
    /// directly, e.g. after encryption restarts the device.
    ///
    /// Uses the internal legacy action, so the re-delivered request is not
    /// authenticated again; the consent flag stays keyed to the same attempt.
    pub fn resume_request(&self) -> ProvisioningRequest {
        ProvisioningRequest::new(
            RequestAction::LegacyProvisionManagedDevice,
            RequestPayload::Extras {
                extras: extras_from_params(&self.resume_params),
            },
        )
        .resuming(self.attempt.clone())
    }
}
