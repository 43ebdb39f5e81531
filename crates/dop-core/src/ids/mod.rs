//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Identifies one end-to-end provisioning attempt.
///
/// Survives a remediation round-trip inside resume requests and keys the
/// persisted consent record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(String);

/// Correlation token of an outstanding remediation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(String);

impl_id!(AttemptId, TicketId);
