use crate::domain::entities::{Entitlement, EntitlementKind};
use crate::domain::errors::EntitlementError;
use shared_types::{AccountId, EntitlementId};

/// Durable entitlement records keyed by account and kind.
pub trait EntitlementStore: Send + Sync {
    /// The `Active` row for the pair, if any. At most one can exist.
    fn active_for(
        &self,
        account: &AccountId,
        kind: EntitlementKind,
    ) -> Result<Option<Entitlement>, EntitlementError>;

    /// Inserts a new entitlement row.
    fn insert(&self, entitlement: Entitlement) -> Result<(), EntitlementError>;

    /// Flips the row's status to `Expired`. Unknown ids are a no-op.
    fn mark_expired(&self, id: &EntitlementId) -> Result<(), EntitlementError>;

    /// Every row recorded for an account, oldest first.
    fn all_for(&self, account: &AccountId) -> Result<Vec<Entitlement>, EntitlementError>;
}
