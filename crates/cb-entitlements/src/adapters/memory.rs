use crate::domain::entities::{Entitlement, EntitlementKind, EntitlementStatus};
use crate::domain::errors::EntitlementError;
use crate::ports::EntitlementStore;
use shared_types::{AccountId, EntitlementId};
use std::sync::RwLock;

/// In-memory implementation of [`EntitlementStore`].
pub struct InMemoryEntitlementStore {
    rows: RwLock<Vec<Entitlement>>,
}

impl InMemoryEntitlementStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Total row count, live or not. Test hook for no-duplicate assertions.
    pub fn row_count(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }
}

impl Default for InMemoryEntitlementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntitlementStore for InMemoryEntitlementStore {
    fn active_for(
        &self,
        account: &AccountId,
        kind: EntitlementKind,
    ) -> Result<Option<Entitlement>, EntitlementError> {
        let rows = self.rows.read().map_err(|_| EntitlementError::LockPoisoned)?;
        Ok(rows
            .iter()
            .find(|row| {
                &row.account_id == account
                    && row.kind == kind
                    && row.status == EntitlementStatus::Active
            })
            .cloned())
    }

    fn insert(&self, entitlement: Entitlement) -> Result<(), EntitlementError> {
        let mut rows = self.rows.write().map_err(|_| EntitlementError::LockPoisoned)?;
        rows.push(entitlement);
        Ok(())
    }

    fn mark_expired(&self, id: &EntitlementId) -> Result<(), EntitlementError> {
        let mut rows = self.rows.write().map_err(|_| EntitlementError::LockPoisoned)?;
        if let Some(row) = rows.iter_mut().find(|row| &row.id == id) {
            row.status = EntitlementStatus::Expired;
        }
        Ok(())
    }

    fn all_for(&self, account: &AccountId) -> Result<Vec<Entitlement>, EntitlementError> {
        let rows = self.rows.read().map_err(|_| EntitlementError::LockPoisoned)?;
        Ok(rows
            .iter()
            .filter(|row| &row.account_id == account)
            .cloned()
            .collect())
    }
}
