use crate::domain::entities::GrantAuditRecord;
use crate::domain::errors::LedgerError;
use crate::ports::{GrantAuditLog, LedgerStore};
use shared_types::{AccountId, PaymentId};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of [`LedgerStore`].
///
/// `try_debit` holds the write lock across the whole check-and-decrement,
/// which gives the same atomicity a SQL conditional update
/// (`UPDATE ... SET balance = balance - $n WHERE balance >= $n`) provides.
pub struct InMemoryLedger {
    balances: RwLock<HashMap<AccountId, u64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            balances: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedger {
    fn balance(&self, account: &AccountId) -> Result<u64, LedgerError> {
        let balances = self
            .balances
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?;
        Ok(balances.get(account).copied().unwrap_or(0))
    }

    fn credit(&self, account: &AccountId, amount: u64) -> Result<u64, LedgerError> {
        let mut balances = self
            .balances
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?;
        let balance = balances.entry(account.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(*balance)
    }

    fn try_debit(&self, account: &AccountId, amount: u64) -> Result<u64, LedgerError> {
        let mut balances = self
            .balances
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?;
        let balance = balances.entry(account.clone()).or_insert(0);
        if *balance < amount {
            return Err(LedgerError::InsufficientTokens {
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(*balance)
    }
}

/// In-memory implementation of [`GrantAuditLog`].
pub struct InMemoryGrantAuditLog {
    records: RwLock<Vec<GrantAuditRecord>>,
}

impl InMemoryGrantAuditLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryGrantAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl GrantAuditLog for InMemoryGrantAuditLog {
    fn record_if_absent(&self, record: GrantAuditRecord) -> Result<bool, LedgerError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?;
        if records.iter().any(|r| r.payment_id == record.payment_id) {
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }

    fn find(&self, payment_id: &PaymentId) -> Result<Option<GrantAuditRecord>, LedgerError> {
        let records = self
            .records
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?;
        Ok(records.iter().find(|r| &r.payment_id == payment_id).cloned())
    }

    fn records_for(&self, account: &AccountId) -> Result<Vec<GrantAuditRecord>, LedgerError> {
        let records = self
            .records
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?;
        Ok(records
            .iter()
            .filter(|r| &r.account_id == account)
            .cloned()
            .collect())
    }
}
