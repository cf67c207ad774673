//! Settlement transactions
//!
//! A suggested payment from one participant to another. Never stored.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Money;
use super::participant::ParticipantId;

/// Suggested payment that reduces outstanding group debt
///
/// # Invariants
/// - `from != to`
/// - `amount > 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// Wire form, checked through [`Transaction::new`] on the way in
#[derive(Deserialize)]
struct TransactionRecord {
    from: ParticipantId,
    to: ParticipantId,
    amount: Money,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = DomainError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(record.from, record.to, record.amount)
    }
}

impl Transaction {
    /// Create a transaction with validation.
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Result<Self, DomainError> {
        if from == to {
            return Err(DomainError::SelfTransaction(from));
        }

        if !amount.is_positive() {
            return Err(DomainError::NonPositiveAmount(amount));
        }

        Ok(Self { from, to, amount })
    }
}
