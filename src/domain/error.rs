//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::money::{Money, MoneyError};
use super::participant::ParticipantId;

/// Ledger-specific errors
///
/// These errors represent business rule violations and domain invariant failures.
/// The netting and settlement computations themselves never raise them; they come
/// from the validating constructors and the optional conservation check.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Amount could not be represented as Money
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    /// Expense total below zero
    #[error("Expense amount must not be negative (got {0})")]
    NegativeAmount(Money),

    /// Split owed amount below zero
    #[error("Split for {participant} must not be negative (got {amount_owed})")]
    NegativeSplit {
        participant: ParticipantId,
        amount_owed: Money,
    },

    /// Expense with nobody to charge
    #[error("Expense has no splits")]
    EmptySplits,

    /// Splits do not add up to the expense amount
    #[error("Splits total {split_total} does not match expense amount {amount}")]
    SplitMismatch { amount: Money, split_total: Money },

    /// Transaction whose payer and receiver coincide
    #[error("Transaction from {0} to itself")]
    SelfTransaction(ParticipantId),

    /// Transaction amount zero or negative
    #[error("Transaction amount must be positive (got {0})")]
    NonPositiveAmount(Money),

    /// Net balances do not sum to zero
    #[error("Net balances do not sum to zero (drift {drift})")]
    ConservationViolated { drift: Money },
}

impl DomainError {
    /// Create a split mismatch error
    pub fn split_mismatch(amount: Money, split_total: Money) -> Self {
        Self::SplitMismatch {
            amount,
            split_total,
        }
    }

    /// Check if this is a client error (caller supplied bad input)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::ConservationViolated { .. })
    }

    /// Check if this error reflects inconsistent stored data
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, Self::ConservationViolated { .. })
    }
}
