//! Domain module
//!
//! Core value types shared by the ledger components.

pub mod entry;
pub mod error;
pub mod money;
pub mod participant;
pub mod transaction;

pub use entry::{LedgerEntry, Split};
pub use error::DomainError;
pub use money::{Money, MoneyError, MAX_ENTRY_MAGNITUDE, MONEY_SCALE};
pub use participant::ParticipantId;
pub use transaction::Transaction;
