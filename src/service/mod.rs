//! Service module
//!
//! Seam between the ledger computations and the expense-management service
//! that owns groups, members and expenses.

mod balance_service;
mod source;

pub use balance_service::{BalanceService, GroupBalances};
pub use source::{GroupLedgerSource, GroupSnapshot, InMemoryLedgerSource};
