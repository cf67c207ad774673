//! split_ledger Library
//!
//! Group expense netting and debt settlement.
//!
//! ```
//! use split_ledger::domain::{LedgerEntry, Money, ParticipantId, Split};
//! use split_ledger::ledger::{compute_net_balances, minimize_cash_flow};
//!
//! let ten = Money::from_units(10).unwrap();
//! let entries = vec![LedgerEntry::new(
//!     "A",
//!     Money::from_units(30).unwrap(),
//!     vec![Split::new("A", ten), Split::new("B", ten), Split::new("C", ten)],
//! )];
//! let members: Vec<ParticipantId> = vec!["A".into(), "B".into(), "C".into()];
//!
//! let balances = compute_net_balances(&entries, &members);
//! let settlements = minimize_cash_flow(&balances);
//! assert_eq!(settlements.len(), 2);
//! ```

pub mod config;
pub mod domain;
pub mod ledger;
pub mod service;

mod error;

pub use config::{Config, ConfigError, ConservationPolicy, LogFormat};
pub use domain::{DomainError, LedgerEntry, Money, MoneyError, ParticipantId, Split, Transaction};
pub use error::{ErrorResponse, LedgerError, LedgerResult};
pub use ledger::{compute_net_balances, minimize_cash_flow, NetBalances, SETTLEMENT_TOLERANCE};
pub use service::{BalanceService, GroupBalances, GroupLedgerSource, InMemoryLedgerSource};
