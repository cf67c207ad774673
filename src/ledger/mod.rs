//! Ledger module
//!
//! Netting and settlement over a group's expense history. Both steps are
//! pure functions over caller-supplied values: no I/O, no shared state.

pub mod aggregator;
pub mod planner;

pub use aggregator::{compute_net_balances, NetBalances};
pub use planner::{minimize_cash_flow, minimize_cash_flow_with_tolerance, SETTLEMENT_TOLERANCE};
