//! Balance Service
//!
//! Loads a group from its ledger source, nets the balances and plans the
//! settlement in one call.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConservationPolicy};
use crate::domain::{Money, Transaction};
use crate::error::LedgerResult;
use crate::ledger::{compute_net_balances, minimize_cash_flow_with_tolerance, NetBalances};

use super::source::GroupLedgerSource;

/// Balances and suggested settlement for one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBalances {
    pub group_id: String,
    pub balances: NetBalances,
    pub settlements: Vec<Transaction>,
}

impl GroupBalances {
    /// Aggregate drift of the balances (zero for consistent expenses)
    pub fn drift(&self) -> Money {
        self.balances.total()
    }
}

/// Computes group balances on request
pub struct BalanceService<S> {
    source: S,
    settlement_tolerance: Money,
    conservation_policy: ConservationPolicy,
}

impl<S: GroupLedgerSource> BalanceService<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, &Config::default())
    }

    pub fn with_config(source: S, config: &Config) -> Self {
        Self {
            source,
            settlement_tolerance: config.settlement_tolerance,
            conservation_policy: config.conservation_policy,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Net balances and suggested settlement for `group_id`.
    ///
    /// Recomputed from the full expense history on every call.
    ///
    /// # Errors
    /// - `LedgerError::GroupNotFound` (or any source error) from the ledger source
    /// - `DomainError::ConservationViolated` under `ConservationPolicy::Strict`
    ///   when the balances drift from zero by more than the settlement tolerance
    pub fn group_balances(&self, group_id: &str) -> LedgerResult<GroupBalances> {
        let members = self.source.members(group_id)?;
        let entries = self.source.entries(group_id)?;

        let balances = compute_net_balances(&entries, &members);

        if let Err(err) = balances.check_conservation(self.settlement_tolerance) {
            match self.conservation_policy {
                ConservationPolicy::Strict => {
                    tracing::error!(group_id, error = %err, "Rejecting inconsistent group ledger");
                    return Err(err.into());
                }
                ConservationPolicy::Permissive => {
                    tracing::warn!(
                        group_id,
                        drift = %balances.total(),
                        "Group ledger does not net to zero"
                    );
                }
            }
        }

        let settlements = minimize_cash_flow_with_tolerance(&balances, self.settlement_tolerance);

        tracing::info!(
            group_id,
            members = members.len(),
            expenses = entries.len(),
            settlements = settlements.len(),
            "Group balances computed"
        );

        Ok(GroupBalances {
            group_id: group_id.to_string(),
            balances,
            settlements,
        })
    }
}
