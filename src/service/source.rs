//! Ledger sources
//!
//! Where a group's members and recorded expenses come from. Persistence
//! lives outside this crate; it implements [`GroupLedgerSource`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::{LedgerEntry, Money, ParticipantId, Split};
use crate::error::{LedgerError, LedgerResult};

/// Read access to a group's membership and expense history
pub trait GroupLedgerSource {
    /// Current members of the group
    fn members(&self, group_id: &str) -> LedgerResult<Vec<ParticipantId>>;

    /// Every recorded expense of the group
    fn entries(&self, group_id: &str) -> LedgerResult<Vec<LedgerEntry>>;
}

impl<S: GroupLedgerSource + ?Sized> GroupLedgerSource for &S {
    fn members(&self, group_id: &str) -> LedgerResult<Vec<ParticipantId>> {
        (**self).members(group_id)
    }

    fn entries(&self, group_id: &str) -> LedgerResult<Vec<LedgerEntry>> {
        (**self).entries(group_id)
    }
}

/// One group's snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    #[serde(default)]
    pub members: Vec<ParticipantId>,
    #[serde(default)]
    pub expenses: Vec<LedgerEntry>,
}

/// In-memory source, loadable from a JSON snapshot:
///
/// ```json
/// {"groups": {"trip": {"members": ["alice", "bob"], "expenses": [...]}}}
/// ```
///
/// The split tolerance applied by [`record_expense`](Self::record_expense)
/// comes from [`Config::split_tolerance`] and is not part of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryLedgerSource {
    groups: BTreeMap<String, GroupSnapshot>,
    #[serde(skip, default = "default_split_tolerance")]
    split_tolerance: Money,
}

fn default_split_tolerance() -> Money {
    Config::default().split_tolerance
}

impl Default for InMemoryLedgerSource {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}

impl InMemoryLedgerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty source using the configured split tolerance
    pub fn with_config(config: &Config) -> Self {
        Self {
            groups: BTreeMap::new(),
            split_tolerance: config.split_tolerance,
        }
    }

    /// Replace the split tolerance, e.g. after loading a snapshot
    pub fn with_split_tolerance(mut self, split_tolerance: Money) -> Self {
        self.split_tolerance = split_tolerance;
        self
    }

    pub fn split_tolerance(&self) -> Money {
        self.split_tolerance
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Ids of every group, ascending
    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Create an empty group
    pub fn create_group(&mut self, group_id: impl Into<String>) -> LedgerResult<()> {
        let group_id = group_id.into();
        if self.groups.contains_key(&group_id) {
            return Err(LedgerError::InvalidRequest(format!(
                "group {group_id} already exists"
            )));
        }
        self.groups.insert(group_id, GroupSnapshot::default());
        Ok(())
    }

    /// Add a member to an existing group
    pub fn add_member(
        &mut self,
        group_id: &str,
        member: impl Into<ParticipantId>,
    ) -> LedgerResult<()> {
        let group = self.group_mut(group_id)?;
        let member = member.into();
        if group.members.contains(&member) {
            return Err(LedgerError::InvalidRequest(format!(
                "{member} is already in group {group_id}"
            )));
        }
        group.members.push(member);
        Ok(())
    }

    /// Record an expense after validating it.
    ///
    /// The payer and every split participant must belong to the group, and
    /// the splits must add up to `amount` within the source's split tolerance.
    pub fn record_expense(
        &mut self,
        group_id: &str,
        payer: impl Into<ParticipantId>,
        amount: Money,
        splits: Vec<Split>,
    ) -> LedgerResult<()> {
        let payer = payer.into();
        let split_tolerance = self.split_tolerance;
        let group = self.group_mut(group_id)?;

        let outsider = std::iter::once(&payer)
            .chain(splits.iter().map(|s| &s.participant))
            .find(|p| !group.members.contains(*p));
        if let Some(outsider) = outsider {
            return Err(LedgerError::InvalidRequest(format!(
                "{outsider} is not a member of group {group_id}"
            )));
        }

        let entry = LedgerEntry::validated(payer, amount, splits, split_tolerance)?;

        tracing::debug!(
            group_id,
            payer = %entry.payer(),
            amount = %entry.amount(),
            "Expense recorded"
        );

        group.expenses.push(entry);
        Ok(())
    }

    fn group(&self, group_id: &str) -> LedgerResult<&GroupSnapshot> {
        self.groups
            .get(group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    fn group_mut(&mut self, group_id: &str) -> LedgerResult<&mut GroupSnapshot> {
        self.groups
            .get_mut(group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }
}

impl GroupLedgerSource for InMemoryLedgerSource {
    fn members(&self, group_id: &str) -> LedgerResult<Vec<ParticipantId>> {
        Ok(self.group(group_id)?.members.clone())
    }

    fn entries(&self, group_id: &str) -> LedgerResult<Vec<LedgerEntry>> {
        Ok(self.group(group_id)?.expenses.clone())
    }
}
