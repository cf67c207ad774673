//! Ledger entries
//!
//! A ledger entry is one recorded expense: who paid, how much, and how much
//! each participant owes for it. Entries are immutable once built.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Money;
use super::participant::ParticipantId;

/// One participant's share of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub participant: ParticipantId,
    pub amount_owed: Money,
}

impl Split {
    pub fn new(participant: impl Into<ParticipantId>, amount_owed: Money) -> Self {
        Self {
            participant: participant.into(),
            amount_owed,
        }
    }
}

/// A recorded expense
///
/// Deserialized entries are held to the entry amount cap; split totals are
/// not rechecked, so legacy mismatched entries still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct LedgerEntry {
    payer: ParticipantId,
    amount: Money,
    splits: Vec<Split>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Wire form of [`LedgerEntry`]
#[derive(Deserialize)]
struct EntryRecord {
    payer: ParticipantId,
    amount: Money,
    splits: Vec<Split>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<EntryRecord> for LedgerEntry {
    type Error = DomainError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        check_entry_bounds(record.amount, &record.splits)?;
        Ok(Self {
            payer: record.payer,
            amount: record.amount,
            splits: record.splits,
            description: record.description,
        })
    }
}

fn check_entry_bounds(amount: Money, splits: &[Split]) -> Result<(), DomainError> {
    amount.check_entry_bound()?;
    for split in splits {
        split.amount_owed.check_entry_bound()?;
    }
    Ok(())
}

impl LedgerEntry {
    /// Build an entry without checking it.
    ///
    /// Use this for entries that were validated when they were recorded.
    pub fn new(payer: impl Into<ParticipantId>, amount: Money, splits: Vec<Split>) -> Self {
        Self {
            payer: payer.into(),
            amount,
            splits,
            description: None,
        }
    }

    /// Build an entry, rejecting anything the entry-creation path must not persist.
    ///
    /// # Errors
    /// - `DomainError::InvalidAmount` if the amount or a split exceeds the entry cap
    /// - `DomainError::NegativeAmount` if `amount < 0`
    /// - `DomainError::EmptySplits` if there are no splits
    /// - `DomainError::NegativeSplit` if any owed amount is below zero
    /// - `DomainError::SplitMismatch` if the splits miss the amount by more than `tolerance`
    pub fn validated(
        payer: impl Into<ParticipantId>,
        amount: Money,
        splits: Vec<Split>,
        tolerance: Money,
    ) -> Result<Self, DomainError> {
        check_entry_bounds(amount, &splits)?;

        if amount.is_negative() {
            return Err(DomainError::NegativeAmount(amount));
        }

        if splits.is_empty() {
            return Err(DomainError::EmptySplits);
        }

        if let Some(split) = splits.iter().find(|s| s.amount_owed.is_negative()) {
            return Err(DomainError::NegativeSplit {
                participant: split.participant.clone(),
                amount_owed: split.amount_owed,
            });
        }

        let split_total: Money = splits.iter().map(|s| s.amount_owed).sum();
        if !(split_total - amount).is_within(tolerance) {
            return Err(DomainError::split_mismatch(amount, split_total));
        }

        Ok(Self::new(payer, amount, splits))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn payer(&self) -> &ParticipantId {
        &self.payer
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sum of all owed amounts
    pub fn split_total(&self) -> Money {
        self.splits.iter().map(|s| s.amount_owed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::{MoneyError, MAX_ENTRY_MAGNITUDE};

    fn money(cents: i64) -> Money {
        Money::from_cents(cents).unwrap()
    }

    fn eps() -> Money {
        money(1)
    }

    #[test]
    fn test_validated_entry_ok() {
        let entry = LedgerEntry::validated(
            "alice",
            money(3000),
            vec![
                Split::new("alice", money(1000)),
                Split::new("bob", money(1000)),
                Split::new("carol", money(1000)),
            ],
            eps(),
        )
        .unwrap();

        assert_eq!(entry.payer().as_str(), "alice");
        assert_eq!(entry.split_total(), money(3000));
        assert!(entry.description().is_none());
    }

    #[test]
    fn test_validated_entry_within_tolerance() {
        // 10.00 three ways, rounded shares
        let entry = LedgerEntry::validated(
            "alice",
            money(1000),
            vec![
                Split::new("alice", money(333)),
                Split::new("bob", money(333)),
                Split::new("carol", money(333)),
            ],
            eps(),
        );
        assert!(entry.is_ok());
    }

    #[test]
    fn test_validated_entry_mismatch() {
        let result = LedgerEntry::validated(
            "alice",
            money(3000),
            vec![Split::new("bob", money(2500))],
            eps(),
        );

        assert_eq!(
            result,
            Err(DomainError::split_mismatch(money(3000), money(2500)))
        );
    }

    #[test]
    fn test_validated_entry_negative_amount() {
        let result = LedgerEntry::validated("alice", money(-100), vec![], eps());
        assert!(matches!(result, Err(DomainError::NegativeAmount(_))));
    }

    #[test]
    fn test_validated_entry_empty_splits() {
        let result = LedgerEntry::validated("alice", money(100), vec![], eps());
        assert_eq!(result, Err(DomainError::EmptySplits));
    }

    #[test]
    fn test_validated_entry_negative_split() {
        let result = LedgerEntry::validated(
            "alice",
            money(100),
            vec![Split::new("bob", money(200)), Split::new("carol", money(-100))],
            eps(),
        );
        assert!(matches!(
            result,
            Err(DomainError::NegativeSplit { ref participant, .. })
                if participant.as_str() == "carol"
        ));
    }

    #[test]
    fn test_validated_entry_above_cap() {
        let max = Money::from_units(MAX_ENTRY_MAGNITUDE).unwrap();
        let over = max + money(1);

        let ok = LedgerEntry::validated("alice", max, vec![Split::new("bob", max)], eps());
        assert!(ok.is_ok());

        let result = LedgerEntry::validated("alice", over, vec![Split::new("bob", over)], eps());
        assert_eq!(result, Err(DomainError::InvalidAmount(MoneyError::Overflow)));
    }

    #[test]
    fn test_entry_json_above_cap_rejected() {
        let json = r#"{
            "payer": "alice",
            "amount": "1000000000000.01",
            "splits": [{"participant": "bob", "amount_owed": "1000000000000.01"}]
        }"#;

        let result: Result<LedgerEntry, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("maximum entry amount"), "{err}");
    }

    #[test]
    fn test_entry_json_keeps_mismatched_splits() {
        let json = r#"{"payer": "alice", "amount": "30.00", "splits": [
            {"participant": "bob", "amount_owed": "20.00"}
        ]}"#;

        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.split_total(), money(2000));
    }

    #[test]
    fn test_entry_deserializes_from_json() {
        let json = r#"{
            "payer": "alice",
            "amount": "30.00",
            "splits": [
                {"participant": "alice", "amount_owed": "10.00"},
                {"participant": "bob", "amount_owed": "20"}
            ],
            "description": "Dinner"
        }"#;

        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.amount(), money(3000));
        assert_eq!(entry.splits().len(), 2);
        assert_eq!(entry.description(), Some("Dinner"));
    }
}
