//! Ledger Aggregator
//!
//! Reduces a group's expense history to one net balance per participant.
//! Balance = paid - owed: positive means the group owes the participant,
//! negative means the participant owes the group.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, LedgerEntry, Money, ParticipantId, Transaction};

/// Net position of every participant in a group.
///
/// Derived fresh from the entry set on every request; iteration order is
/// ascending participant id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetBalances(BTreeMap<ParticipantId, Money>);

impl NetBalances {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Balance of a participant, if they appear at all
    pub fn get(&self, participant: &ParticipantId) -> Option<Money> {
        self.0.get(participant).copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ParticipantId, Money> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of every balance. Zero for well-formed entries.
    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    /// Number of balances outside the tolerance band
    pub fn outstanding(&self, tolerance: Money) -> usize {
        self.0.values().filter(|b| !b.is_within(tolerance)).count()
    }

    /// True when every balance is within `tolerance` of zero
    pub fn is_settled(&self, tolerance: Money) -> bool {
        self.outstanding(tolerance) == 0
    }

    /// Fail with `ConservationViolated` when the balances drift by more than `tolerance`.
    pub fn check_conservation(&self, tolerance: Money) -> Result<(), DomainError> {
        let drift = self.total();
        if drift.is_within(tolerance) {
            Ok(())
        } else {
            Err(DomainError::ConservationViolated { drift })
        }
    }

    /// Balances after every transaction has been paid.
    ///
    /// Paying moves the sender towards zero from below and the receiver
    /// towards zero from above.
    pub fn apply(&self, transactions: &[Transaction]) -> NetBalances {
        let mut after = self.clone();
        for tx in transactions {
            *after.entry(&tx.from) += tx.amount;
            *after.entry(&tx.to) -= tx.amount;
        }
        after
    }

    fn entry(&mut self, participant: &ParticipantId) -> &mut Money {
        self.0.entry(participant.clone()).or_insert(Money::ZERO)
    }
}

impl FromIterator<(ParticipantId, Money)> for NetBalances {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Money)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NetBalances {
    type Item = (&'a ParticipantId, &'a Money);
    type IntoIter = btree_map::Iter<'a, ParticipantId, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compute each participant's net balance over `entries`.
///
/// Every known participant starts at zero so members without activity still
/// show up. Participants referenced by an entry but missing from
/// `known_participants` are added on first sight rather than rejected.
/// Entry order does not affect the result.
pub fn compute_net_balances<'a, E, P>(entries: E, known_participants: P) -> NetBalances
where
    E: IntoIterator<Item = &'a LedgerEntry>,
    P: IntoIterator<Item = &'a ParticipantId>,
{
    let mut balances: NetBalances = known_participants
        .into_iter()
        .map(|p| (p.clone(), Money::ZERO))
        .collect();

    let mut entry_count = 0usize;
    for entry in entries {
        *balances.entry(entry.payer()) += entry.amount();

        // A payer's own split is applied independently of the payment.
        for split in entry.splits() {
            *balances.entry(&split.participant) -= split.amount_owed;
        }
        entry_count += 1;
    }

    tracing::debug!(
        entries = entry_count,
        participants = balances.len(),
        drift = %balances.total(),
        "Net balances computed"
    );

    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Split;
    use proptest::prelude::*;

    fn money(units: i64) -> Money {
        Money::from_units(units).unwrap()
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    fn no_members() -> Vec<ParticipantId> {
        Vec::new()
    }

    fn equal_split(payer: &str, amount: i64, among: &[&str]) -> LedgerEntry {
        let share = amount / among.len() as i64;
        LedgerEntry::new(
            payer,
            money(amount),
            among.iter().map(|p| Split::new(*p, money(share))).collect(),
        )
    }

    #[test]
    fn test_single_expense_three_ways() {
        let entries = vec![equal_split("A", 30, &["A", "B", "C"])];
        let members = vec![id("A"), id("B"), id("C")];

        let balances = compute_net_balances(&entries, &members);

        assert_eq!(balances.get(&id("A")), Some(money(20)));
        assert_eq!(balances.get(&id("B")), Some(money(-10)));
        assert_eq!(balances.get(&id("C")), Some(money(-10)));
        assert!(balances.total().is_zero());
    }

    #[test]
    fn test_idle_members_start_at_zero() {
        let entries = vec![equal_split("A", 20, &["A", "B"])];
        let members = vec![id("A"), id("B"), id("D")];

        let balances = compute_net_balances(&entries, &members);

        assert_eq!(balances.len(), 3);
        assert_eq!(balances.get(&id("D")), Some(Money::ZERO));
    }

    #[test]
    fn test_unknown_participants_are_added() {
        let entries = vec![equal_split("X", 20, &["X", "Y"])];

        let balances = compute_net_balances(&entries, &no_members());

        assert_eq!(balances.get(&id("X")), Some(money(10)));
        assert_eq!(balances.get(&id("Y")), Some(money(-10)));
    }

    #[test]
    fn test_no_entries() {
        let members = vec![id("A"), id("B")];
        let balances = compute_net_balances(&Vec::<LedgerEntry>::new(), &members);

        assert!(balances.is_settled(Money::ZERO));
        assert_eq!(balances.len(), 2);
    }

    #[test]
    fn test_payer_not_in_splits() {
        let entries = vec![equal_split("A", 50, &["B", "C"])];
        let balances = compute_net_balances(&entries, &no_members());

        assert_eq!(balances.get(&id("A")), Some(money(50)));
        assert_eq!(balances.get(&id("B")), Some(money(-25)));
    }

    #[test]
    fn test_cents_do_not_drift() {
        let cent_entry = LedgerEntry::new(
            "A",
            Money::from_cents(10).unwrap(),
            vec![Split::new("B", Money::from_cents(10).unwrap())],
        );
        let entries = vec![cent_entry; 10_000];

        let balances = compute_net_balances(&entries, &no_members());

        assert_eq!(balances.get(&id("A")), Some(money(1000)));
        assert_eq!(balances.get(&id("B")), Some(money(-1000)));
        assert!(balances.total().is_zero());
    }

    #[test]
    fn test_mismatched_entry_shows_as_drift() {
        let entries = vec![LedgerEntry::new(
            "A",
            money(30),
            vec![Split::new("B", money(25))],
        )];
        let balances = compute_net_balances(&entries, &no_members());

        assert_eq!(balances.total(), money(5));
        assert_eq!(
            balances.check_conservation(Money::from_cents(1).unwrap()),
            Err(DomainError::ConservationViolated { drift: money(5) })
        );
    }

    #[test]
    fn test_apply_transactions() {
        let balances: NetBalances = vec![(id("A"), money(100)), (id("B"), money(-100))]
            .into_iter()
            .collect();
        let tx = Transaction::new(id("B"), id("A"), money(100)).unwrap();

        let after = balances.apply(&[tx]);

        assert!(after.is_settled(Money::ZERO));
        // original untouched
        assert_eq!(balances.get(&id("A")), Some(money(100)));
    }

    #[test]
    fn test_balances_serialize_as_map() {
        let balances: NetBalances = vec![(id("B"), money(-10)), (id("A"), money(10))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&balances).unwrap();
        assert_eq!(json, r#"{"A":"10.00","B":"-10.00"}"#);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn arb_entry() -> impl Strategy<Value = LedgerEntry> {
        let names = prop::sample::select(vec!["A", "B", "C", "D", "E"]);
        (
            names.clone(),
            prop::collection::vec((names, 0i64..100_000), 1..5),
        )
            .prop_map(|(payer, shares)| {
                let splits: Vec<Split> = shares
                    .into_iter()
                    .map(|(p, cents)| Split::new(p, Money::from_cents(cents).unwrap()))
                    .collect();
                let amount = splits.iter().map(|s| s.amount_owed).sum();
                LedgerEntry::new(payer, amount, splits)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Balanced entries always net to exactly zero.
        #[test]
        fn balances_are_conserved(entries in prop::collection::vec(arb_entry(), 0..20)) {
            let balances = compute_net_balances(&entries, &no_members());
            prop_assert!(balances.total().is_zero());
        }

        /// Reordering the entries never changes the result.
        #[test]
        fn entry_order_is_irrelevant(
            (entries, shuffled) in prop::collection::vec(arb_entry(), 0..20)
                .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle())),
        ) {
            let forward = compute_net_balances(&entries, &no_members());
            let permuted = compute_net_balances(&shuffled, &no_members());

            prop_assert_eq!(forward, permuted);
        }
    }
}
