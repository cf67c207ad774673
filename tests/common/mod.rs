//! Common test utilities

#![allow(dead_code)]

use split_ledger::{
    InMemoryLedgerSource, LedgerEntry, Money, NetBalances, ParticipantId, Split, Transaction,
};

pub const WEEKEND_TRIP: &str = include_str!("../../fixtures/weekend_trip.json");

/// Load the weekend trip fixture
pub fn weekend_trip() -> InMemoryLedgerSource {
    InMemoryLedgerSource::from_json(WEEKEND_TRIP).expect("fixture must parse")
}

pub fn money(value: &str) -> Money {
    value.parse().expect("valid money literal")
}

pub fn id(name: &str) -> ParticipantId {
    ParticipantId::new(name)
}

pub fn ids(names: &[&str]) -> Vec<ParticipantId> {
    names.iter().map(|n| id(n)).collect()
}

/// Build an expense from `(participant, owed)` pairs
pub fn expense(payer: &str, amount: &str, splits: &[(&str, &str)]) -> LedgerEntry {
    LedgerEntry::new(
        payer,
        money(amount),
        splits.iter().map(|(p, owed)| Split::new(*p, money(owed))).collect(),
    )
}

pub fn balances(pairs: &[(&str, &str)]) -> NetBalances {
    pairs.iter().map(|(p, v)| (id(p), money(v))).collect()
}

pub fn tx(from: &str, to: &str, amount: &str) -> Transaction {
    Transaction::new(id(from), id(to), money(amount)).expect("valid transaction")
}
