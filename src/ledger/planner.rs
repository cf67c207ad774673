//! Settlement Planner
//!
//! Turns net balances into a short list of point-to-point payments using
//! greedy largest-creditor / largest-debtor matching.
//!
//! The greedy pairing is not guaranteed to use the fewest possible payments
//! (that problem is NP-hard), but it is O(n log n) and emits at most n - 1
//! transactions for n unsettled participants.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::{Money, ParticipantId, Transaction};

use super::aggregator::NetBalances;

/// Residual amounts at or below one cent count as settled.
pub const SETTLEMENT_TOLERANCE: Money = Money::CENT;

/// An unsettled participant waiting in one of the two queues.
///
/// `amount` is always the positive magnitude: credit for creditors, debt for
/// debtors. Ordering puts the largest amount first and, among equal amounts,
/// the smallest participant id first, so `BinaryHeap::pop` is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    amount: Money,
    participant: ParticipantId,
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount
            .cmp(&other.amount)
            .then_with(|| other.participant.cmp(&self.participant))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-priority queue of positions (largest amount, then lowest id, first).
#[derive(Debug, Default)]
struct PositionQueue(BinaryHeap<Position>);

impl PositionQueue {
    fn push(&mut self, participant: ParticipantId, amount: Money) {
        self.0.push(Position {
            amount,
            participant,
        });
    }

    fn pop_largest(&mut self) -> Option<Position> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Suggest payments that settle `balances`, treating anything within one
/// cent of zero as settled.
///
/// See [`minimize_cash_flow_with_tolerance`].
pub fn minimize_cash_flow(balances: &NetBalances) -> Vec<Transaction> {
    minimize_cash_flow_with_tolerance(balances, SETTLEMENT_TOLERANCE)
}

/// Suggest payments that settle `balances`.
///
/// Balances with `|value| <= tolerance` are ignored. The largest creditor is
/// repeatedly paired with the largest debtor; the smaller side is paid off in
/// full and the other is requeued with its remainder if that remainder is
/// still above `tolerance`. Equal amounts are taken in ascending participant
/// id order.
///
/// Input that does not sum to zero is not rejected: whatever cannot be
/// matched once one side runs out is dropped.
pub fn minimize_cash_flow_with_tolerance(
    balances: &NetBalances,
    tolerance: Money,
) -> Vec<Transaction> {
    let tolerance = tolerance.abs();
    let mut creditors = PositionQueue::default();
    let mut debtors = PositionQueue::default();

    for (participant, balance) in balances {
        if *balance > tolerance {
            creditors.push(participant.clone(), *balance);
        } else if *balance < -tolerance {
            debtors.push(participant.clone(), -*balance);
        }
    }

    let mut transactions = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));

    while !creditors.is_empty() && !debtors.is_empty() {
        let (Some(creditor), Some(debtor)) = (creditors.pop_largest(), debtors.pop_largest())
        else {
            break;
        };

        let settle_amount = creditor.amount.min(debtor.amount);

        tracing::debug!(
            from = %debtor.participant,
            to = %creditor.participant,
            amount = %settle_amount,
            "Settlement transaction planned"
        );

        let remaining_credit = creditor.amount - settle_amount;
        let remaining_debt = debtor.amount - settle_amount;

        if remaining_credit > tolerance {
            creditors.push(creditor.participant.clone(), remaining_credit);
        }
        if remaining_debt > tolerance {
            debtors.push(debtor.participant.clone(), remaining_debt);
        }

        transactions.push(Transaction {
            from: debtor.participant,
            to: creditor.participant,
            amount: settle_amount,
        });
    }

    let unmatched = creditors.len() + debtors.len();
    if unmatched > 0 {
        tracing::warn!(
            unmatched,
            "Settlement left unmatched balances; input does not net to zero"
        );
    }

    transactions
}
