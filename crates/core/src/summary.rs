use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::ledger::Ledger;
use super::money::{round_cents, Money};

/// Differences smaller than a cent count as no change.
const CHANGE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
    Unchanged,
}

impl Direction {
    pub fn of(difference: Decimal) -> Self {
        if difference.abs() < CHANGE_EPSILON {
            Direction::Unchanged
        } else if difference.is_sign_positive() {
            Direction::Increase
        } else {
            Direction::Decrease
        }
    }

    pub fn between(current: Money, prior: Money) -> Self {
        Direction::of(current.amount() - prior.amount())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Increase => write!(f, "increase"),
            Direction::Decrease => write!(f, "decrease"),
            Direction::Unchanged => write!(f, "unchanged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub current_total: Money,
    pub prior_total: Money,
    pub difference: Decimal,
    /// Absent when the prior total is zero or nothing changed.
    pub percent_change: Option<Decimal>,
    pub direction: Direction,
}

pub fn summarize(ledger: &Ledger) -> Summary {
    let current_total = ledger.current_total();
    let prior_total = ledger.prior_total();
    let difference = current_total.amount() - prior_total.amount();
    let direction = Direction::of(difference);

    let percent_change = if direction != Direction::Unchanged && !prior_total.is_zero() {
        difference
            .abs()
            .checked_div(prior_total.amount())
            .map(|ratio| round_cents(ratio * Decimal::ONE_HUNDRED))
    } else {
        None
    };

    Summary {
        current_total,
        prior_total,
        difference,
        percent_change,
        direction,
    }
}
