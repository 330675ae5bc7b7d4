//! Presentation-ready snapshots of the ledger. Amounts are pre-formatted with
//! exactly two decimals so a renderer never has to touch `Money`.

use serde::Serialize;
use std::fmt;

use super::catalog::PeriodLabels;
use super::ledger::Ledger;
use super::summary::{summarize, Direction, Summary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLineView {
    pub name: String,
    pub current: String,
    pub prior: String,
    /// How this line's price moved; renderers colour by it.
    pub trend: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    pub current_label: String,
    pub current: String,
    pub prior_label: String,
    pub prior: String,
}

impl TotalsView {
    pub fn new(summary: &Summary, labels: &PeriodLabels) -> Self {
        Self {
            current_label: labels.current.clone(),
            current: summary.current_total.format_amount(),
            prior_label: labels.prior.clone(),
            prior: summary.prior_total.format_amount(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeView {
    pub direction: Direction,
    pub percent: String,
}

impl ChangeView {
    /// `None` when there is nothing worth showing: no movement, or no prior total to compare against.
    pub fn from_summary(summary: &Summary) -> Option<Self> {
        summary.percent_change.map(|pct| ChangeView {
            direction: summary.direction,
            percent: format!("{pct:.2}"),
        })
    }
}

impl fmt::Display for ChangeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Percent change: {}% {}", self.percent, self.direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptView {
    pub lines: Vec<ReceiptLineView>,
    /// Only present when the receipt has lines.
    pub totals: Option<TotalsView>,
    pub change: Option<ChangeView>,
}

impl ReceiptView {
    pub fn build(ledger: &Ledger, labels: &PeriodLabels) -> Self {
        let lines: Vec<ReceiptLineView> = ledger
            .receipt()
            .iter()
            .map(|line| ReceiptLineView {
                name: line.name.clone(),
                current: line.current_price.format_amount(),
                prior: line.prior_price.format_amount(),
                trend: Direction::between(line.current_price, line.prior_price),
            })
            .collect();

        if lines.is_empty() {
            return Self {
                lines,
                totals: None,
                change: None,
            };
        }

        let summary = summarize(ledger);
        Self {
            lines,
            totals: Some(TotalsView::new(&summary, labels)),
            change: ChangeView::from_summary(&summary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
