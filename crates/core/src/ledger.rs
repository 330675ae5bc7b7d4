use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use super::catalog::{Catalog, CatalogEntry, ItemId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Item {id} is out of range: catalog has {rows} data rows")]
    OutOfRange { id: ItemId, rows: usize },
    #[error("Item not found: {0}")]
    NotFound(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Selected,
    Unselected,
}

/// One receipt row. Items that share a display name share a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub name: String,
    pub current_price: Money,
    pub prior_price: Money,
    pub item_ids: Vec<ItemId>,
}

/// Selected items, their receipt lines and the two running totals.
///
/// Invariant: an id is selected iff a receipt line named after its entry
/// lists it, and each total equals the rounded sum over the receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    selected: BTreeSet<ItemId>,
    receipt: Vec<ReceiptLine>,
    current_total: Money,
    prior_total: Money,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.selected.iter().copied()
    }

    pub fn receipt(&self) -> &[ReceiptLine] {
        &self.receipt
    }

    pub fn current_total(&self) -> Money {
        self.current_total
    }

    pub fn prior_total(&self) -> Money {
        self.prior_total
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flips the selection state of `id` and returns the new state.
    /// Unknown ids leave the ledger untouched.
    pub fn toggle(&mut self, catalog: &Catalog, id: ItemId) -> Result<Selection, LedgerError> {
        let entry = lookup(catalog, id)?;
        if self.selected.contains(&id) {
            self.remove_entry(entry);
            Ok(Selection::Unselected)
        } else {
            self.add_entry(entry);
            Ok(Selection::Selected)
        }
    }

    /// Selects `id`. Selecting an already selected item does nothing.
    pub fn select(&mut self, catalog: &Catalog, id: ItemId) -> Result<(), LedgerError> {
        let entry = lookup(catalog, id)?;
        if !self.selected.contains(&id) {
            self.add_entry(entry);
        }
        Ok(())
    }

    /// Deselects `id`. Deselecting an item that is not selected does nothing.
    pub fn deselect(&mut self, catalog: &Catalog, id: ItemId) -> Result<(), LedgerError> {
        let entry = lookup(catalog, id)?;
        if self.selected.contains(&id) {
            self.remove_entry(entry);
        } else {
            tracing::debug!("Item {id} is not selected, nothing to remove");
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Ledger::default();
    }

    /// Totals recomputed from the receipt rather than maintained incrementally.
    pub fn recomputed_totals(&self) -> (Money, Money) {
        let current: Money = self.receipt.iter().map(|l| l.current_price).sum();
        let prior: Money = self.receipt.iter().map(|l| l.prior_price).sum();
        (current.round(), prior.round())
    }

    fn add_entry(&mut self, entry: &CatalogEntry) {
        self.selected.insert(entry.id);
        let current = entry.current_price.clamp_price();
        let prior = entry.prior_price.clamp_price();

        match self
            .receipt
            .iter_mut()
            .find(|l| l.name == entry.display_name)
        {
            Some(line) => {
                line.current_price = line.current_price + current;
                line.prior_price = line.prior_price + prior;
                line.item_ids.push(entry.id);
            }
            None => self.receipt.push(ReceiptLine {
                name: entry.display_name.clone(),
                current_price: current,
                prior_price: prior,
                item_ids: vec![entry.id],
            }),
        }

        self.current_total = (self.current_total + current).round();
        self.prior_total = (self.prior_total + prior).round();

        tracing::debug!(
            "Added {}: current={}, prior={}",
            entry.display_name,
            current,
            prior
        );
    }

    fn remove_entry(&mut self, entry: &CatalogEntry) {
        self.selected.remove(&entry.id);
        let current = entry.current_price.clamp_price();
        let prior = entry.prior_price.clamp_price();

        if let Some(idx) = self
            .receipt
            .iter()
            .position(|l| l.name == entry.display_name)
        {
            let line = &mut self.receipt[idx];
            line.item_ids.retain(|id| *id != entry.id);
            if line.item_ids.is_empty() {
                self.receipt.remove(idx);
            } else {
                line.current_price = line.current_price.saturating_sub(current);
                line.prior_price = line.prior_price.saturating_sub(prior);
            }
        }

        self.current_total = self.current_total.saturating_sub(current).round();
        self.prior_total = self.prior_total.saturating_sub(prior).round();

        tracing::debug!(
            "Removed {}: current={}, prior={}",
            entry.display_name,
            current,
            prior
        );
    }
}

fn lookup(catalog: &Catalog, id: ItemId) -> Result<&CatalogEntry, LedgerError> {
    catalog.get(id).inspect_err(|e| {
        tracing::warn!("Ignoring selection change: {e}");
    })
}
