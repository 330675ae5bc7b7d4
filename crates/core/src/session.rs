use thiserror::Error;

use super::catalog::{Catalog, ItemId};
use super::ledger::{Ledger, LedgerError, Selection};
use super::summary::{summarize, Summary};
use super::view::{ChangeView, ReceiptView, TotalsView};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No catalog loaded")]
    NotLoaded,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug)]
struct Loaded {
    catalog: Catalog,
    ledger: Ledger,
}

/// Owns the catalog and the ledger built on it. Selection operations are
/// refused until a catalog has been installed.
#[derive(Debug, Default)]
pub struct Session {
    loaded: Option<Loaded>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous catalog and starts from an empty ledger.
    pub fn install(&mut self, catalog: Catalog) {
        tracing::info!(
            "Catalog installed: {} items from {} data rows",
            catalog.len(),
            catalog.data_rows()
        );
        self.loaded = Some(Loaded {
            catalog,
            ledger: Ledger::new(),
        });
    }

    pub fn unload(&mut self) {
        self.loaded = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.loaded.as_ref().map(|l| &l.catalog)
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.loaded.as_ref().map(|l| &l.ledger)
    }

    pub fn toggle(&mut self, id: ItemId) -> Result<Selection, SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NotLoaded)?;
        Ok(loaded.ledger.toggle(&loaded.catalog, id)?)
    }

    pub fn reset(&mut self) -> Result<(), SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NotLoaded)?;
        loaded.ledger.reset();
        Ok(())
    }

    pub fn summary(&self) -> Option<Summary> {
        self.ledger().map(summarize)
    }

    pub fn totals_view(&self) -> Option<TotalsView> {
        let loaded = self.loaded.as_ref()?;
        Some(TotalsView::new(
            &summarize(&loaded.ledger),
            loaded.catalog.labels(),
        ))
    }

    pub fn change_view(&self) -> Option<ChangeView> {
        self.summary().as_ref().and_then(ChangeView::from_summary)
    }

    pub fn receipt_view(&self) -> Option<ReceiptView> {
        let loaded = self.loaded.as_ref()?;
        Some(ReceiptView::build(&loaded.ledger, loaded.catalog.labels()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogDiagnostics, CatalogEntry, PeriodLabels};
    use crate::category::Category;
    use crate::money::Money;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![CatalogEntry {
                id: ItemId(0),
                display_name: "Milk".to_string(),
                category: Category::Dairy,
                current_price: Money::from_cents(350),
                prior_price: Money::from_cents(320),
            }],
            1,
            PeriodLabels::default(),
            CatalogDiagnostics::default(),
        )
    }

    #[test]
    fn operations_refused_before_load() {
        let mut session = Session::new();
        assert_eq!(session.toggle(ItemId(0)), Err(SessionError::NotLoaded));
        assert_eq!(session.reset(), Err(SessionError::NotLoaded));
        assert!(session.summary().is_none());
        assert!(session.totals_view().is_none());
    }

    #[test]
    fn toggle_after_install() {
        let mut session = Session::new();
        session.install(catalog());
        assert_eq!(session.toggle(ItemId(0)), Ok(Selection::Selected));
        assert_eq!(session.totals_view().unwrap().current, "3.50");
        assert!(session.change_view().is_some());
    }

    #[test]
    fn ledger_errors_pass_through() {
        let mut session = Session::new();
        session.install(catalog());
        assert_eq!(
            session.toggle(ItemId(5)),
            Err(SessionError::Ledger(LedgerError::OutOfRange {
                id: ItemId(5),
                rows: 1
            }))
        );
        assert!(session.ledger().unwrap().is_empty());
    }

    #[test]
    fn reinstall_clears_selection() {
        let mut session = Session::new();
        session.install(catalog());
        session.toggle(ItemId(0)).unwrap();
        session.install(catalog());
        assert!(session.ledger().unwrap().is_empty());
    }

    #[test]
    fn unload_returns_to_empty_state() {
        let mut session = Session::new();
        session.install(catalog());
        session.unload();
        assert!(!session.is_loaded());
        assert!(session.receipt_view().is_none());
    }
}
