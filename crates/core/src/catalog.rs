use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ledger::LedgerError;
use super::money::Money;

/// Position of the source row among the data rows, header excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub display_name: String,
    pub category: Category,
    pub current_price: Money,
    pub prior_price: Money,
}

/// Header labels for the two price columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLabels {
    pub current: String,
    pub prior: String,
}

impl Default for PeriodLabels {
    fn default() -> Self {
        Self {
            current: "Unknown".to_string(),
            prior: "Unknown".to_string(),
        }
    }
}

/// Counters gathered while the catalog was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDiagnostics {
    /// Data rows dropped for having no item name.
    pub skipped_rows: usize,
    /// Price fields that were blank or non-numeric and counted as zero.
    pub invalid_prices: usize,
}

/// A group of entries sharing a category, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct Aisle<'a> {
    pub category: Category,
    pub entries: Vec<&'a CatalogEntry>,
}

/// Immutable set of purchasable items produced by a single load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    data_rows: usize,
    labels: PeriodLabels,
    diagnostics: CatalogDiagnostics,
}

impl Catalog {
    pub fn new(
        mut entries: Vec<CatalogEntry>,
        data_rows: usize,
        labels: PeriodLabels,
        diagnostics: CatalogDiagnostics,
    ) -> Self {
        entries.sort_by_key(|e| e.id);
        Self {
            entries,
            data_rows,
            labels,
            diagnostics,
        }
    }

    /// Looks up an entry by id. Ids past the last data row are out of range;
    /// ids of rows that were skipped at build time are not found.
    pub fn get(&self, id: ItemId) -> Result<&CatalogEntry, LedgerError> {
        if id.0 >= self.data_rows {
            return Err(LedgerError::OutOfRange {
                id,
                rows: self.data_rows,
            });
        }
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .map(|idx| &self.entries[idx])
            .map_err(|_| LedgerError::NotFound(id))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of data rows in the source, including rows that produced no entry.
    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    pub fn labels(&self) -> &PeriodLabels {
        &self.labels
    }

    /// Label of the most recent price column.
    pub fn data_as_of(&self) -> &str {
        &self.labels.current
    }

    pub fn diagnostics(&self) -> CatalogDiagnostics {
        self.diagnostics
    }

    pub fn aisle(&self, category: Category) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Every aisle in display order, including empty ones.
    pub fn by_category(&self) -> Vec<Aisle<'_>> {
        Category::AISLES
            .iter()
            .map(|&category| Aisle {
                category,
                entries: self.aisle(category),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: usize, name: &str, category: Category) -> CatalogEntry {
        CatalogEntry {
            id: ItemId(id),
            display_name: name.to_string(),
            category,
            current_price: Money::from_cents(100),
            prior_price: Money::from_cents(90),
        }
    }

    fn sample() -> Catalog {
        // Row 1 had no name and was skipped.
        Catalog::new(
            vec![
                entry(2, "Apples", Category::Produce),
                entry(0, "Milk", Category::Dairy),
                entry(3, "Cheese", Category::Dairy),
            ],
            4,
            PeriodLabels::default(),
            CatalogDiagnostics {
                skipped_rows: 1,
                invalid_prices: 0,
            },
        )
    }

    #[test]
    fn entries_are_ordered_by_id() {
        let ids: Vec<usize> = sample().entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn get_existing_entry() {
        let catalog = sample();
        assert_eq!(catalog.get(ItemId(2)).unwrap().display_name, "Apples");
    }

    #[test]
    fn get_skipped_row_is_not_found() {
        assert_eq!(
            sample().get(ItemId(1)).unwrap_err(),
            LedgerError::NotFound(ItemId(1))
        );
    }

    #[test]
    fn get_past_last_row_is_out_of_range() {
        assert_eq!(
            sample().get(ItemId(4)).unwrap_err(),
            LedgerError::OutOfRange {
                id: ItemId(4),
                rows: 4
            }
        );
    }

    #[test]
    fn grouping_follows_aisle_order() {
        let catalog = sample();
        let aisles = catalog.by_category();
        assert_eq!(aisles.len(), Category::AISLES.len());
        assert_eq!(aisles[0].category, Category::Produce);
        assert_eq!(aisles[0].entries.len(), 1);

        let dairy: Vec<&str> = catalog
            .aisle(Category::Dairy)
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(dairy, vec!["Milk", "Cheese"]);
        assert!(catalog.aisle(Category::Snacks).is_empty());
    }

    #[test]
    fn data_as_of_is_current_label() {
        let catalog = Catalog::new(
            vec![],
            0,
            PeriodLabels {
                current: "Sep 2025".to_string(),
                prior: "Sep 2024".to_string(),
            },
            CatalogDiagnostics::default(),
        );
        assert_eq!(catalog.data_as_of(), "Sep 2025");
        assert!(catalog.is_empty());
    }
}
