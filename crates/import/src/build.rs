use grocer_core::{Catalog, CatalogDiagnostics, CatalogEntry, ItemId, Money};

use crate::load::LoadError;
use crate::schema::Schema;
use crate::tabular::Row;

/// Builds a catalog from parsed rows, the first of which is the header.
///
/// Data rows are padded to the header width. Rows without an item name are
/// skipped, and unparseable prices count as zero; both are tallied in the
/// catalog's diagnostics.
pub fn build_catalog(mut rows: Vec<Row>) -> Result<Catalog, LoadError> {
    if rows.len() < 2 {
        return Err(LoadError::MalformedInput(rows.len()));
    }

    let header = rows.remove(0);
    let schema = Schema::from_header(header);
    let data_rows = rows.len();
    let mut diagnostics = CatalogDiagnostics::default();
    let mut entries = Vec::with_capacity(data_rows);

    for (index, mut row) in rows.into_iter().enumerate() {
        row.pad_to(schema.width());

        let name = schema.name(&row).trim();
        if name.is_empty() {
            diagnostics.skipped_rows += 1;
            continue;
        }

        let current_price = price_or_zero(schema.current_price(&row), || {
            tracing::debug!(
                "Row {index} ({name}): invalid current price {:?}, using 0",
                schema.current_price_field(&row)
            );
            diagnostics.invalid_prices += 1;
        });
        let prior_price = price_or_zero(schema.prior_price(&row), || {
            tracing::debug!(
                "Row {index} ({name}): invalid prior price {:?}, using 0",
                schema.prior_price_field(&row)
            );
            diagnostics.invalid_prices += 1;
        });

        entries.push(CatalogEntry {
            id: ItemId(index),
            display_name: name.to_string(),
            category: schema.category(&row),
            current_price,
            prior_price,
        });
    }

    if diagnostics.invalid_prices > 0 {
        tracing::info!(
            "{} price field(s) were blank or non-numeric and count as 0",
            diagnostics.invalid_prices
        );
    }

    Ok(Catalog::new(
        entries,
        data_rows,
        schema.period_labels(),
        diagnostics,
    ))
}

fn price_or_zero(parsed: Option<Money>, on_invalid: impl FnOnce()) -> Money {
    parsed.unwrap_or_else(|| {
        on_invalid();
        Money::zero()
    })
}
