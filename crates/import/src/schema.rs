//! Positional column contract of the price dataset.
//!
//! Columns are resolved by fixed offsets, never by header name. The prior-period
//! price sits twelve columns before the current price, i.e. the dataset is
//! assumed to carry exactly twelve monthly columns between the two. The source
//! does not validate that shape; if it ever changes, this module is the one
//! place to edit.

use grocer_core::{Category, Money, PeriodLabels};

use crate::tabular::Row;

pub const NAME_COLUMN: usize = 1;
pub const CATEGORY_COLUMN: usize = 4;
/// Distance from the current-price column back to the prior-period column.
pub const PRIOR_PRICE_OFFSET: usize = 12;

const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct Schema {
    header: Row,
}

impl Schema {
    pub fn from_header(header: Row) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &Row {
        &self.header
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn current_price_index(width: usize) -> usize {
        width.saturating_sub(1)
    }

    pub fn prior_price_index(width: usize) -> usize {
        Self::current_price_index(width).saturating_sub(PRIOR_PRICE_OFFSET)
    }

    pub fn name<'r>(&self, row: &'r Row) -> &'r str {
        row.get(NAME_COLUMN)
    }

    pub fn category(&self, row: &Row) -> Category {
        Category::resolve(row.get(CATEGORY_COLUMN))
    }

    /// Raw current-price field; the row's last column.
    pub fn current_price_field<'r>(&self, row: &'r Row) -> &'r str {
        row.get(Self::current_price_index(row.len()))
    }

    /// Raw prior-price field; twelve columns before the last, clamped to the first.
    pub fn prior_price_field<'r>(&self, row: &'r Row) -> &'r str {
        row.get(Self::prior_price_index(row.len()))
    }

    pub fn current_price(&self, row: &Row) -> Option<Money> {
        Money::parse(self.current_price_field(row))
    }

    pub fn prior_price(&self, row: &Row) -> Option<Money> {
        Money::parse(self.prior_price_field(row))
    }

    /// Header label at `index`, clamped into the header. Blank labels read as `Unknown`.
    pub fn label_at(&self, index: usize) -> String {
        let last = self.width().saturating_sub(1);
        let label = self.header.get(index.min(last)).trim();
        if label.is_empty() {
            UNKNOWN_LABEL.to_string()
        } else {
            label.to_string()
        }
    }

    /// Header label counted from the end: `1` is the last column, `13` the prior-price column.
    pub fn column_label(&self, offset_from_end: usize) -> String {
        self.label_at(self.width().saturating_sub(offset_from_end.max(1)))
    }

    pub fn current_label(&self) -> String {
        self.column_label(1)
    }

    pub fn prior_label(&self) -> String {
        self.column_label(PRIOR_PRICE_OFFSET + 1)
    }

    pub fn period_labels(&self) -> PeriodLabels {
        PeriodLabels {
            current: self.current_label(),
            prior: self.prior_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parse_row;

    /// Header with 19 columns: five descriptive ones, then 14 months of prices.
    fn header_line() -> String {
        let mut cols = vec!["id", "item_name", "unit", "series", "category"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        for month in 0..14 {
            cols.push(format!("m{month}"));
        }
        cols.join(",")
    }

    fn row_line(name: &str, category: &str, prior: &str, current: &str) -> String {
        let mut cols = vec!["1".to_string(), name.into(), "lb".into(), "x".into(), category.into()];
        for month in 0..14 {
            cols.push(match month {
                1 => prior.to_string(),
                13 => current.to_string(),
                _ => "9.99".to_string(),
            });
        }
        cols.join(",")
    }

    fn schema() -> Schema {
        Schema::from_header(parse_row(&header_line(), ',', '"'))
    }

    #[test]
    fn offsets_from_width() {
        assert_eq!(Schema::current_price_index(19), 18);
        assert_eq!(Schema::prior_price_index(19), 6);
        assert_eq!(Schema::prior_price_index(5), 0);
        assert_eq!(Schema::current_price_index(0), 0);
    }

    #[test]
    fn resolves_fields() {
        let schema = schema();
        let row = parse_row(&row_line("Milk", " Dairy", "3.20", "3.50"), ',', '"');
        assert_eq!(schema.name(&row), "Milk");
        assert_eq!(schema.category(&row), Category::Dairy);
        assert_eq!(schema.current_price(&row), Some(Money::from_cents(350)));
        assert_eq!(schema.prior_price(&row), Some(Money::from_cents(320)));
    }

    #[test]
    fn blank_prior_price_is_invalid() {
        let schema = schema();
        let row = parse_row(&row_line("Eggs", "dairy", "", "4.10"), ',', '"');
        assert_eq!(schema.prior_price(&row), None);
    }

    #[test]
    fn short_row_prior_clamps_to_first_column() {
        let schema = schema();
        let row = parse_row("7,Salt,x,x,pantry,1.25", ',', '"');
        assert_eq!(schema.prior_price_field(&row), "7");
        assert_eq!(schema.current_price_field(&row), "1.25");
    }

    #[test]
    fn labels() {
        let schema = schema();
        assert_eq!(schema.current_label(), "m13");
        assert_eq!(schema.prior_label(), "m1");
        assert_eq!(schema.column_label(100), "id");
        assert_eq!(schema.label_at(500), "m13");
    }

    #[test]
    fn blank_label_is_unknown() {
        let schema = Schema::from_header(parse_row("a,b, ", ',', '"'));
        assert_eq!(schema.current_label(), "Unknown");
    }
}
