use grocer_core::{Catalog, Category, Direction, Ledger, ReceiptView, Session, TotalsView};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Display region {0:?} not found")]
    UnresolvableTarget(String),
    #[error("No catalog loaded")]
    NotLoaded,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A named part of the screen that `show` can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Aisles,
    Aisle(Category),
    Receipt,
    Totals,
    Footnote,
}

impl std::str::FromStr for Region {
    type Err = RenderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aisles" => Ok(Region::Aisles),
            "receipt" => Ok(Region::Receipt),
            "totals" => Ok(Region::Totals),
            "footnote" => Ok(Region::Footnote),
            other => other
                .parse::<Category>()
                .map(Region::Aisle)
                .map_err(|_| RenderError::UnresolvableTarget(other.to_string())),
        }
    }
}

pub fn render_region(session: &Session, region: Region, out: &mut impl Write) -> Result<(), RenderError> {
    let (catalog, ledger) = match (session.catalog(), session.ledger()) {
        (Some(c), Some(l)) => (c, l),
        _ => return Err(RenderError::NotLoaded),
    };
    match region {
        Region::Aisles => render_aisles(catalog, ledger, out)?,
        Region::Aisle(category) => render_aisle(catalog, ledger, category, out)?,
        Region::Receipt => {
            let view = ReceiptView::build(ledger, catalog.labels());
            render_receipt(&view, out)?
        }
        Region::Totals => {
            if let Some(view) = session.totals_view() {
                render_totals(&view, out)?
            }
        }
        Region::Footnote => writeln!(out, "Data as of {}.", catalog.data_as_of())?,
    }
    Ok(())
}

pub fn render_aisles(catalog: &Catalog, ledger: &Ledger, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Data as of {}", catalog.data_as_of())?;
    for aisle in catalog.by_category() {
        if aisle.entries.is_empty() {
            continue;
        }
        render_aisle(catalog, ledger, aisle.category, out)?;
    }
    Ok(())
}

pub fn render_aisle(
    catalog: &Catalog,
    ledger: &Ledger,
    category: Category,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "[{category}]")?;
    for entry in catalog.aisle(category) {
        let mark = if ledger.is_selected(entry.id) { '*' } else { ' ' };
        writeln!(out, " {mark} {:>4}  {}", entry.id.0, entry.display_name)?;
    }
    Ok(())
}

pub fn render_totals(view: &TotalsView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Total cost in {}: ${}", view.current_label, view.current)?;
    writeln!(out, "Cost in {}: ${}", view.prior_label, view.prior)
}

pub fn render_receipt(view: &ReceiptView, out: &mut impl Write) -> io::Result<()> {
    let Some(totals) = &view.totals else {
        return writeln!(out, "No items in cart");
    };

    writeln!(
        out,
        "{:<28} {:>12} {:>12}",
        "Item", totals.current_label, totals.prior_label
    )?;
    for line in &view.lines {
        let trend = match line.trend {
            Direction::Increase => '+',
            Direction::Decrease => '-',
            Direction::Unchanged => ' ',
        };
        writeln!(
            out,
            "{:<28} {:>11}{trend} {:>12}",
            line.name,
            format!("${}", line.current),
            format!("${}", line.prior)
        )?;
    }
    writeln!(out, "{}", "-".repeat(54))?;
    writeln!(
        out,
        "{:<28} {:>12} {:>12}",
        "Total:",
        format!("${}", totals.current),
        format!("${}", totals.prior)
    )?;
    if let Some(change) = &view.change {
        writeln!(out, "{change}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::{CatalogDiagnostics, CatalogEntry, ItemId, Money, PeriodLabels};

    fn session() -> Session {
        let entry = |id: usize, name: &str, category, current, prior| CatalogEntry {
            id: ItemId(id),
            display_name: name.to_string(),
            category,
            current_price: Money::from_cents(current),
            prior_price: Money::from_cents(prior),
        };
        let mut session = Session::new();
        session.install(Catalog::new(
            vec![
                entry(0, "Milk", Category::Dairy, 350, 320),
                entry(1, "Apples", Category::Produce, 180, 200),
            ],
            2,
            PeriodLabels {
                current: "Sep 2025".to_string(),
                prior: "Sep 2024".to_string(),
            },
            CatalogDiagnostics::default(),
        ));
        session
    }

    fn render(session: &Session, region: &str) -> Result<String, RenderError> {
        let mut out = Vec::new();
        render_region(session, region.parse()?, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn aisles_list_marks_selection() {
        let mut session = session();
        session.toggle(ItemId(0)).unwrap();
        let text = render(&session, "aisles").unwrap();
        assert!(text.starts_with("Data as of Sep 2025\n[produce]\n"));
        assert!(text.contains(" *    0  Milk"));
        assert!(text.contains("      1  Apples"));
    }

    #[test]
    fn empty_receipt() {
        assert_eq!(render(&session(), "receipt").unwrap(), "No items in cart\n");
    }

    #[test]
    fn receipt_with_change_line() {
        let mut session = session();
        session.toggle(ItemId(0)).unwrap();
        let text = render(&session, "receipt").unwrap();
        assert!(text.contains("Milk"));
        assert!(text.contains("$3.50+"));
        assert!(text.contains("Percent change: 9.38% increase"));
    }

    #[test]
    fn totals_at_zero() {
        let text = render(&session(), "totals").unwrap();
        assert_eq!(text, "Total cost in Sep 2025: $0.00\nCost in Sep 2024: $0.00\n");
    }

    #[test]
    fn single_aisle() {
        let text = render(&session(), "dairy").unwrap();
        assert_eq!(text, "[dairy]\n      0  Milk\n");
    }

    #[test]
    fn unknown_region_is_unresolvable() {
        assert!(matches!(
            render(&session(), "frozen"),
            Err(RenderError::UnresolvableTarget(name)) if name == "frozen"
        ));
    }

    #[test]
    fn render_before_load() {
        assert!(matches!(
            render(&Session::new(), "totals"),
            Err(RenderError::NotLoaded)
        ));
    }
}
