pub mod catalog;
pub mod category;
pub mod ledger;
pub mod money;
pub mod session;
pub mod summary;
pub mod view;

pub use catalog::{Aisle, Catalog, CatalogDiagnostics, CatalogEntry, ItemId, PeriodLabels};
pub use category::Category;
pub use ledger::{Ledger, LedgerError, ReceiptLine, Selection};
pub use money::Money;
pub use session::{Session, SessionError};
pub use summary::{summarize, Direction, Summary};
pub use view::{ChangeView, ReceiptLineView, ReceiptView, TotalsView};
