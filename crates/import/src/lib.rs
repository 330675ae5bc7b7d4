pub mod build;
pub mod load;
pub mod schema;
pub mod source;
pub mod tabular;

pub use build::build_catalog;
pub use load::{load_catalog, parse_rows, LoadError, SourceProfile};
pub use schema::Schema;
pub use source::{fetch_text, load_from, Source};
pub use tabular::{parse_row, Row};
