// Adapters layer: concrete sinks for the processed dataset.

pub mod json_lines;
pub mod sqlite;

pub use sqlite::SqliteTableStore;
