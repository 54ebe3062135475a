//! Persistence for the three survey tables.
//!
//! The domain operations in `crate::survey` never touch files directly; they
//! receive a `&dyn SurveyStore` and perform a full load, transform and save
//! per call. Three implementations exist:
//! - `CsvStore`: one CSV file per table in a data directory (the default)
//! - `SqliteStore`: one SQLite database with a table per store table
//! - `MemoryStore`: process memory, for tests and throw-away runs
//!
//! A table that was never written loads as empty on every backend.

mod csv_store;
mod memory;
mod sqlite_store;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::config::{Config, StorageKind};
use crate::error::StoreError;
use common::model::link::LinkRecord;
use common::model::order::OrderRecord;
use common::model::response::ResponseRecord;
use std::sync::Arc;

pub trait SurveyStore: Send + Sync {
    fn load_orders(&self) -> Result<Vec<OrderRecord>, StoreError>;
    fn save_orders(&self, orders: &[OrderRecord]) -> Result<(), StoreError>;

    fn load_links(&self) -> Result<Vec<LinkRecord>, StoreError>;
    fn save_links(&self, links: &[LinkRecord]) -> Result<(), StoreError>;

    fn load_responses(&self) -> Result<Vec<ResponseRecord>, StoreError>;
    fn save_responses(&self, responses: &[ResponseRecord]) -> Result<(), StoreError>;

    /// Drops the link registry entirely.
    fn clear_links(&self) -> Result<(), StoreError> {
        self.save_links(&[])
    }
}

/// Opens the store selected by the configuration.
pub fn open(config: &Config) -> Result<Arc<dyn SurveyStore>, StoreError> {
    let store: Arc<dyn SurveyStore> = match config.storage {
        StorageKind::Csv => Arc::new(CsvStore::new(&config.data_dir)?),
        StorageKind::Sqlite => Arc::new(SqliteStore::open(config.data_dir.join("survey.sqlite"))?),
        StorageKind::Memory => Arc::new(MemoryStore::default()),
    };
    Ok(store)
}

/// Reads a stored rating back, leniently.
///
/// Older files may hold `5.0` or free text; anything that is not a whole
/// number within 1..=5 becomes `None`.
pub(crate) fn parse_stored_rating(raw: &str) -> Option<u8> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
        return None;
    }
    Some(value as u8)
}
