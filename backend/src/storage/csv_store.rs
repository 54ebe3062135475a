use crate::error::StoreError;
use crate::storage::{parse_stored_rating, SurveyStore};
use common::model::link::LinkRecord;
use common::model::order::OrderRecord;
use common::model::response::ResponseRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ORDERS_FILE: &str = "orders.csv";
const LINKS_FILE: &str = "links.csv";
const RESPONSES_FILE: &str = "responses.csv";

/// Response row as written on disk; the rating column is free text so a
/// hand-edited file never stops the log from loading.
#[derive(Serialize, Deserialize)]
struct ResponseRow {
    token: String,
    #[serde(default)]
    rating: String,
    #[serde(default)]
    comment: String,
}

/// Keeps each table in its own CSV file under `dir`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(CsvStore { dir })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_table<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_path(&path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Rewrites a whole table; the data goes to a sibling file first and is
    /// renamed over the old one.
    fn write_table<T: Serialize>(
        &self,
        file: &str,
        headers: &[&str],
        rows: &[T],
    ) -> Result<(), StoreError> {
        let path = self.path(file);
        let tmp = self.path(&format!("{}.tmp", file));
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp)?;
            writer.write_record(headers)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl SurveyStore for CsvStore {
    fn load_orders(&self) -> Result<Vec<OrderRecord>, StoreError> {
        self.read_table(ORDERS_FILE)
    }

    fn save_orders(&self, orders: &[OrderRecord]) -> Result<(), StoreError> {
        self.write_table(
            ORDERS_FILE,
            &["order_id", "status", "client", "service", "date", "provider"],
            orders,
        )
    }

    fn load_links(&self) -> Result<Vec<LinkRecord>, StoreError> {
        self.read_table(LINKS_FILE)
    }

    fn save_links(&self, links: &[LinkRecord]) -> Result<(), StoreError> {
        self.write_table(LINKS_FILE, &["order_id", "token"], links)
    }

    fn load_responses(&self) -> Result<Vec<ResponseRecord>, StoreError> {
        let rows: Vec<ResponseRow> = self.read_table(RESPONSES_FILE)?;
        Ok(rows
            .into_iter()
            .map(|row| ResponseRecord {
                rating: parse_stored_rating(&row.rating),
                token: row.token,
                comment: row.comment,
            })
            .collect())
    }

    fn save_responses(&self, responses: &[ResponseRecord]) -> Result<(), StoreError> {
        let rows: Vec<ResponseRow> = responses
            .iter()
            .map(|r| ResponseRow {
                token: r.token.clone(),
                rating: r.rating.map(|v| v.to_string()).unwrap_or_default(),
                comment: r.comment.clone(),
            })
            .collect();
        self.write_table(RESPONSES_FILE, &["token", "rating", "comment"], &rows)
    }

    fn clear_links(&self) -> Result<(), StoreError> {
        let path = self.path(LINKS_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
