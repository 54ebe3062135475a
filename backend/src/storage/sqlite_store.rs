use crate::error::StoreError;
use crate::storage::SurveyStore;
use common::model::link::LinkRecord;
use common::model::order::OrderRecord;
use common::model::response::ResponseRecord;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS orders (
        order_id TEXT NOT NULL,
        status TEXT NOT NULL,
        client TEXT NOT NULL,
        service TEXT NOT NULL,
        date TEXT NOT NULL,
        provider TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS links (
        order_id TEXT NOT NULL,
        token TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS responses (
        token TEXT NOT NULL,
        rating INTEGER,
        comment TEXT NOT NULL
    );
";

/// Keeps the three tables in one SQLite file.
///
/// A connection is opened per call, and every save replaces the table's
/// contents inside a single transaction.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { path })
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }
}

impl SurveyStore for SqliteStore {
    fn load_orders(&self) -> Result<Vec<OrderRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT order_id, status, client, service, date, provider FROM orders ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(OrderRecord {
                order_id: row.get(0)?,
                status: row.get(1)?,
                client: row.get(2)?,
                service: row.get(3)?,
                date: row.get(4)?,
                provider: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn save_orders(&self, orders: &[OrderRecord]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM orders", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO orders (order_id, status, client, service, date, provider)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for o in orders {
                insert.execute(params![
                    o.order_id, o.status, o.client, o.service, o.date, o.provider
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_links(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT order_id, token FROM links ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(LinkRecord {
                order_id: row.get(0)?,
                token: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn save_links(&self, links: &[LinkRecord]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM links", [])?;
        {
            let mut insert = tx.prepare("INSERT INTO links (order_id, token) VALUES (?1, ?2)")?;
            for link in links {
                insert.execute(params![link.order_id, link.token])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_responses(&self) -> Result<Vec<ResponseRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT token, rating, comment FROM responses ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            let rating: Option<i64> = row.get(1)?;
            Ok(ResponseRecord {
                token: row.get(0)?,
                rating: rating
                    .filter(|r| (1..=5).contains(r))
                    .map(|r| r as u8),
                comment: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn save_responses(&self, responses: &[ResponseRecord]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM responses", [])?;
        {
            let mut insert =
                tx.prepare("INSERT INTO responses (token, rating, comment) VALUES (?1, ?2, ?3)")?;
            for r in responses {
                insert.execute(params![r.token, r.rating, r.comment])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_database_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::open(dir.path().join("survey.sqlite")).unwrap();
        assert!(store.load_orders().unwrap().is_empty());
        assert!(store.load_links().unwrap().is_empty());
        assert!(store.load_responses().unwrap().is_empty());
    }

    #[test]
    fn saves_replace_the_previous_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::open(dir.path().join("survey.sqlite")).unwrap();
        let link = |order_id: &str, token: &str| LinkRecord {
            order_id: order_id.to_string(),
            token: token.to_string(),
        };
        let first = vec![link("1", "a"), link("2", "b")];
        store.save_links(&first).unwrap();
        store.save_links(&first[1..]).unwrap();
        assert_eq!(store.load_links().unwrap(), first[1..].to_vec());

        store.clear_links().unwrap();
        assert!(store.load_links().unwrap().is_empty());
    }

    #[test]
    fn missing_rating_is_stored_as_null() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::open(dir.path().join("survey.sqlite")).unwrap();
        let responses = vec![
            ResponseRecord {
                token: "a".into(),
                rating: Some(3),
                comment: String::new(),
            },
            ResponseRecord {
                token: "b".into(),
                rating: None,
                comment: "sem nota".into(),
            },
        ];
        store.save_responses(&responses).unwrap();
        assert_eq!(store.load_responses().unwrap(), responses);
    }
}
