//Copyright 2024 Sentimen Contributors
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::sync::Mutex;

use camino::Utf8Path;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::HistoryError;

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One classified sentence. Created exactly once per single-item
/// classification; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub text: String,
    pub sentiment: String,
    pub date: String,
}

/// Append-only record of every single-item classification.
///
/// The connection sits behind a mutex: inserts serialize at the storage
/// layer, so id assignment stays strictly increasing under concurrent
/// callers. `AUTOINCREMENT` keeps ids unique across process restarts.
#[derive(Debug)]
pub struct HistoryStore {
    conn: Mutex<Connection>,
}

impl HistoryStore {
    /// Opens or creates the history database at [path].
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, HistoryError> {
        let conn = Connection::open(path.as_ref())?;
        Self::initialize(conn)
    }

    /// An in-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS riwayat (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                sentiment TEXT NOT NULL,
                date TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Appends a record and returns it with its assigned id and timestamp.
    pub fn insert(&self, text: &str, sentiment: &str) -> Result<HistoryRecord, HistoryError> {
        let date = OffsetDateTime::now_utc()
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| String::from("1970-01-01 00:00:00"));
        let conn = self.conn.lock().expect("history connection poisoned");
        conn.execute(
            "INSERT INTO riwayat (text, sentiment, date) VALUES (?1, ?2, ?3)",
            params![text, sentiment, date],
        )?;
        let id = conn.last_insert_rowid();
        Ok(HistoryRecord {
            id,
            text: text.to_string(),
            sentiment: sentiment.to_string(),
            date,
        })
    }

    /// All records in insertion order (ascending id). An empty store
    /// yields an empty list.
    pub fn fetch_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let conn = self.conn.lock().expect("history connection poisoned");
        let mut statement =
            conn.prepare("SELECT id, text, sentiment, date FROM riwayat ORDER BY id ASC")?;
        let rows = statement.query_map([], |row| {
            Ok(HistoryRecord {
                id: row.get(0)?,
                text: row.get(1)?,
                sentiment: row.get(2)?,
                date: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn len(&self) -> Result<usize, HistoryError> {
        let conn = self.conn.lock().expect("history connection poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM riwayat", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod test {
    use camino::Utf8PathBuf;

    use super::HistoryStore;

    #[test]
    fn empty_store_fetches_nothing() {
        let store = HistoryStore::open_in_memory().unwrap();
        assert!(store.fetch_all().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = HistoryStore::open_in_memory().unwrap();
        for (text, sentiment) in [
            ("bagus", "positif"),
            ("jelek", "negatif"),
            ("biasa", "netral"),
        ] {
            store.insert(text, sentiment).unwrap();
        }
        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "bagus");
        assert_eq!(records[1].text, "jelek");
        assert_eq!(records[2].text, "biasa");
        assert!(records[0].id < records[1].id && records[1].id < records[2].id);
    }

    #[test]
    fn timestamps_use_second_precision() {
        let store = HistoryStore::open_in_memory().unwrap();
        let record = store.insert("bagus", "positif").unwrap();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(record.date.len(), 19);
        assert_eq!(record.date.as_bytes()[4], b'-');
        assert_eq!(record.date.as_bytes()[10], b' ');
        assert_eq!(record.date.as_bytes()[13], b':');
    }

    #[test]
    fn ids_stay_monotonic_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("riwayat.db")).unwrap();

        let first = {
            let store = HistoryStore::open(&path).unwrap();
            store.insert("bagus", "positif").unwrap().id
        };
        let store = HistoryStore::open(&path).unwrap();
        let second = store.insert("jelek", "negatif").unwrap().id;
        assert!(second > first);
        assert_eq!(store.fetch_all().unwrap().len(), 2);
    }
}
