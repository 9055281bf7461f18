//! SQLite-backed analysis store.
//!
//! One table, append-only: every analyze request inserts a new row and
//! nothing ever updates or deletes one. Search is a substring match over
//! the serialized `topics` and `keywords` columns.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use textgist_core::{Error, Result};

use crate::schema::SCHEMA_SQL;
use crate::types::{AnalysisRecord, NewAnalysis};

pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Database(e.to_string()))?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let count = store.count_analyses()?;
        info!(
            "SqliteStore initialized: {} analyses, path={}",
            count,
            store.db_path.display()
        );

        Ok(store)
    }

    /// Insert an analysis. Returns the persisted record with its
    /// assigned `id` and `created_at`.
    pub fn save_analysis(&self, analysis: &NewAnalysis) -> Result<AnalysisRecord> {
        debug!("Saving analysis with title: {}", analysis.title);

        let topics_json = serde_json::to_string(&analysis.topics)
            .map_err(|e| Error::Internal(e.to_string()))?;
        let keywords_json = serde_json::to_string(&analysis.keywords)
            .map_err(|e| Error::Internal(e.to_string()))?;
        let created_at = Utc::now();

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO analyses (input_text, summary, title, topics, sentiment, keywords, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                analysis.input_text,
                analysis.summary,
                analysis.title,
                topics_json,
                analysis.sentiment,
                keywords_json,
                created_at.to_rfc3339(),
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        info!("Analysis saved successfully with ID: {}", id);

        Ok(AnalysisRecord {
            id,
            input_text: analysis.input_text.clone(),
            summary: analysis.summary.clone(),
            title: analysis.title.clone(),
            topics: analysis.topics.clone(),
            sentiment: analysis.sentiment.clone(),
            keywords: analysis.keywords.clone(),
            created_at,
        })
    }

    /// Substring search over the serialized `topics` and `keywords`
    /// columns, in store order.
    pub fn search_analyses(&self, term: &str) -> Result<Vec<AnalysisRecord>> {
        debug!("Searching analyses for term: {}", term);
        let pattern = format!("%{}%", term);

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, input_text, summary, title, topics, sentiment, keywords, created_at
                 FROM analyses WHERE topics LIKE ?1 OR keywords LIKE ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![pattern], row_to_record)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| Error::Database(e.to_string()))?);
        }
        debug!("Search query executed, found {} results", results.len());
        Ok(results)
    }

    /// Count stored analyses.
    pub fn count_analyses(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<AnalysisRecord> {
    let topics_json: String = row.get(4)?;
    let keywords_json: String = row.get(6)?;
    let created_at_raw: String = row.get(7)?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(AnalysisRecord {
        id: row.get(0)?,
        input_text: row.get(1)?,
        summary: row.get(2)?,
        title: row.get(3)?,
        topics: serde_json::from_str(&topics_json).unwrap_or_default(),
        sentiment: row.get(5)?,
        keywords: serde_json::from_str(&keywords_json).unwrap_or_default(),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("textgist.db")).unwrap();
        (store, dir)
    }

    fn sample(title: &str, topics: &[&str], keywords: &[&str]) -> NewAnalysis {
        NewAnalysis {
            input_text: "some input".into(),
            summary: "a summary".into(),
            title: title.into(),
            topics: topics.iter().map(|s| s.to_string()).collect(),
            sentiment: "neutral".into(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_save_assigns_id_and_timestamp() {
        let (store, _dir) = test_store();
        let first = store
            .save_analysis(&sample("one", &["General"], &["fox"]))
            .unwrap();
        let second = store
            .save_analysis(&sample("two", &["General"], &["dog"]))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);
    }

    #[test]
    fn test_search_matches_topics() {
        let (store, _dir) = test_store();
        store
            .save_analysis(&sample("a", &["technology", "science"], &[]))
            .unwrap();
        store.save_analysis(&sample("b", &["cooking"], &[])).unwrap();

        let hits = store.search_analyses("tech").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "a");
    }

    #[test]
    fn test_search_matches_keywords() {
        let (store, _dir) = test_store();
        store.save_analysis(&sample("a", &[], &["ocean", "tide"])).unwrap();

        let hits = store.search_analyses("ocean").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].keywords, vec!["ocean", "tide"]);
    }

    #[test]
    fn test_search_no_matches() {
        let (store, _dir) = test_store();
        store.save_analysis(&sample("a", &["General"], &["fox"])).unwrap();
        assert!(store.search_analyses("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let (store, _dir) = test_store();
        let saved = store
            .save_analysis(&sample("title", &["one", "two"], &["kw"]))
            .unwrap();
        let hits = store.search_analyses("one").unwrap();
        assert_eq!(hits[0].id, saved.id);
        assert_eq!(hits[0].topics, vec!["one", "two"]);
        assert_eq!(hits[0].sentiment, "neutral");
        assert_eq!(hits[0].created_at, saved.created_at);
    }

    #[test]
    fn test_count() {
        let (store, _dir) = test_store();
        assert_eq!(store.count_analyses().unwrap(), 0);
        store.save_analysis(&sample("a", &[], &[])).unwrap();
        assert_eq!(store.count_analyses().unwrap(), 1);
    }
}
