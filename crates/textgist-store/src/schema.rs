//! Database schema SQL.

/// Analyses table. `topics` and `keywords` hold JSON-encoded string
/// arrays; substring search runs over the serialized form.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    input_text TEXT NOT NULL,
    summary TEXT NOT NULL,
    title TEXT NOT NULL,
    topics TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    keywords TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at);
"#;
