//! Data types for analysis records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An analysis produced by the pipeline, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnalysis {
    pub input_text: String,
    pub summary: String,
    pub title: String,
    pub topics: Vec<String>,
    pub sentiment: String,
    pub keywords: Vec<String>,
}

/// A persisted analysis row. Rows are immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub input_text: String,
    pub summary: String,
    pub title: String,
    pub topics: Vec<String>,
    pub sentiment: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}
