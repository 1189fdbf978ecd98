use chrono::{DateTime, Utc};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating the `saved_articles` table failed
    #[error("Schema setup failed: {0}")]
    Schema(String),

    /// Generic database error, passed through from the driver
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

// ============================================================================
// Data Structures
// ============================================================================

/// A row written to `saved_articles`.
///
/// `saved_at` is the wall-clock time of the insert, not the article's
/// publication time. Description and publication time are not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArticleRecord {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub saved_at: DateTime<Utc>,
}
