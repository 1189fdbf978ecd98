use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Article
// ============================================================================

/// A single article as returned by the `/v2/everything` endpoint.
///
/// Only the four fields the rest of the crate uses are decoded; everything
/// else in the upstream object (source, author, urlToImage, content) is
/// ignored. `null` or missing strings decode to `""`, and a `null` or
/// missing `publishedAt` decodes to the Unix epoch, so one incomplete entry
/// never costs the rest of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(rename = "publishedAt", default, deserialize_with = "null_as_epoch")]
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// False when the service sent no publication time.
    pub fn has_published_at(&self) -> bool {
        self.published_at != DateTime::<Utc>::UNIX_EPOCH
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_epoch<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
}

// ============================================================================
// Response envelope
// ============================================================================

/// Top-level response body.
///
/// Successful responses carry `status = "ok"` plus `articles`; failures carry
/// `status = "error"` with `code` and `message` instead.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EverythingResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EverythingResponse {
    pub(crate) fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}
