use chrono::{DateTime, Utc};

use super::schema::ArticleStore;
use super::types::{SavedArticleRecord, StoreError};
use crate::news::Article;

impl ArticleStore {
    /// Record `article` in `saved_articles` with the current time.
    ///
    /// Only title and url are kept. Every call inserts a new row; saving the
    /// same article twice gives two rows. Database errors (including a
    /// missing table) are returned as-is.
    pub async fn save_article(&self, article: &Article) -> Result<SavedArticleRecord, StoreError> {
        self.save_article_at(article, Utc::now()).await
    }

    async fn save_article_at(
        &self,
        article: &Article,
        saved_at: DateTime<Utc>,
    ) -> Result<SavedArticleRecord, StoreError> {
        let result = sqlx::query("INSERT INTO saved_articles (title, url, saved_at) VALUES (?, ?, ?)")
            .bind(&article.title)
            .bind(&article.url)
            .bind(saved_at.timestamp())
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id = id, url = %article.url, "Saved article");

        Ok(SavedArticleRecord {
            id,
            title: article.title.clone(),
            url: article.url.clone(),
            saved_at: DateTime::from_timestamp(saved_at.timestamp(), 0).unwrap_or(saved_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    async fn test_store() -> ArticleStore {
        ArticleStore::open(":memory:").await.unwrap()
    }

    fn test_article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: "dropped on save".to_string(),
            url: format!("https://example.com/{}", title.to_lowercase()),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_article_persists_row() {
        let store = test_store().await;
        let article = test_article("Hello");

        let before = Utc::now().timestamp();
        let record = store.save_article(&article).await.unwrap();
        let after = Utc::now().timestamp();

        let (title, url, saved_at): (String, String, i64) =
            sqlx::query_as("SELECT title, url, saved_at FROM saved_articles WHERE id = ?")
                .bind(record.id)
                .fetch_one(&store.pool)
                .await
                .unwrap();

        assert_eq!(title, "Hello");
        assert_eq!(url, "https://example.com/hello");
        assert!(saved_at >= before && saved_at <= after + 1);
        assert_eq!(record.saved_at.timestamp(), saved_at);
    }

    #[tokio::test]
    async fn test_saved_at_is_stored_as_integer_seconds() {
        let store = test_store().await;
        let saved_at = Utc.with_ymd_and_hms(2026, 5, 4, 3, 2, 1).unwrap();
        let record = store
            .save_article_at(&test_article("Typed"), saved_at)
            .await
            .unwrap();

        let (kind, value): (String, i64) =
            sqlx::query_as("SELECT typeof(saved_at), saved_at FROM saved_articles WHERE id = ?")
                .bind(record.id)
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_eq!(kind, "integer");
        assert_eq!(value, saved_at.timestamp());
    }

    #[tokio::test]
    async fn test_saved_at_is_insert_time_not_published() {
        let store = test_store().await;
        let article = test_article("Old");
        let saved_at = Utc.with_ymd_and_hms(2026, 5, 4, 3, 2, 1).unwrap();

        let record = store.save_article_at(&article, saved_at).await.unwrap();

        assert_eq!(
            record,
            SavedArticleRecord {
                id: record.id,
                title: "Old".to_string(),
                url: "https://example.com/old".to_string(),
                saved_at,
            }
        );
        assert_ne!(record.saved_at, article.published_at);
    }

    #[tokio::test]
    async fn test_save_twice_inserts_two_rows() {
        let store = test_store().await;
        let article = test_article("Twice");

        let first = store.save_article(&article).await.unwrap();
        let second = store.save_article(&article).await.unwrap();
        assert_ne!(first.id, second.id);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM saved_articles")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_save_without_table_fails() {
        let store = test_store().await;
        sqlx::query("DROP TABLE saved_articles")
            .execute(&store.pool)
            .await
            .unwrap();

        let result = store.save_article(&test_article("Nowhere")).await;
        match result {
            Err(StoreError::Other(e)) => assert!(e.to_string().contains("no such table")),
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_into_pre_existing_table_with_extra_columns() {
        let store = test_store().await;
        sqlx::query("DROP TABLE saved_articles")
            .execute(&store.pool)
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE saved_articles (id INTEGER PRIMARY KEY, title TEXT, url TEXT UNIQUE, saved_at INTEGER, note TEXT)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let article = test_article("Unique");
        store.save_article(&article).await.unwrap();

        // Constraint violations surface unchanged
        let result = store.save_article(&article).await;
        assert!(matches!(result, Err(StoreError::Other(_))));
    }
}
