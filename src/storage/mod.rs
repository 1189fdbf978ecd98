mod saved;
mod schema;
mod types;

pub use schema::ArticleStore;
pub use types::{SavedArticleRecord, StoreError};
