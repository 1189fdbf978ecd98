//! Fetch NewsAPI articles by topic and keep selected ones in SQLite.
//!
//! The two halves are independent:
//!
//! - [`news::NewsClient`] searches `/v2/everything` and returns [`news::Article`]s
//! - [`storage::ArticleStore`] records an article's title and url with a save time

pub mod config;
pub mod news;
pub mod storage;
pub mod util;
