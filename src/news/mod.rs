//! NewsAPI search client.
//!
//! - [`client`] - builds the `/v2/everything` request and decodes the reply
//! - [`model`] - the [`Article`] record and the response envelope
//! - [`paging`] - client-side slicing of a result list for display
//!
//! # Example
//!
//! ```ignore
//! use newsstash::news::NewsClient;
//! use secrecy::SecretString;
//!
//! let client = NewsClient::new(SecretString::from("api-key".to_string()))?;
//! let articles = client.get_news("rust").await?;
//! ```

mod client;
mod model;
mod paging;

pub use client::{http_client, NewsClient, NewsError, DEFAULT_BASE_URL};
pub use model::Article;
pub use paging::Page;
