use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use newsstash::config::{Config, API_KEY_ENV};
use newsstash::news::{http_client, Article, NewsClient, Page};
use newsstash::storage::ArticleStore;
use newsstash::util::terminal_safe;

/// Get the config directory path (~/.config/newsstash/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsstash"))
}

#[derive(Parser, Debug)]
#[command(name = "newsstash", about = "Search NewsAPI and save articles to SQLite")]
struct Args {
    /// Config file (default: ~/.config/newsstash/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides db_path from the config)
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured topics
    Topics,

    /// Search for articles and print one page of results
    Fetch {
        topic: String,

        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Search for articles and save the ones at the given positions
    Save {
        topic: String,

        /// 1-based positions as printed by `fetch`
        #[arg(required = true, value_name = "INDEX")]
        indices: Vec<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    tracing::debug!(?config, "Effective configuration");

    match args.command {
        Command::Topics => {
            for topic in &config.topics {
                println!("{}", terminal_safe(topic));
            }
        }
        Command::Fetch { topic, page } => {
            let articles = fetch(&config, &topic).await?;
            print_page(&articles, page, config.page_size);
        }
        Command::Save { topic, indices } => {
            let articles = fetch(&config, &topic).await?;

            let db_path = match args.db.or_else(|| config.db_path.clone()) {
                Some(path) => path,
                None => {
                    std::fs::create_dir_all(&config_dir)
                        .context("Failed to create config directory")?;
                    config_dir.join("news.db")
                }
            };
            let db_path_str = db_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
            let store = ArticleStore::open(db_path_str)
                .await
                .with_context(|| format!("Failed to open database {}", db_path.display()))?;

            for index in indices {
                let Some(article) = index.checked_sub(1).and_then(|i| articles.get(i)) else {
                    eprintln!("No article at position {} ({} results)", index, articles.len());
                    continue;
                };
                let record = store
                    .save_article(article)
                    .await
                    .with_context(|| format!("Failed to save article {}", index))?;
                println!("Saved #{}: {}", record.id, terminal_safe(&record.title));
            }

            store.close().await;
        }
    }

    Ok(())
}

async fn fetch(config: &Config, topic: &str) -> Result<Vec<Article>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No NewsAPI key configured: set {} or api_key in config.toml",
            API_KEY_ENV
        )
    })?;

    let http = http_client(config.timeout()).context("Failed to build HTTP client")?;
    let client = NewsClient::with_options(http, api_key, config.base_url.as_deref())
        .context("Invalid NewsAPI settings")?;

    client
        .get_news(topic)
        .await
        .with_context(|| format!("Failed to fetch news for '{}'", topic))
}

fn print_page(articles: &[Article], page: usize, per_page: usize) {
    let shown = Page::of(articles, page.saturating_sub(1), per_page);
    let offset = shown.offset();

    if articles.is_empty() {
        println!("No articles found.");
        return;
    }

    for (i, article) in shown.items.iter().enumerate() {
        println!(
            "{:>3}. {}",
            offset + i + 1,
            terminal_safe(&article.title)
        );
        if !article.description.is_empty() {
            println!("     {}", terminal_safe(&article.description));
        }
        let published = if article.has_published_at() {
            article.published_at.format("%Y-%m-%d %H:%M").to_string()
        } else {
            "undated".to_string()
        };
        println!("     {} | {}", published, terminal_safe(&article.url));
    }
    println!(
        "Page {} of {}{}",
        shown.index + 1,
        shown.total_pages,
        if shown.has_next() { " (--page N for more)" } else { "" }
    );
}
