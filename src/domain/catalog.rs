use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Category, Feed};
use crate::errors::{GoreadError, GoreadResult};

/// Root of the persisted subscription tree.
///
/// Names are lookup keys but are not required to be unique. Every lookup
/// resolves to the first match in storage order, and listings are sorted
/// at read time without touching the stored order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Where this catalog was loaded from / will be saved to. Never serialized.
    #[serde(skip)]
    pub location: PathBuf,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn new(location: PathBuf, categories: Vec<Category>) -> Self {
        Self {
            location,
            categories,
        }
    }

    /// The built-in catalog used when nothing can be loaded.
    pub fn default_catalog() -> Self {
        let news = Category::new(
            "News".to_string(),
            "News from around the world".to_string(),
        )
        .with_feeds(vec![Feed::new(
            "BBC".to_string(),
            "News from the BBC".to_string(),
            "http://feeds.bbci.co.uk/news/rss.xml".to_string(),
        )]);

        let tech = Category::new("Tech".to_string(), "Tech news".to_string()).with_feeds(vec![
            Feed::new(
                "Hacker News".to_string(),
                "News from Hacker News".to_string(),
                "https://news.ycombinator.com/rss".to_string(),
            ),
            Feed::new(
                "Golang subreddit".to_string(),
                "News from the Golang subreddit".to_string(),
                "https://www.reddit.com/r/golang/.rss".to_string(),
            ),
        ]);

        Self {
            location: PathBuf::new(),
            categories: vec![news, tech],
        }
    }

    /// Load the catalog at `explicit`, or at the platform default when it is
    /// absent or empty. Falls back to [`Catalog::default_catalog`] on any failure.
    pub fn open(explicit: Option<&Path>) -> Self {
        crate::storage::open(explicit)
    }

    pub fn with_location(mut self, location: &Path) -> Self {
        self.location = location.to_path_buf();
        self
    }

    /// All category names, sorted ascending (case-sensitive).
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.categories.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names
    }

    /// Sorted feed names of the first category named `category_name`.
    pub fn feed_names(&self, category_name: &str) -> GoreadResult<Vec<String>> {
        self.category(category_name)
            .map(Category::feed_names)
            .ok_or_else(|| GoreadError::CategoryNotFound(category_name.to_string()))
    }

    /// URL of the first feed named `feed_name`, searching every category.
    pub fn feed_url(&self, feed_name: &str) -> GoreadResult<String> {
        self.feed(feed_name)
            .map(|feed| feed.url.clone())
            .ok_or_else(|| GoreadError::FeedNotFound(feed_name.to_string()))
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    pub fn feed(&self, name: &str) -> Option<&Feed> {
        self.categories.iter().find_map(|c| c.feed(name))
    }

    pub fn feed_count(&self) -> usize {
        self.categories.iter().map(|c| c.subscriptions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
