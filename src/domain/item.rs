use chrono::{DateTime, FixedOffset};
use feed_rs::parser;

use crate::errors::{GoreadError, GoreadResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A fetched feed entry, reduced to what the renderer needs.
#[derive(Debug, Clone, Default)]
pub struct FeedItem {
    pub title: String,
    pub authors: Vec<Person>,
    pub published: Option<DateTime<FixedOffset>>,
    /// Raw body markup.
    pub description: String,
}

impl FeedItem {
    pub fn new(title: String) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    pub fn with_authors(mut self, authors: Vec<Person>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_published(mut self, published: Option<DateTime<FixedOffset>>) -> Self {
        self.published = published;
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Summary markup is preferred; full content is the fallback.
    pub fn from_entry(entry: feed_rs::model::Entry) -> Self {
        let title = entry.title.map(|t| t.content).unwrap_or_default();

        let authors = entry
            .authors
            .into_iter()
            .map(|person| Person { name: person.name })
            .collect();

        let description = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        Self {
            title,
            authors,
            published: entry.published.map(|dt| dt.fixed_offset()),
            description,
        }
    }
}

/// Parse every entry of an RSS/Atom/JSON feed document into items.
pub fn parse_items(bytes: &[u8]) -> GoreadResult<Vec<FeedItem>> {
    let feed = parser::parse(bytes).map_err(|e| GoreadError::FeedParse(e.to_string()))?;

    Ok(feed.entries.into_iter().map(FeedItem::from_entry).collect())
}
