use serde::{Deserialize, Serialize};

use super::Feed;

/// A named group of feeds. Feed order is storage order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub subscriptions: Vec<Feed>,
}

impl Category {
    pub fn new(name: String, description: String) -> Self {
        Self {
            name,
            description,
            subscriptions: Vec::new(),
        }
    }

    pub fn with_feeds(mut self, feeds: Vec<Feed>) -> Self {
        self.subscriptions = feeds;
        self
    }

    /// Feed names sorted ascending. Storage order is left untouched.
    pub fn feed_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .subscriptions
            .iter()
            .map(|feed| feed.name.clone())
            .collect();
        names.sort();
        names
    }

    /// First feed whose name matches exactly.
    pub fn feed(&self, name: &str) -> Option<&Feed> {
        self.subscriptions.iter().find(|feed| feed.name == name)
    }
}
