use serde::{Deserialize, Serialize};

/// A single subscription inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Feed {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

impl Feed {
    pub fn new(name: String, description: String, url: String) -> Self {
        Self {
            name,
            description,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_yaml_keys() {
        let feed = Feed::new(
            "BBC".to_string(),
            "News from the BBC".to_string(),
            "http://feeds.bbci.co.uk/news/rss.xml".to_string(),
        );

        let yaml = serde_yaml::to_string(&feed).unwrap();
        assert!(yaml.contains("name: BBC"));
        assert!(yaml.contains("desc: News from the BBC"));
        assert!(yaml.contains("url: http://feeds.bbci.co.uk/news/rss.xml"));
        assert!(!yaml.contains("description"));
    }

    #[test]
    fn test_feed_missing_desc_defaults_to_empty() {
        let feed: Feed = serde_yaml::from_str("name: Blog\nurl: https://example.com/rss\n").unwrap();
        assert_eq!(feed.name, "Blog");
        assert_eq!(feed.description, "");
        assert_eq!(feed.url, "https://example.com/rss");
    }
}
