use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoreadError {
    // Lookup errors
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    // Configuration errors
    #[error("Could not determine config directory")]
    NoConfigDir,

    // Catalog file errors
    #[error("Catalog file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Catalog at {} could not be read ({reason}); refusing to overwrite it", .path.display())]
    CatalogUnreadable { path: PathBuf, reason: String },

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("OPML parsing failed: {0}")]
    OpmlParse(String),

    #[error("Markup conversion failed: {0}")]
    Conversion(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GoreadError {
    /// True for a category or feed lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GoreadError::CategoryNotFound(_) | GoreadError::FeedNotFound(_)
        )
    }

    /// True when the catalog file simply does not exist yet.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, GoreadError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type GoreadResult<T> = Result<T, GoreadError>;
