use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "goread")]
#[command(about = "Categorized RSS subscription catalog")]
#[command(version)]
pub struct Cli {
    /// Catalog file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub urls: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List category names
    Categories,

    /// List the feeds of a category
    Feeds {
        /// Category name (exact, case-sensitive)
        category: String,
    },

    /// Print the URL of a feed
    Url {
        /// Feed name (exact, case-sensitive)
        feed: String,
    },

    /// Add a new category
    AddCategory {
        name: String,

        /// Category description
        #[arg(short, long, default_value = "")]
        desc: String,
    },

    /// Remove a category and its feeds
    RemoveCategory { name: String },

    /// Add a feed to a category
    AddFeed {
        category: String,
        name: String,
        url: String,

        /// Feed description
        #[arg(short, long, default_value = "")]
        desc: String,
    },

    /// Remove a feed from a category
    RemoveFeed { category: String, name: String },

    /// Import feeds from OPML file
    Import {
        /// Path to OPML file
        path: PathBuf,
    },

    /// Export feeds to OPML format
    Export {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the items of a saved feed document
    Render {
        /// Path to an RSS, Atom or JSON feed file
        path: PathBuf,

        /// Print plain text instead of markdown
        #[arg(long)]
        plain: bool,
    },
}
