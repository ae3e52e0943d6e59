use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use goread::cli::{Cli, Commands};
use goread::config::Config;
use goread::domain::{parse_items, Feed};
use goread::errors::GoreadResult;
use goread::render::{html_to_text, Renderer};
use goread::services::{CatalogService, ImportExportService};
use goread::storage::YamlCatalogStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> GoreadResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?.with_override(cli.urls);
    let open_catalog = || {
        let service = CatalogService::new(YamlCatalogStore::open(config.urls_path.as_deref()));
        warn_if_unreadable(&service);
        service
    };

    match cli.command {
        Commands::Categories => cmd_categories(&open_catalog()),
        Commands::Feeds { category } => cmd_feeds(&open_catalog(), &category),
        Commands::Url { feed } => {
            println!("{}", open_catalog().feed_url(&feed)?);
            Ok(())
        }
        Commands::AddCategory { name, desc } => {
            open_catalog().add_category(&name, &desc)?;
            println!("Added category: {}", name);
            Ok(())
        }
        Commands::RemoveCategory { name } => {
            let removed = open_catalog().remove_category(&name)?;
            println!(
                "Removed: {} ({} feeds)",
                removed.name,
                removed.subscriptions.len()
            );
            Ok(())
        }
        Commands::AddFeed {
            category,
            name,
            url,
            desc,
        } => {
            open_catalog().add_feed(&category, Feed::new(name.clone(), desc, url))?;
            println!("Added {} to {}", name, category);
            Ok(())
        }
        Commands::RemoveFeed { category, name } => {
            let removed = open_catalog().remove_feed(&category, &name)?;
            println!("Removed: {} ({})", removed.name, removed.url);
            Ok(())
        }
        Commands::Import { path } => cmd_import(open_catalog(), &path),
        Commands::Export { output } => cmd_export(open_catalog(), output.as_deref()),
        // Works on a local feed file and never touches the catalog
        Commands::Render { path, plain } => cmd_render(&path, plain),
    }
}

/// Readers still get the built-in catalog, but say so on stderr.
fn warn_if_unreadable(service: &CatalogService<YamlCatalogStore>) {
    if !service.is_unreadable() {
        return;
    }
    if let Some(reason) = service.load_error() {
        warn!(error = %reason, "Catalog file unreadable");
        eprintln!(
            "Warning: could not read catalog ({}); showing built-in defaults",
            reason
        );
    }
}

fn cmd_categories(service: &CatalogService<YamlCatalogStore>) -> GoreadResult<()> {
    let names = service.category_names();

    if names.is_empty() {
        println!("No categories configured.");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_feeds(service: &CatalogService<YamlCatalogStore>, category: &str) -> GoreadResult<()> {
    for name in service.feed_names(category)? {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_import(service: CatalogService<YamlCatalogStore>, path: &Path) -> GoreadResult<()> {
    let content = fs::read_to_string(path)?;
    let mut service = ImportExportService::new(service);

    println!("Importing feeds from {}...\n", path.display());

    let result = service.import_opml(&content)?;

    if !result.created_categories.is_empty() {
        println!("Created {} categories:", result.created_categories.len());
        for name in &result.created_categories {
            println!("  + {}", name);
        }
        println!();
    }

    if !result.added.is_empty() {
        println!("Added {} feeds:", result.added.len());
        for feed in &result.added {
            println!("  + {} ({})", feed.name, feed.url);
        }
        println!();
    }

    if !result.skipped.is_empty() {
        println!("Skipped {} outlines without a feed URL:", result.skipped.len());
        for text in &result.skipped {
            println!("  - {}", text);
        }
        println!();
    }

    println!(
        "Import complete: {} added, {} skipped",
        result.added.len(),
        result.skipped.len()
    );

    Ok(())
}

fn cmd_export(service: CatalogService<YamlCatalogStore>, output: Option<&Path>) -> GoreadResult<()> {
    let service = ImportExportService::new(service);
    let opml = service.export_opml()?;

    match output {
        Some(path) => {
            fs::write(path, &opml)?;
            println!("Exported feeds to {}", path.display());
        }
        None => {
            println!("{}", opml);
        }
    }

    Ok(())
}

fn cmd_render(path: &Path, plain: bool) -> GoreadResult<()> {
    let bytes = fs::read(path)?;
    let items = parse_items(&bytes)?;

    if items.is_empty() {
        println!("No items in feed.");
        return Ok(());
    }

    let renderer = Renderer::new();
    let mut documents = Vec::with_capacity(items.len());

    for item in &items {
        let document = if plain {
            format!("{}\n\n{}", item.title, html_to_text(&item.description)?.trim())
        } else {
            renderer.markdownize(item)?
        };
        documents.push(document);
    }

    println!("{}", documents.join("\n\n* * *\n\n"));
    Ok(())
}
