use opml::{Outline, OPML};

use crate::domain::{Catalog, Category, Feed};
use crate::errors::{GoreadError, GoreadResult};
use crate::services::CatalogService;
use crate::storage::CatalogStore;

/// Category that receives feeds listed at the top level of an OPML body.
pub const IMPORTED_CATEGORY: &str = "Imported";

#[derive(Debug, Default)]
pub struct ImportResult {
    pub added: Vec<Feed>,
    pub created_categories: Vec<String>,
    pub skipped: Vec<String>, // outline text without a feed URL
}

pub struct ImportExportService<S: CatalogStore> {
    service: CatalogService<S>,
}

impl<S: CatalogStore> ImportExportService<S> {
    pub fn new(service: CatalogService<S>) -> Self {
        Self { service }
    }

    pub fn into_inner(self) -> CatalogService<S> {
        self.service
    }

    /// Import feeds from OPML content.
    ///
    /// Top-level folders become categories (appended to an existing category
    /// of the same name), nested folders are flattened into their top-level
    /// folder, and top-level feeds land in [`IMPORTED_CATEGORY`].
    pub fn import_opml(&mut self, content: &str) -> GoreadResult<ImportResult> {
        let opml = OPML::from_str(content).map_err(|e| GoreadError::OpmlParse(e.to_string()))?;

        let mut result = ImportResult::default();
        let catalog = self.service.catalog_mut();

        for outline in &opml.body.outlines {
            if let Some(feed) = outline_to_feed(outline) {
                let category = category_entry(catalog, IMPORTED_CATEGORY, "", &mut result);
                category.subscriptions.push(feed.clone());
                result.added.push(feed);
                continue;
            }

            if outline.outlines.is_empty() {
                result.skipped.push(outline.text.clone());
                continue;
            }

            let mut feeds = Vec::new();
            collect_feeds(&outline.outlines, &mut feeds, &mut result.skipped);

            let description = outline.description.clone().unwrap_or_default();
            let category = category_entry(catalog, &outline.text, &description, &mut result);
            category.subscriptions.extend(feeds.iter().cloned());
            result.added.extend(feeds);
        }

        if !result.added.is_empty() || !result.created_categories.is_empty() {
            self.service.save()?;
        }

        Ok(result)
    }

    /// Export the catalog as OPML, one folder outline per category.
    pub fn export_opml(&self) -> GoreadResult<String> {
        export_catalog(self.service.catalog())
    }
}

pub fn export_catalog(catalog: &Catalog) -> GoreadResult<String> {
    let mut opml = OPML::default();
    opml.head = Some(opml::Head {
        title: Some("goread subscriptions".to_string()),
        ..Default::default()
    });

    for category in &catalog.categories {
        let feeds = category
            .subscriptions
            .iter()
            .map(|feed| Outline {
                text: feed.name.clone(),
                title: Some(feed.name.clone()),
                r#type: Some("rss".to_string()),
                xml_url: Some(feed.url.clone()),
                description: non_empty(&feed.description),
                ..Default::default()
            })
            .collect();

        opml.body.outlines.push(Outline {
            text: category.name.clone(),
            title: Some(category.name.clone()),
            description: non_empty(&category.description),
            outlines: feeds,
            ..Default::default()
        });
    }

    opml.to_string()
        .map_err(|e| GoreadError::OpmlParse(e.to_string()))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn outline_to_feed(outline: &Outline) -> Option<Feed> {
    let url = outline.xml_url.as_deref().filter(|url| !url.is_empty())?;

    let name = if !outline.text.is_empty() {
        outline.text.clone()
    } else {
        outline.title.clone().unwrap_or_else(|| url.to_string())
    };

    Some(Feed::new(
        name,
        outline.description.clone().unwrap_or_default(),
        url.to_string(),
    ))
}

/// Recursively collect feeds from nested outlines.
fn collect_feeds(outlines: &[Outline], feeds: &mut Vec<Feed>, skipped: &mut Vec<String>) {
    for outline in outlines {
        if let Some(feed) = outline_to_feed(outline) {
            feeds.push(feed);
        } else if outline.outlines.is_empty() {
            skipped.push(outline.text.clone());
        }

        collect_feeds(&outline.outlines, feeds, skipped);
    }
}

/// First category with `name`, created at the end if missing.
fn category_entry<'a>(
    catalog: &'a mut Catalog,
    name: &str,
    description: &str,
    result: &mut ImportResult,
) -> &'a mut Category {
    let index = match catalog.categories.iter().position(|c| c.name == name) {
        Some(index) => index,
        None => {
            catalog
                .categories
                .push(Category::new(name.to_string(), description.to_string()));
            result.created_categories.push(name.to_string());
            catalog.categories.len() - 1
        }
    };

    &mut catalog.categories[index]
}
