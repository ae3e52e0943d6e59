use url::Url;

use crate::domain::{Catalog, Category, Feed};
use crate::errors::{GoreadError, GoreadResult};
use crate::storage::{load_or_default, CatalogStore, LoadOutcome};

/// Owns the loaded catalog and writes every change back through the store.
///
/// Names are not required to be unique. Adding a duplicate is accepted and
/// removal always targets the first match in storage order.
///
/// A catalog file that exists but could not be loaded is never overwritten:
/// every save fails with [`GoreadError::CatalogUnreadable`] instead.
pub struct CatalogService<S: CatalogStore> {
    store: S,
    catalog: Catalog,
    load_error: Option<GoreadError>,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        let (catalog, load_error) = match load_or_default(&store) {
            LoadOutcome::Loaded(catalog) => (catalog, None),
            LoadOutcome::Defaulted { catalog, reason } => (catalog, Some(reason)),
        };

        Self {
            store,
            catalog,
            load_error,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// True when the built-in catalog was substituted at load time.
    pub fn was_defaulted(&self) -> bool {
        self.load_error.is_some()
    }

    /// Why the built-in catalog was substituted, if it was.
    pub fn load_error(&self) -> Option<&GoreadError> {
        self.load_error.as_ref()
    }

    /// True when a catalog file is present but unusable, so saving would
    /// replace the user's data with the defaults.
    pub fn is_unreadable(&self) -> bool {
        match &self.load_error {
            Some(GoreadError::NoConfigDir) | None => false,
            Some(reason) => !reason.is_missing_file(),
        }
    }

    pub fn category_names(&self) -> Vec<String> {
        self.catalog.category_names()
    }

    pub fn feed_names(&self, category: &str) -> GoreadResult<Vec<String>> {
        self.catalog.feed_names(category)
    }

    pub fn feed_url(&self, feed: &str) -> GoreadResult<String> {
        self.catalog.feed_url(feed)
    }

    pub fn add_category(&mut self, name: &str, description: &str) -> GoreadResult<()> {
        if name.is_empty() {
            return Err(GoreadError::InvalidInput("Category name is empty".to_string()));
        }

        self.catalog
            .categories
            .push(Category::new(name.to_string(), description.to_string()));
        self.save()
    }

    pub fn remove_category(&mut self, name: &str) -> GoreadResult<Category> {
        let index = self
            .catalog
            .categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| GoreadError::CategoryNotFound(name.to_string()))?;

        let removed = self.catalog.categories.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Append a feed to the first category named `category`.
    /// The URL must be absolute; it is never fetched.
    pub fn add_feed(&mut self, category: &str, feed: Feed) -> GoreadResult<()> {
        if feed.name.is_empty() {
            return Err(GoreadError::InvalidInput("Feed name is empty".to_string()));
        }
        Url::parse(&feed.url).map_err(|e| GoreadError::InvalidUrl(format!("{}: {}", feed.url, e)))?;

        self.catalog
            .category_mut(category)
            .ok_or_else(|| GoreadError::CategoryNotFound(category.to_string()))?
            .subscriptions
            .push(feed);
        self.save()
    }

    pub fn remove_feed(&mut self, category: &str, feed_name: &str) -> GoreadResult<Feed> {
        let subscriptions = &mut self
            .catalog
            .category_mut(category)
            .ok_or_else(|| GoreadError::CategoryNotFound(category.to_string()))?
            .subscriptions;

        let index = subscriptions
            .iter()
            .position(|f| f.name == feed_name)
            .ok_or_else(|| GoreadError::FeedNotFound(feed_name.to_string()))?;

        let removed = subscriptions.remove(index);
        self.save()?;
        Ok(removed)
    }

    pub fn save(&self) -> GoreadResult<()> {
        if self.is_unreadable() {
            let reason = self
                .load_error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(GoreadError::CatalogUnreadable {
                path: self.store.location(),
                reason,
            });
        }

        self.store.save(&self.catalog)
    }
}
