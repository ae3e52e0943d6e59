use std::path::PathBuf;

use crate::domain::Catalog;
use crate::errors::GoreadResult;

#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore {
    fn location(&self) -> PathBuf;
    fn load(&self) -> GoreadResult<Catalog>;
    fn save(&self, catalog: &Catalog) -> GoreadResult<()>;
}
