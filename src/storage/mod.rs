pub mod traits;
pub mod yaml;

pub use traits::CatalogStore;
pub use yaml::{default_location, load_or_default, open, LoadOutcome, YamlCatalogStore};
