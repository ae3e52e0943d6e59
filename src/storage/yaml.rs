use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::traits::CatalogStore;
use crate::domain::Catalog;
use crate::errors::{GoreadError, GoreadResult};

/// Directory under the user's config dir that holds the catalog.
pub const APP_DIR: &str = "goread";

/// Catalog file name inside [`APP_DIR`].
pub const CATALOG_FILE: &str = "urls.yml";

const FILE_MODE: u32 = 0o644;
const DIR_MODE: u32 = 0o755;

/// `<config dir>/goread/urls.yml`
pub fn default_location() -> GoreadResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(GoreadError::NoConfigDir)?;
    Ok(config_dir.join(APP_DIR).join(CATALOG_FILE))
}

/// Which branch [`load_or_default`] took.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Catalog),
    Defaulted { catalog: Catalog, reason: GoreadError },
}

impl LoadOutcome {
    pub fn was_defaulted(&self) -> bool {
        matches!(self, LoadOutcome::Defaulted { .. })
    }

    /// Why the built-in catalog was substituted, if it was.
    pub fn reason(&self) -> Option<&GoreadError> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Defaulted { reason, .. } => Some(reason),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        match self {
            LoadOutcome::Loaded(catalog) => catalog,
            LoadOutcome::Defaulted { catalog, .. } => catalog,
        }
    }

    pub fn into_catalog(self) -> Catalog {
        match self {
            LoadOutcome::Loaded(catalog) => catalog,
            LoadOutcome::Defaulted { catalog, .. } => catalog,
        }
    }
}

/// Load the catalog, substituting the built-in one on any failure.
pub fn load_or_default<S: CatalogStore + ?Sized>(store: &S) -> LoadOutcome {
    match store.load() {
        Ok(catalog) => LoadOutcome::Loaded(catalog),
        Err(reason) => {
            let location = store.location();
            info!(
                path = %location.display(),
                error = %reason,
                "Could not load catalog, using built-in defaults"
            );
            let catalog = Catalog::default_catalog().with_location(&location);
            LoadOutcome::Defaulted { catalog, reason }
        }
    }
}

/// Resolve the location and load the catalog there. Never fails.
pub fn open(explicit: Option<&Path>) -> Catalog {
    load_or_default(&YamlCatalogStore::open(explicit)).into_catalog()
}

/// Catalog persisted as a YAML document.
#[derive(Debug, Clone)]
pub struct YamlCatalogStore {
    path: Option<PathBuf>,
}

impl YamlCatalogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Uses `explicit` unless it is missing or empty, otherwise the platform
    /// default. An unresolvable default leaves the store without a location.
    pub fn open(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return Self::new(path);
        }

        let path = match default_location() {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(error = %e, "No default catalog location");
                None
            }
        };
        Self { path }
    }

    fn resolved(&self) -> GoreadResult<&Path> {
        self.path.as_deref().ok_or(GoreadError::NoConfigDir)
    }
}

impl CatalogStore for YamlCatalogStore {
    fn location(&self) -> PathBuf {
        self.path.clone().unwrap_or_default()
    }

    fn load(&self) -> GoreadResult<Catalog> {
        let path = self.resolved()?;
        debug!(path = %path.display(), "Loading catalog");

        let content = fs::read_to_string(path)?;
        let catalog: Catalog = serde_yaml::from_str(&content)?;

        Ok(catalog.with_location(path))
    }

    fn save(&self, catalog: &Catalog) -> GoreadResult<()> {
        let path = self.resolved()?;
        debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "Saving catalog"
        );

        let yaml = serde_yaml::to_string(catalog)?;

        let mut file = match open_for_write(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    create_dirs(parent)?;
                }
                open_for_write(path)?
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}

fn open_for_write(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    options.open(path)
}

fn create_dirs(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(dir)
}
