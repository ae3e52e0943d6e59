pub mod catalog_service;
pub mod import_export_service;

pub use catalog_service::CatalogService;
pub use import_export_service::{ImportExportService, ImportResult};
