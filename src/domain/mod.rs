pub mod catalog;
pub mod error;
pub mod registry;
pub mod slug;

pub use catalog::{
    CatalogEntry, CatalogRecord, Detection, apply_exclusions, load_catalog, load_exclusions,
};
pub use error::AppError;
pub use registry::normalize_registry_path;
pub use slug::Slug;
