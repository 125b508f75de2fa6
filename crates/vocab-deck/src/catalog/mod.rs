pub mod levels;
pub mod loader;

pub use levels::{Level, LevelCatalog, WordEntry};
pub use loader::{default_catalog, load, CatalogError, CatalogSource};
