//! Vehicle stock: records, loading with fallback, filtering and sorting.

pub mod catalog;
pub mod source;
pub mod vehicle;

pub use catalog::{Catalog, FilterOptions, SortOrder, VehicleFilter};
pub use source::{load_with_fallback, EmbeddedSource, JsonFileSource, LoadedInventory, VehicleSource};
pub use vehicle::{sample_vehicles, Vehicle};
