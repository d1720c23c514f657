use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use autoleasing_core::inventory::{
    load_with_fallback, Catalog, EmbeddedSource, JsonFileSource, VehicleSource,
};
use autoleasing_core::lease_payment::LeaseDefaults;
use autoleasing_core::wishlist::{JsonFileWishlistStore, Wishlist};

use crate::input;

/// Settings shared by all commands. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Terms behind the "from CHF .../month" teasers
    pub lease_defaults: LeaseDefaults,
    /// Vehicle data files, tried in order before the embedded sample
    pub data_sources: Vec<PathBuf>,
    /// File backing the wishlist
    pub wishlist_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            lease_defaults: LeaseDefaults::default(),
            data_sources: vec![PathBuf::from("autos.json")],
            wishlist_path: PathBuf::from("wishlist.json"),
        }
    }
}

impl AppConfig {
    /// Load from a YAML or JSON file, or use the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => {
                let config: AppConfig = input::file::read_document(p)?;
                info!(path = p, "configuration loaded");
                Ok(config)
            }
            None => {
                debug!("no configuration file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    /// Configured data files followed by the embedded sample.
    pub fn vehicle_sources(&self) -> Vec<Box<dyn VehicleSource>> {
        let mut sources: Vec<Box<dyn VehicleSource>> = self
            .data_sources
            .iter()
            .map(|p| Box::new(JsonFileSource::new(p)) as Box<dyn VehicleSource>)
            .collect();
        sources.push(Box::new(EmbeddedSource));
        sources
    }

    pub fn catalog(&self) -> Result<Catalog, Box<dyn std::error::Error>> {
        let loaded = load_with_fallback(&self.vehicle_sources())?;
        info!(source = %loaded.source, count = loaded.vehicles.len(), "inventory ready");
        Ok(Catalog::new(loaded.vehicles))
    }

    pub fn wishlist(&self) -> Wishlist<JsonFileWishlistStore> {
        Wishlist::new(JsonFileWishlistStore::new(&self.wishlist_path))
    }
}
