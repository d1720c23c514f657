//! Wishlist of VINs, persisted through an injected key-value store.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::LeasingError;
use crate::LeasingResult;

/// Persistence for the wishlist.
pub trait WishlistStore {
    /// Stored VINs; an unset store is an empty list.
    fn load(&self) -> LeasingResult<Vec<String>>;

    fn save(&self, vins: &[String]) -> LeasingResult<()>;
}

/// Store kept in memory, e.g. for a single page session or tests.
#[derive(Debug, Default)]
pub struct InMemoryWishlistStore {
    vins: Mutex<Vec<String>>,
}

impl InMemoryWishlistStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WishlistStore for InMemoryWishlistStore {
    fn load(&self) -> LeasingResult<Vec<String>> {
        self.vins
            .lock()
            .map(|v| v.clone())
            .map_err(|e| LeasingError::Storage(e.to_string()))
    }

    fn save(&self, vins: &[String]) -> LeasingResult<()> {
        let mut guard = self
            .vins
            .lock()
            .map_err(|e| LeasingError::Storage(e.to_string()))?;
        *guard = vins.to_vec();
        Ok(())
    }
}

/// Store holding a JSON array of VINs in a file, the same shape the site
/// keeps under its `wishlist` local-storage key.
#[derive(Debug, Clone)]
pub struct JsonFileWishlistStore {
    path: PathBuf,
}

impl JsonFileWishlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileWishlistStore { path: path.into() }
    }
}

impl WishlistStore for JsonFileWishlistStore {
    fn load(&self) -> LeasingResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| LeasingError::Storage(format!("{}: {e}", self.path.display())))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, vins: &[String]) -> LeasingResult<()> {
        let json = serde_json::to_string(vins)?;
        fs::write(&self.path, json)
            .map_err(|e| LeasingError::Storage(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), count = vins.len(), "wishlist saved");
        Ok(())
    }
}

/// Wishlist operations over any store.
#[derive(Debug)]
pub struct Wishlist<S: WishlistStore> {
    store: S,
}

impl<S: WishlistStore> Wishlist<S> {
    pub fn new(store: S) -> Self {
        Wishlist { store }
    }

    /// Add the VIN if absent, remove it if present. Returns whether the VIN
    /// is on the list afterwards.
    pub fn toggle(&self, vin: &str) -> LeasingResult<bool> {
        let mut vins = self.store.load()?;
        let now_present = match vins.iter().position(|v| v == vin) {
            Some(index) => {
                vins.remove(index);
                false
            }
            None => {
                vins.push(vin.to_string());
                true
            }
        };
        self.store.save(&vins)?;
        Ok(now_present)
    }

    pub fn contains(&self, vin: &str) -> LeasingResult<bool> {
        Ok(self.store.load()?.iter().any(|v| v == vin))
    }

    pub fn count(&self) -> LeasingResult<usize> {
        Ok(self.store.load()?.len())
    }

    /// VINs in the order they were added.
    pub fn vins(&self) -> LeasingResult<Vec<String>> {
        self.store.load()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
