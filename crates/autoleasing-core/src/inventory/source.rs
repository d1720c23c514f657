use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LeasingError;
use crate::inventory::vehicle::{sample_vehicles, Vehicle};
use crate::LeasingResult;

/// Somewhere vehicle records can be loaded from.
pub trait VehicleSource {
    /// Name used in logs and in the loaded result.
    fn name(&self) -> String;

    fn load(&self) -> LeasingResult<Vec<Vehicle>>;
}

/// A JSON document holding an array of vehicle records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl VehicleSource for JsonFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> LeasingResult<Vec<Vehicle>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| LeasingError::DataSource {
            source_name: self.name(),
            reason: e.to_string(),
        })?;
        parse_vehicle_list(&self.name(), &contents)
    }
}

/// The sample shipped with the site.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl VehicleSource for EmbeddedSource {
    fn name(&self) -> String {
        "embedded sample".to_string()
    }

    fn load(&self) -> LeasingResult<Vec<Vehicle>> {
        Ok(sample_vehicles())
    }
}

/// Vehicles together with the source that produced them.
#[derive(Debug, Clone)]
pub struct LoadedInventory {
    pub vehicles: Vec<Vehicle>,
    pub source: String,
}

/// Parse a JSON document that must be an array of vehicle records.
pub fn parse_vehicle_list(source_name: &str, contents: &str) -> LeasingResult<Vec<Vehicle>> {
    let data: Value = serde_json::from_str(contents).map_err(|e| LeasingError::DataSource {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;
    if !data.is_array() {
        return Err(LeasingError::DataSource {
            source_name: source_name.to_string(),
            reason: "JSON document is not a list".into(),
        });
    }
    serde_json::from_value(data).map_err(|e| LeasingError::DataSource {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

/// Try each source in order and return the first that loads.
///
/// Fails with the last source's error when none does.
pub fn load_with_fallback(sources: &[Box<dyn VehicleSource>]) -> LeasingResult<LoadedInventory> {
    let mut last_error = LeasingError::DataSource {
        source_name: "inventory".into(),
        reason: "no data sources configured".into(),
    };

    for source in sources {
        match source.load() {
            Ok(vehicles) => {
                debug!(source = %source.name(), count = vehicles.len(), "loaded vehicles");
                return Ok(LoadedInventory {
                    vehicles,
                    source: source.name(),
                });
            }
            Err(e) => {
                warn!(source = %source.name(), error = %e, "vehicle source failed, trying next");
                last_error = e;
            }
        }
    }

    Err(last_error)
}
