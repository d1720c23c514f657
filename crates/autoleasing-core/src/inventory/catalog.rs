use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::inventory::vehicle::Vehicle;
use crate::types::Money;

/// Active listing filters. Every field is optional; `Default` is the reset
/// state showing the whole stock. Ranges are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleFilter {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel: Option<String>,
    pub price_min: Option<Money>,
    pub price_max: Option<Money>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub mileage_min: Option<u32>,
    pub mileage_max: Option<u32>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let year = vehicle.registration_year();
        equals(&self.brand, &vehicle.brand)
            && equals(&self.model, &vehicle.model)
            && equals(&self.vehicle_type, &vehicle.vehicle_type)
            && equals(&self.fuel, &vehicle.fuel)
            && within(self.price_min, self.price_max, vehicle.price)
            && within(self.year_min, self.year_max, year)
            && within(self.mileage_min, self.mileage_max, vehicle.mileage)
    }
}

fn equals(wanted: &Option<String>, actual: &str) -> bool {
    match wanted.as_deref() {
        None | Some("") => true,
        Some(w) => w == actual,
    }
}

fn within<T: PartialOrd>(min: Option<T>, max: Option<T>, value: T) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Brand,
    PriceAsc,
    PriceDesc,
    YearAsc,
    YearDesc,
}

/// Distinct values offered in the filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub models: Vec<String>,
    pub vehicle_types: Vec<String>,
    pub fuels: Vec<String>,
}

/// The loaded stock.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Catalog { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn find(&self, vin: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vin == vin)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            brands: distinct(self.vehicles.iter().map(|v| v.brand.as_str())),
            models: distinct(self.vehicles.iter().map(|v| v.model.as_str())),
            vehicle_types: distinct(self.vehicles.iter().map(|v| v.vehicle_type.as_str())),
            fuels: distinct(self.vehicles.iter().map(|v| v.fuel.as_str())),
        }
    }

    /// Vehicles passing `filter`, in `order`. Ties keep stock order.
    pub fn search(&self, filter: &VehicleFilter, order: SortOrder) -> Vec<&Vehicle> {
        let mut found: Vec<&Vehicle> = self.vehicles.iter().filter(|v| filter.matches(v)).collect();
        match order {
            SortOrder::PriceAsc => found.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => found.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::YearAsc => found.sort_by_key(|v| v.registration_year()),
            SortOrder::YearDesc => {
                found.sort_by(|a, b| b.registration_year().cmp(&a.registration_year()))
            }
            SortOrder::Brand => found.sort_by_cached_key(|v| v.brand.to_lowercase()),
        }
        found
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
