use chrono::{Datelike, NaiveDate};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Condition label shown when the record carries none.
pub const DEFAULT_CONDITION: &str = "Occasion";

/// One vehicle of the dealer's stock.
///
/// Accepts both the camelCase records of the embedded sample and the
/// snake_case export (`make`, `price_chf`, `mileage_km`, ...) of the
/// published `autos.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub vin: String,
    #[serde(alias = "make")]
    pub brand: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, alias = "vehicle_type")]
    pub vehicle_type: String,
    #[serde(default)]
    pub fuel: String,
    #[serde(alias = "price_chf")]
    pub price: Money,
    #[serde(alias = "first_registration")]
    pub first_registration: NaiveDate,
    /// Odometer reading in km
    #[serde(default, alias = "mileage_km")]
    pub mileage: u32,
    /// Power in PS
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub gearbox: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Vehicle {
    pub fn registration_year(&self) -> i32 {
        self.first_registration.year()
    }

    pub fn condition_label(&self) -> &str {
        self.condition.as_deref().unwrap_or(DEFAULT_CONDITION)
    }

    /// "Brand Model"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Stable image seed: sum of the VIN's code points.
    pub fn image_seed(&self) -> u64 {
        self.vin
            .chars()
            .fold(0u64, |seed, c| seed.wrapping_add(u64::from(c)))
    }
}

/// The four-vehicle sample embedded in the site, used when no data file
/// can be loaded.
pub fn sample_vehicles() -> Vec<Vehicle> {
    vec![
        sample(
            "BMWX32023",
            "BMW",
            "X3",
            "SUV",
            "Petrol",
            dec!(45000),
            (2023, 5, 15),
            12000,
            190,
            "Blue",
            "Automatic",
            "Gut gepflegt, unfallfrei und mit scheckheftgepflegter Historie.",
            "Allrad",
        ),
        sample(
            "AUDIA42022",
            "Audi",
            "A4",
            "Limousine",
            "Diesel",
            dec!(38000),
            (2022, 9, 1),
            20000,
            170,
            "Grey",
            "Manual",
            "Sparsamer Diesel mit umfangreicher Ausstattung und neuen Winterreifen.",
            "Vorderrad",
        ),
        sample(
            "VWGOLF2021",
            "Volkswagen",
            "Golf",
            "Hatchback",
            "Petrol",
            dec!(25000),
            (2021, 11, 20),
            30000,
            150,
            "White",
            "Automatic",
            "Kompaktes Fahrzeug mit moderner Ausstattung und hoher Alltagstauglichkeit.",
            "Vorderrad",
        ),
        sample(
            "TESLAM32020",
            "Tesla",
            "Model 3",
            "Limousine",
            "Electric",
            dec!(55000),
            (2020, 7, 30),
            40000,
            283,
            "Red",
            "Automatic",
            "Vollelektrische Limousine mit Autopilot, guter Reichweite und wenigen Gebrauchsspuren.",
            "Hinterrad",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample(
    vin: &str,
    brand: &str,
    model: &str,
    vehicle_type: &str,
    fuel: &str,
    price: Money,
    (year, month, day): (i32, u32, u32),
    mileage: u32,
    power: u32,
    color: &str,
    gearbox: &str,
    description: &str,
    drive: &str,
) -> Vehicle {
    Vehicle {
        vin: vin.into(),
        brand: brand.into(),
        model: model.into(),
        trim: None,
        vehicle_type: vehicle_type.into(),
        fuel: fuel.into(),
        price,
        first_registration: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        mileage,
        power,
        color: color.into(),
        gearbox: gearbox.into(),
        description: description.into(),
        drive: Some(drive.into()),
        condition: Some(DEFAULT_CONDITION.into()),
        images: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_complete() {
        let cars = sample_vehicles();
        assert_eq!(cars.len(), 4);
        assert_eq!(cars[0].registration_year(), 2023);
        assert_eq!(cars[3].display_name(), "Tesla Model 3");
    }

    #[test]
    fn test_image_seed_is_code_point_sum() {
        let mut car = sample_vehicles().remove(0);
        car.vin = "AB".into();
        assert_eq!(car.image_seed(), 65 + 66);
    }

    #[test]
    fn test_image_seed_of_long_non_ascii_vin() {
        let mut car = sample_vehicles().remove(0);
        car.vin = "\u{1F697}".repeat(50_000);
        assert_eq!(car.image_seed(), 50_000 * 0x1F697);
    }

    #[test]
    fn test_parses_camel_case_record() {
        let json = r#"{
            "vin": "X1", "brand": "BMW", "model": "X1", "vehicleType": "SUV",
            "fuel": "Petrol", "price": 30000, "firstRegistration": "2022-01-10",
            "mileage": 5000, "power": 136, "color": "Black", "gearbox": "Automatic",
            "description": "Neuwertig"
        }"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.vehicle_type, "SUV");
        assert_eq!(v.condition_label(), DEFAULT_CONDITION);
        assert_eq!(v.drive, None);
    }

    #[test]
    fn test_parses_export_record() {
        let json = r#"{
            "vin": "SKODA1", "make": "Skoda", "model": "Octavia", "trim": "RS",
            "price_chf": 31900, "first_registration": "2021-03-01",
            "mileage_km": 41000, "images": ["https://example.ch/1.jpg"]
        }"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.brand, "Skoda");
        assert_eq!(v.mileage, 41000);
        assert_eq!(v.trim.as_deref(), Some("RS"));
        assert_eq!(v.images.len(), 1);
        assert_eq!(v.registration_year(), 2021);
    }
}
