use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::LeasingError;
use crate::format::{format_chf, format_grouped, format_month_year, truncate_with_ellipsis};
use crate::inventory::Catalog;
use crate::lease_payment::{LeaseDefaults, LeaseForm, MonthlyPayment};
use crate::listing::PLACEHOLDER_IMAGE_BASE;
use crate::types::Money;
use crate::LeasingResult;

const SUBTITLE_MAX_CHARS: usize = 120;
const GALLERY_SIZE: u32 = 3;
const NO_REMARKS: &str = "Keine weiteren Bemerkungen vorhanden.";
const STANDARD_EQUIPMENT: [&str; 5] = [
    "ABS",
    "Klimaanlage",
    "Navigationssystem",
    "Sitzheizung",
    "Bluetooth",
];

/// One row of the technical data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRow {
    pub label: String,
    pub value: String,
}

/// Everything the detail page shows for one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDetail {
    pub vin: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub condition: String,
    pub gallery: Vec<String>,
    pub specifications: Vec<SpecRow>,
    pub price: Money,
    pub price_text: String,
    pub monthly_payment: Option<MonthlyPayment>,
    pub monthly_text: Option<String>,
    pub remarks: String,
    pub equipment: Vec<String>,
    /// Pre-filled leasing calculator
    pub lease_form: LeaseForm,
    /// Price shown as fixed text above the calculator inputs
    pub lease_price_text: String,
}

/// Extract the VIN from a query string such as `?vin=BMWX32023`.
pub fn vin_from_query(query: &str) -> LeasingResult<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "vin")
        .map(|(_, value)| value.trim().to_string())
        .filter(|vin| !vin.is_empty())
        .ok_or_else(|| LeasingError::invalid_input("vin", "no vehicle identifier given"))
}

/// Build the detail page of the vehicle with the given VIN.
pub fn vehicle_detail(
    catalog: &Catalog,
    vin: &str,
    defaults: &LeaseDefaults,
) -> LeasingResult<VehicleDetail> {
    let vehicle = catalog
        .find(vin)
        .ok_or_else(|| LeasingError::VehicleNotFound(vin.to_string()))?;

    let monthly_payment = defaults.monthly_payment_for(vehicle.price).ok();
    let gallery = if vehicle.images.is_empty() {
        let seed = vehicle.image_seed();
        (0..GALLERY_SIZE)
            .map(|i| seed.wrapping_add(u64::from(i)))
            .map(|sig| format!("{PLACEHOLDER_IMAGE_BASE}/600x400?sig={sig}"))
            .collect()
    } else {
        vehicle.images.clone()
    };

    let specifications = [
        ("Erstzulassung", format_month_year(vehicle.first_registration)),
        ("Kilometer", format!("{} km", format_grouped(u64::from(vehicle.mileage)))),
        ("Fahrzeugart", vehicle.vehicle_type.clone()),
        ("Leistung", format!("{} PS", vehicle.power)),
        ("Treibstoff", vehicle.fuel.clone()),
        ("Antrieb", vehicle.drive.clone().unwrap_or_default()),
        ("Farbe", vehicle.color.clone()),
        ("Getriebe", vehicle.gearbox.clone()),
    ]
    .into_iter()
    .map(|(label, value)| SpecRow {
        label: label.to_string(),
        value,
    })
    .collect();

    let remarks = if vehicle.description.is_empty() {
        NO_REMARKS.to_string()
    } else {
        vehicle.description.clone()
    };

    Ok(VehicleDetail {
        vin: vehicle.vin.clone(),
        title: vehicle.display_name(),
        subtitle: (!vehicle.description.is_empty())
            .then(|| truncate_with_ellipsis(&vehicle.description, SUBTITLE_MAX_CHARS)),
        condition: vehicle.condition_label().to_string(),
        gallery,
        specifications,
        price: vehicle.price,
        price_text: format_chf(vehicle.price, 0),
        monthly_text: monthly_payment.map(|p| format!("ab {p}/Mt*")),
        monthly_payment,
        remarks,
        equipment: STANDARD_EQUIPMENT.iter().map(|s| s.to_string()).collect(),
        lease_form: defaults.form_for(vehicle.price)?,
        lease_price_text: format_chf(vehicle.price, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::sample_vehicles;
    use rust_decimal_macros::dec;

    #[test]
    fn test_vin_from_query() {
        assert_eq!(vin_from_query("?vin=BMWX32023").unwrap(), "BMWX32023");
        assert_eq!(vin_from_query("lang=de&vin=AB%2012").unwrap(), "AB 12");
        assert!(matches!(
            vin_from_query("?lang=de"),
            Err(LeasingError::InvalidInput { .. })
        ));
        assert!(vin_from_query("?vin=").is_err());
    }

    #[test]
    fn test_detail_page() {
        let catalog = Catalog::new(sample_vehicles());
        let detail = vehicle_detail(&catalog, "TESLAM32020", &LeaseDefaults::default()).unwrap();

        assert_eq!(detail.title, "Tesla Model 3");
        assert_eq!(detail.gallery.len(), 3);
        assert_eq!(detail.specifications.len(), 8);
        assert_eq!(detail.specifications[0].value, "07.2020");
        assert_eq!(detail.specifications[1].value, "40\u{2019}000 km");
        assert_eq!(detail.specifications[5].value, "Hinterrad");
        assert_eq!(detail.price_text, "CHF 55\u{2019}000");
        assert_eq!(detail.monthly_payment.map(|p| p.amount()), Some(dec!(974.50)));
        assert_eq!(detail.monthly_text.as_deref(), Some("ab CHF 974.50/Mt*"));
        assert_eq!(detail.lease_form.deposit, "11000");
        assert_eq!(detail.lease_form.residual_value, "22000");
        assert_eq!(detail.lease_price_text, "CHF 55\u{2019}000.00");
        assert_eq!(detail.equipment.len(), 5);
    }

    #[test]
    fn test_long_description_and_missing_remarks() {
        let mut cars = sample_vehicles();
        cars[0].description = "x".repeat(150);
        cars[1].description = String::new();
        let catalog = Catalog::new(cars);
        let defaults = LeaseDefaults::default();

        let long = vehicle_detail(&catalog, "BMWX32023", &defaults).unwrap();
        assert_eq!(long.subtitle.map(|s| s.chars().count()), Some(118));
        assert_eq!(long.remarks.len(), 150);

        let bare = vehicle_detail(&catalog, "AUDIA42022", &defaults).unwrap();
        assert_eq!(bare.subtitle, None);
        assert_eq!(bare.remarks, NO_REMARKS);
    }

    #[test]
    fn test_gallery_for_long_non_ascii_vin() {
        let mut cars = sample_vehicles();
        cars[0].vin = "\u{1F697}".repeat(50_000);
        let vin = cars[0].vin.clone();
        let seed = cars[0].image_seed();
        let catalog = Catalog::new(cars);

        let detail = vehicle_detail(&catalog, &vin, &LeaseDefaults::default()).unwrap();
        assert_eq!(detail.gallery.len(), 3);
        assert!(detail.gallery[2].ends_with(&format!("sig={}", seed + 2)));
    }

    #[test]
    fn test_unknown_vin() {
        let catalog = Catalog::new(sample_vehicles());
        let err = vehicle_detail(&catalog, "NOPE", &LeaseDefaults::default()).unwrap_err();
        assert!(matches!(err, LeasingError::VehicleNotFound(vin) if vin == "NOPE"));
    }
}
