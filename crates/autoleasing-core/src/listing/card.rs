use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::form_urlencoded;

use crate::format::{
    format_chf, format_grouped, format_month_year, round_to_whole, truncate_with_ellipsis,
};
use crate::inventory::{Catalog, FilterOptions, SortOrder, Vehicle, VehicleFilter};
use crate::lease_payment::{LeaseDefaults, MonthlyPayment};
use crate::listing::PLACEHOLDER_IMAGE_BASE;
use crate::types::Money;

const TITLE_MAX_CHARS: usize = 40;
/// Struck-through "previous" price: 15 % above the current price.
const REFERENCE_MARKUP: Decimal = dec!(1.15);
const REFERENCE_ROUNDING: Decimal = dec!(100);

/// One card in the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingCard {
    pub vin: String,
    pub condition: String,
    pub title: String,
    /// Registration, mileage, power, fuel/drive
    pub detail_lines: Vec<String>,
    /// Absent when the markup leaves the decimal range
    pub reference_price: Option<Money>,
    pub reference_price_text: Option<String>,
    pub price: Money,
    pub price_text: String,
    /// Teaser instalment at the dealership default terms
    pub monthly_payment: Option<MonthlyPayment>,
    /// e.g. "ab CHF 797.30/Mt*"
    pub monthly_text: Option<String>,
    pub detail_href: String,
    pub image_url: String,
    pub wishlisted: bool,
}

/// The rendered listing grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    pub cards: Vec<ListingCard>,
    /// Number of vehicles matching the filter
    pub total: usize,
    pub filter_options: FilterOptions,
    pub wishlist_count: usize,
}

/// Filter, sort and render the catalog.
pub fn render_listing(
    catalog: &Catalog,
    filter: &VehicleFilter,
    order: SortOrder,
    defaults: &LeaseDefaults,
    wishlist: &HashSet<String>,
) -> ListingPage {
    let cards: Vec<ListingCard> = catalog
        .search(filter, order)
        .into_iter()
        .map(|v| listing_card(v, defaults, wishlist.contains(&v.vin)))
        .collect();

    ListingPage {
        total: cards.len(),
        cards,
        filter_options: catalog.filter_options(),
        wishlist_count: wishlist.len(),
    }
}

/// Render a single vehicle as a card.
pub fn listing_card(vehicle: &Vehicle, defaults: &LeaseDefaults, wishlisted: bool) -> ListingCard {
    let monthly_payment = match defaults.monthly_payment_for(vehicle.price) {
        Ok(payment) => Some(payment),
        Err(e) => {
            warn!(vin = %vehicle.vin, error = %e, "no teaser rate for vehicle");
            None
        }
    };
    let reference = reference_price(vehicle.price);
    if reference.is_none() {
        warn!(vin = %vehicle.vin, price = %vehicle.price, "no reference price for vehicle");
    }

    ListingCard {
        vin: vehicle.vin.clone(),
        condition: vehicle.condition_label().to_string(),
        title: truncate_with_ellipsis(&vehicle.display_name(), TITLE_MAX_CHARS),
        detail_lines: detail_lines(vehicle),
        reference_price: reference,
        reference_price_text: reference.map(|p| format_chf(p, 0)),
        price: vehicle.price,
        price_text: format_chf(vehicle.price, 0),
        monthly_text: monthly_payment.map(|p| format!("ab {p}/Mt*")),
        monthly_payment,
        detail_href: detail_href(&vehicle.vin),
        image_url: card_image_url(vehicle),
        wishlisted,
    }
}

/// Display-only "previous" price: price plus 15 %, to the nearest CHF 100.
pub fn reference_price(price: Money) -> Option<Money> {
    price
        .checked_mul(REFERENCE_MARKUP)
        .and_then(|marked_up| round_to_whole(marked_up, REFERENCE_ROUNDING))
}

/// Relative link to the detail page of a vehicle.
pub fn detail_href(vin: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("vin", vin)
        .finish();
    format!("detail.html?{query}")
}

fn detail_lines(vehicle: &Vehicle) -> Vec<String> {
    let fuel = match vehicle.drive.as_deref() {
        Some(drive) if !drive.is_empty() => format!("{} / {}", vehicle.fuel, drive),
        _ => vehicle.fuel.clone(),
    };
    vec![
        format!("EZ {}", format_month_year(vehicle.first_registration)),
        format!("{} km", format_grouped(u64::from(vehicle.mileage))),
        format!("{} PS", vehicle.power),
        fuel,
    ]
}

fn card_image_url(vehicle: &Vehicle) -> String {
    match vehicle.images.first() {
        Some(url) => url.clone(),
        None => format!("{PLACEHOLDER_IMAGE_BASE}/400x300?sig={}", vehicle.image_seed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::sample_vehicles;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bmw_card() {
        let bmw = &sample_vehicles()[0];
        let card = listing_card(bmw, &LeaseDefaults::default(), true);

        assert_eq!(card.title, "BMW X3");
        assert_eq!(card.condition, "Occasion");
        assert_eq!(
            card.detail_lines,
            vec![
                "EZ 05.2023".to_string(),
                "12\u{2019}000 km".to_string(),
                "190 PS".to_string(),
                "Petrol / Allrad".to_string(),
            ]
        );
        assert_eq!(card.reference_price, Some(dec!(51800)));
        assert_eq!(card.reference_price_text.as_deref(), Some("CHF 51\u{2019}800"));
        assert_eq!(card.price_text, "CHF 45\u{2019}000");
        assert_eq!(card.monthly_text.as_deref(), Some("ab CHF 797.30/Mt*"));
        assert_eq!(card.detail_href, "detail.html?vin=BMWX32023");
        assert!(card.wishlisted);
        assert!(card.image_url.ends_with(&format!("sig={}", bmw.image_seed())));
    }

    #[test]
    fn test_long_title_is_truncated() {
        let mut car = sample_vehicles().remove(1);
        car.model = "A4 Avant 40 TDI quattro S line Black Edition".into();
        let card = listing_card(&car, &LeaseDefaults::default(), false);
        assert_eq!(card.title.chars().count(), 38);
        assert!(card.title.ends_with('\u{2026}'));
    }

    #[test]
    fn test_card_without_drive_or_valid_rate() {
        let mut car = sample_vehicles().remove(2);
        car.drive = None;
        let broken = LeaseDefaults {
            term_months: 0,
            ..LeaseDefaults::default()
        };
        let card = listing_card(&car, &broken, false);
        assert_eq!(card.detail_lines[3], "Petrol");
        assert_eq!(card.monthly_payment, None);
        assert_eq!(card.monthly_text, None);
    }

    #[test]
    fn test_price_near_decimal_max_still_renders() {
        let mut car = sample_vehicles().remove(0);
        car.price = Decimal::from_i128_with_scale(7 * 10i128.pow(28), 0);
        assert_eq!(reference_price(car.price), None);

        let card = listing_card(&car, &LeaseDefaults::default(), false);
        assert_eq!(card.reference_price, None);
        assert_eq!(card.reference_price_text, None);
        assert_eq!(card.price_text, format_chf(car.price, 0));

        let single_month = LeaseDefaults {
            term_months: 1,
            deposit_ratio: Decimal::ZERO,
            residual_ratio: Decimal::ZERO,
            annual_interest_rate_percent: Decimal::ZERO,
        };
        let card = listing_card(&car, &single_month, false);
        assert_eq!(card.monthly_payment, None);
        assert_eq!(card.monthly_text, None);
    }

    #[test]
    fn test_record_image_preferred() {
        let mut car = sample_vehicles().remove(0);
        car.images = vec!["https://cdn.example.ch/x3.jpg".into()];
        let card = listing_card(&car, &LeaseDefaults::default(), false);
        assert_eq!(card.image_url, "https://cdn.example.ch/x3.jpg");
    }

    #[test]
    fn test_detail_href_encodes_vin() {
        assert_eq!(detail_href("AB 12&3"), "detail.html?vin=AB+12%263");
    }

    #[test]
    fn test_render_listing_counts() {
        let catalog = Catalog::new(sample_vehicles());
        let wishlist: HashSet<String> = ["TESLAM32020".to_string()].into_iter().collect();
        let filter = VehicleFilter {
            fuel: Some("Petrol".into()),
            ..Default::default()
        };
        let page = render_listing(
            &catalog,
            &filter,
            SortOrder::PriceAsc,
            &LeaseDefaults::default(),
            &wishlist,
        );
        assert_eq!(page.total, 2);
        assert_eq!(page.cards[0].vin, "VWGOLF2021");
        assert_eq!(page.cards[1].vin, "BMWX32023");
        assert!(page.cards.iter().all(|c| !c.wishlisted));
        assert_eq!(page.wishlist_count, 1);
        assert_eq!(page.filter_options.brands.len(), 4);
    }
}
