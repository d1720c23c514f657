use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use autoleasing_core::inventory::source::parse_vehicle_list;
use autoleasing_core::inventory::{Catalog, SortOrder, VehicleFilter};
use autoleasing_core::lease_payment::{LeaseDefaults, LeaseForm, LeaseTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn catalog_from_json(vehicles_json: &str) -> NapiResult<Catalog> {
    let vehicles = parse_vehicle_list("bindings", vehicles_json).map_err(to_napi_error)?;
    Ok(Catalog::new(vehicles))
}

fn defaults_from_json(defaults_json: Option<String>) -> NapiResult<LeaseDefaults> {
    match defaults_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error),
        None => Ok(LeaseDefaults::default()),
    }
}

// ---------------------------------------------------------------------------
// Leasing calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_lease_payment(terms_json: String) -> NapiResult<String> {
    let terms: LeaseTerms = serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let output = autoleasing_core::lease_payment::calculate_lease_payment(&terms)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Monthly instalment as a decimal string, e.g. "797.30".
#[napi]
pub fn monthly_payment(terms_json: String) -> NapiResult<String> {
    let terms: LeaseTerms = serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let payment = autoleasing_core::lease_payment::compute_monthly_payment(&terms)
        .map_err(to_napi_error)?;
    Ok(payment.amount().to_string())
}

#[napi]
pub fn quote_lease_form(price: String, form_json: String) -> NapiResult<String> {
    let price = Decimal::from_str(price.trim()).map_err(to_napi_error)?;
    let form: LeaseForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let quote =
        autoleasing_core::lease_payment::quote_lease_form(price, &form).map_err(to_napi_error)?;
    serde_json::to_string(&quote).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Listing and detail page
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ListingRequest {
    #[serde(default)]
    filter: VehicleFilter,
    #[serde(default)]
    sort: SortOrder,
    #[serde(default)]
    wishlist: Vec<String>,
}

#[napi]
pub fn render_listing(
    vehicles_json: String,
    request_json: String,
    defaults_json: Option<String>,
) -> NapiResult<String> {
    let catalog = catalog_from_json(&vehicles_json)?;
    let request: ListingRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let defaults = defaults_from_json(defaults_json)?;
    let wishlist: HashSet<String> = request.wishlist.into_iter().collect();
    let page = autoleasing_core::listing::render_listing(
        &catalog,
        &request.filter,
        request.sort,
        &defaults,
        &wishlist,
    );
    serde_json::to_string(&page).map_err(to_napi_error)
}

/// Detail page for the VIN in a query string such as `?vin=BMWX32023`.
#[napi]
pub fn vehicle_detail(
    vehicles_json: String,
    query: String,
    defaults_json: Option<String>,
) -> NapiResult<String> {
    let catalog = catalog_from_json(&vehicles_json)?;
    let vin = autoleasing_core::listing::vin_from_query(&query).map_err(to_napi_error)?;
    let defaults = defaults_from_json(defaults_json)?;
    let detail = autoleasing_core::listing::vehicle_detail(&catalog, &vin, &defaults)
        .map_err(to_napi_error)?;
    serde_json::to_string(&detail).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Enquiries
// ---------------------------------------------------------------------------

/// `today` is an ISO date (YYYY-MM-DD) bounding the earliest test drive.
#[napi]
pub fn submit_enquiry(form_json: String, today: String) -> NapiResult<String> {
    let form: autoleasing_core::enquiry::EnquiryForm =
        serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let today = NaiveDate::from_str(today.trim()).map_err(to_napi_error)?;
    let receipt =
        autoleasing_core::enquiry::submit_enquiry(&form, today).map_err(to_napi_error)?;
    serde_json::to_string(&receipt).map_err(to_napi_error)
}
