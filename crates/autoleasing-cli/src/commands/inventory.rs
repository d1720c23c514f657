use std::collections::HashSet;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use autoleasing_core::inventory::{SortOrder, VehicleFilter};
use autoleasing_core::listing::{render_listing, vehicle_detail, vin_from_query};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    Brand,
    PriceAsc,
    PriceDesc,
    YearAsc,
    YearDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Brand => SortOrder::Brand,
            SortArg::PriceAsc => SortOrder::PriceAsc,
            SortArg::PriceDesc => SortOrder::PriceDesc,
            SortArg::YearAsc => SortOrder::YearAsc,
            SortArg::YearDesc => SortOrder::YearDesc,
        }
    }
}

/// Arguments for the listing grid
#[derive(Args)]
pub struct ListingArgs {
    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub vehicle_type: Option<String>,

    #[arg(long)]
    pub fuel: Option<String>,

    /// Minimum price in CHF
    #[arg(long)]
    pub price_min: Option<Decimal>,

    /// Maximum price in CHF
    #[arg(long)]
    pub price_max: Option<Decimal>,

    /// Earliest registration year
    #[arg(long)]
    pub year_min: Option<i32>,

    /// Latest registration year
    #[arg(long)]
    pub year_max: Option<i32>,

    /// Minimum mileage in km
    #[arg(long)]
    pub mileage_min: Option<u32>,

    /// Maximum mileage in km
    #[arg(long)]
    pub mileage_max: Option<u32>,

    #[arg(long, value_enum, default_value_t = SortArg::Brand)]
    pub sort: SortArg,
}

/// Arguments for a vehicle detail page
#[derive(Args)]
pub struct DetailArgs {
    /// Vehicle identification number
    #[arg(long, conflicts_with = "query")]
    pub vin: Option<String>,

    /// Page query string, e.g. "?vin=BMWX32023"
    #[arg(long)]
    pub query: Option<String>,
}

pub fn run_listing(args: ListingArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    let wishlist: HashSet<String> = config.wishlist().vins()?.into_iter().collect();

    let filter = VehicleFilter {
        brand: args.brand,
        model: args.model,
        vehicle_type: args.vehicle_type,
        fuel: args.fuel,
        price_min: args.price_min,
        price_max: args.price_max,
        year_min: args.year_min,
        year_max: args.year_max,
        mileage_min: args.mileage_min,
        mileage_max: args.mileage_max,
    };

    let page = render_listing(
        &catalog,
        &filter,
        args.sort.into(),
        &config.lease_defaults,
        &wishlist,
    );
    Ok(serde_json::to_value(page)?)
}

pub fn run_detail(args: DetailArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let vin = match (args.vin, args.query) {
        (Some(vin), _) => vin,
        (None, Some(query)) => vin_from_query(&query)?,
        (None, None) => return Err("--vin or --query is required".into()),
    };
    let catalog = config.catalog()?;
    let detail = vehicle_detail(&catalog, &vin, &config.lease_defaults)?;
    Ok(serde_json::to_value(detail)?)
}
