use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Args, ValueEnum};
use serde_json::Value;

use autoleasing_core::enquiry::{submit_enquiry, EnquiryForm, EnquiryKind};
use autoleasing_core::LeasingError;

use crate::config::AppConfig;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Offer,
    Leasing,
    TestDrive,
}

impl From<KindArg> for EnquiryKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Offer => EnquiryKind::Offer,
            KindArg::Leasing => EnquiryKind::Leasing,
            KindArg::TestDrive => EnquiryKind::TestDrive,
        }
    }
}

/// Arguments for an enquiry
#[derive(Args)]
pub struct EnquiryArgs {
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Vehicle identification number
    #[arg(long)]
    pub vin: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub message: Option<String>,

    /// Test drive date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Test drive time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Path to a JSON/YAML enquiry (used when --kind is absent)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_enquiry(args: EnquiryArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let mut form: EnquiryForm = match args.kind {
        Some(kind) => EnquiryForm {
            kind: kind.into(),
            vin: args.vin.ok_or("--vin is required")?,
            name: args.name.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
            phone: args.phone,
            message: args.message,
            preferred_date: args.date,
            preferred_time: args.time.as_deref().map(parse_time).transpose()?,
            lease_terms: None,
        },
        None => input::read_input(args.input.as_deref())?
            .ok_or("--kind is required (or provide --input / stdin)")?,
    };

    if form.kind == EnquiryKind::Leasing && form.lease_terms.is_none() {
        let catalog = config.catalog()?;
        let vehicle = catalog
            .find(&form.vin)
            .ok_or_else(|| LeasingError::VehicleNotFound(form.vin.clone()))?;
        form.lease_terms = Some(config.lease_defaults.terms_for(vehicle.price)?);
    }

    let receipt = submit_enquiry(&form, Local::now().date_naive())?;
    Ok(serde_json::to_value(receipt)?)
}

fn parse_time(raw: &str) -> Result<NaiveTime, LeasingError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| LeasingError::InvalidInput {
        field: "time".into(),
        reason: format!("'{raw}' is not a time of day (HH:MM)"),
    })
}
