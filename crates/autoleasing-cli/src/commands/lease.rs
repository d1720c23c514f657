use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use autoleasing_core::lease_payment::{calculate_lease_payment, quote_lease_form, LeaseTerms};
use autoleasing_core::LeasingError;

use crate::config::AppConfig;
use crate::input;

/// Arguments for the monthly instalment calculation
#[derive(Args)]
pub struct MonthlyArgs {
    /// Vehicle cash price in CHF
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Upfront payment in CHF (default: configured share of the price)
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Residual value in CHF (default: configured share of the price)
    #[arg(long)]
    pub residual: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Nominal annual interest rate in percent (e.g. 5.95)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Path to a JSON/YAML file with leasing terms (used when --price is absent)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a form-style quote on a listed vehicle
#[derive(Args)]
pub struct QuoteArgs {
    /// Vehicle identification number
    #[arg(long)]
    pub vin: String,

    /// Deposit as typed into the form, e.g. "9'000"
    #[arg(long)]
    pub deposit: Option<String>,

    /// Residual value as typed into the form
    #[arg(long)]
    pub residual: Option<String>,

    /// Term in months as typed into the form
    #[arg(long)]
    pub term: Option<String>,

    /// Interest rate in percent as typed into the form
    #[arg(long)]
    pub rate: Option<String>,
}

pub fn run_monthly(args: MonthlyArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = match args.price {
        Some(price) => {
            let defaults = config.lease_defaults.terms_for(price)?;
            LeaseTerms {
                price,
                deposit: args.deposit.unwrap_or(defaults.deposit),
                residual_value: args.residual.unwrap_or(defaults.residual_value),
                term_months: args.term.unwrap_or(defaults.term_months),
                annual_interest_rate_percent: args
                    .rate
                    .unwrap_or(defaults.annual_interest_rate_percent),
            }
        }
        None => input::read_input::<LeaseTerms>(args.input.as_deref())?
            .ok_or("--price is required (or provide --input / stdin)")?,
    };
    let result = calculate_lease_payment(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_quote(args: QuoteArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    let vehicle = catalog
        .find(&args.vin)
        .ok_or_else(|| LeasingError::VehicleNotFound(args.vin.clone()))?;

    let mut form = config.lease_defaults.form_for(vehicle.price)?;
    if let Some(v) = args.deposit {
        form.deposit = v;
    }
    if let Some(v) = args.residual {
        form.residual_value = v;
    }
    if let Some(v) = args.term {
        form.term_months = v;
    }
    if let Some(v) = args.rate {
        form.annual_interest_rate_percent = v;
    }

    let quote = quote_lease_form(vehicle.price, &form)?;
    Ok(json!({
        "vin": vehicle.vin,
        "title": vehicle.display_name(),
        "form": form,
        "quote": quote,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn embedded_only() -> AppConfig {
        AppConfig {
            data_sources: Vec::new(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_monthly_fills_missing_terms_from_defaults() {
        let args = MonthlyArgs {
            price: Some(dec!(45000)),
            deposit: None,
            residual: None,
            term: None,
            rate: None,
            input: None,
        };
        let value = run_monthly(args, &AppConfig::default()).unwrap();
        assert_eq!(value["result"]["monthly_payment"], "797.30");
        assert_eq!(value["assumptions"]["deposit"], "9000.00");
    }

    #[test]
    fn test_quote_overrides_form_fields() {
        let args = QuoteArgs {
            vin: "BMWX32023".into(),
            deposit: None,
            residual: None,
            term: Some("36".into()),
            rate: None,
        };
        let value = run_quote(args, &embedded_only()).unwrap();
        assert_eq!(value["quote"]["display"], "CHF 1\u{2019}047.20 pro Monat");
        assert_eq!(value["form"]["term_months"], "36");
    }

    #[test]
    fn test_quote_unknown_vehicle() {
        let args = QuoteArgs {
            vin: "NOPE".into(),
            deposit: None,
            residual: None,
            term: None,
            rate: None,
        };
        assert!(run_quote(args, &embedded_only()).is_err());
    }
}
