//! Text boundary of the interactive leasing form.
//!
//! Field values arrive as whatever the customer typed. They are parsed into
//! [`LeaseTerms`] here, or rejected with the offending field named, so the
//! calculator only ever sees typed terms.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeasingError;
use crate::lease_payment::calculator::{compute_monthly_payment, LeaseTerms, MonthlyPayment};
use crate::types::Money;
use crate::LeasingResult;

/// Raw values of the editable leasing form. The price is fixed per vehicle
/// and never typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaseForm {
    pub deposit: String,
    pub residual_value: String,
    pub term_months: String,
    pub annual_interest_rate_percent: String,
}

/// Result shown under the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseQuote {
    pub terms: LeaseTerms,
    pub monthly_payment: MonthlyPayment,
    /// e.g. "CHF 797.30 pro Monat"
    pub display: String,
}

/// Parse the form into terms for a vehicle of the given price.
pub fn parse_lease_form(price: Money, form: &LeaseForm) -> LeasingResult<LeaseTerms> {
    Ok(LeaseTerms {
        price,
        deposit: parse_amount("deposit", &form.deposit)?,
        residual_value: parse_amount("residual_value", &form.residual_value)?,
        term_months: parse_term(&form.term_months)?,
        annual_interest_rate_percent: parse_amount(
            "annual_interest_rate_percent",
            &form.annual_interest_rate_percent,
        )?,
    })
}

/// Parse, calculate and format in one step; called on every form edit.
pub fn quote_lease_form(price: Money, form: &LeaseForm) -> LeasingResult<LeaseQuote> {
    let terms = parse_lease_form(price, form)?;
    let monthly_payment = compute_monthly_payment(&terms)?;
    Ok(LeaseQuote {
        display: format!("{monthly_payment} pro Monat"),
        terms,
        monthly_payment,
    })
}

fn parse_amount(field: &str, raw: &str) -> LeasingResult<Decimal> {
    let cleaned = normalise_number(raw);
    if cleaned.is_empty() {
        return Err(LeasingError::invalid_input(field, "a value is required"));
    }
    Decimal::from_str(&cleaned)
        .map_err(|_| LeasingError::invalid_input(field, format!("'{}' is not a number", raw.trim())))
}

fn parse_term(raw: &str) -> LeasingResult<u32> {
    let cleaned = normalise_number(raw);
    if cleaned.is_empty() {
        return Err(LeasingError::InvalidTerm("term is required".into()));
    }
    let value = Decimal::from_str(&cleaned).map_err(|_| {
        LeasingError::InvalidTerm(format!("'{}' is not a number of months", raw.trim()))
    })?;
    if !value.fract().is_zero() {
        return Err(LeasingError::InvalidTerm(format!(
            "{value} is not a whole number of months"
        )));
    }
    match value.to_u32() {
        Some(months) if months > 0 => Ok(months),
        _ => Err(LeasingError::InvalidTerm(format!(
            "{value} is not a positive number of months"
        ))),
    }
}

/// Strip Swiss thousands separators and accept a decimal comma.
fn normalise_number(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(deposit: &str, residual: &str, term: &str, rate: &str) -> LeaseForm {
        LeaseForm {
            deposit: deposit.into(),
            residual_value: residual.into(),
            term_months: term.into(),
            annual_interest_rate_percent: rate.into(),
        }
    }

    #[test]
    fn test_parse_plain_values() {
        let terms = parse_lease_form(dec!(45000), &form("9000", "18000", "48", "5.95")).unwrap();
        assert_eq!(terms.deposit, dec!(9000));
        assert_eq!(terms.residual_value, dec!(18000));
        assert_eq!(terms.term_months, 48);
        assert_eq!(terms.annual_interest_rate_percent, dec!(5.95));
    }

    #[test]
    fn test_parse_swiss_notation() {
        let terms =
            parse_lease_form(dec!(45000), &form("9\u{2019}000", "18'000.50", " 36 ", "5,95")).unwrap();
        assert_eq!(terms.deposit, dec!(9000));
        assert_eq!(terms.residual_value, dec!(18000.50));
        assert_eq!(terms.term_months, 36);
        assert_eq!(terms.annual_interest_rate_percent, dec!(5.95));
    }

    #[test]
    fn test_empty_field_names_the_field() {
        match parse_lease_form(dec!(45000), &form("", "18000", "48", "5.95")).unwrap_err() {
            LeasingError::InvalidInput { field, .. } => assert_eq!(field, "deposit"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_rejected() {
        for bad in ["abc", "NaN", "inf", "1e3e"] {
            let err = parse_lease_form(dec!(45000), &form("9000", bad, "48", "5.95")).unwrap_err();
            assert!(
                matches!(err, LeasingError::InvalidInput { .. }),
                "'{bad}' should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_bad_terms_are_invalid_term() {
        for bad in ["0", "-12", "12.5", "", "zwölf"] {
            let err = parse_lease_form(dec!(45000), &form("9000", "18000", bad, "5.95")).unwrap_err();
            assert!(
                matches!(err, LeasingError::InvalidTerm(_)),
                "'{bad}' should be an invalid term, got {err:?}"
            );
        }
    }

    #[test]
    fn test_whole_number_with_decimals_is_accepted() {
        let terms = parse_lease_form(dec!(45000), &form("9000", "18000", "48.0", "5.95")).unwrap();
        assert_eq!(terms.term_months, 48);
    }

    #[test]
    fn test_quote_display() {
        let quote = quote_lease_form(dec!(45000), &form("9000", "18000", "48", "5.95")).unwrap();
        assert_eq!(quote.monthly_payment.amount(), dec!(797.30));
        assert_eq!(quote.display, "CHF 797.30 pro Monat");
    }

    #[test]
    fn test_quote_surfaces_negative_principal() {
        let err = quote_lease_form(dec!(45000), &form("50000", "0", "48", "5.95")).unwrap_err();
        assert!(matches!(err, LeasingError::InvalidTerms { .. }));
    }
}
