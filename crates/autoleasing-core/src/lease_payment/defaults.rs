use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LeasingError;
use crate::format::round_to_whole;
use crate::lease_payment::calculator::{compute_monthly_payment, LeaseTerms, MonthlyPayment};
use crate::lease_payment::form::LeaseForm;
use crate::types::{Money, Percent, Rate};
use crate::LeasingResult;

/// Dealership default terms used wherever a rate is shown before the
/// customer has entered anything: 48 months, 20 % deposit, 40 % residual
/// value, nominal 5.95 % p.a.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseDefaults {
    pub term_months: u32,
    /// Deposit as a fraction of the price
    pub deposit_ratio: Rate,
    /// Residual value as a fraction of the price
    pub residual_ratio: Rate,
    pub annual_interest_rate_percent: Percent,
}

impl Default for LeaseDefaults {
    fn default() -> Self {
        LeaseDefaults {
            term_months: 48,
            deposit_ratio: dec!(0.20),
            residual_ratio: dec!(0.40),
            annual_interest_rate_percent: dec!(5.95),
        }
    }
}

impl LeaseDefaults {
    /// Terms for the "from CHF .../month" teaser on cards and price boxes.
    pub fn terms_for(&self, price: Money) -> LeasingResult<LeaseTerms> {
        Ok(LeaseTerms {
            price,
            deposit: share_of(price, self.deposit_ratio, "deposit")?,
            residual_value: share_of(price, self.residual_ratio, "residual_value")?,
            term_months: self.term_months,
            annual_interest_rate_percent: self.annual_interest_rate_percent,
        })
    }

    /// Teaser instalment for a price.
    pub fn monthly_payment_for(&self, price: Money) -> LeasingResult<MonthlyPayment> {
        compute_monthly_payment(&self.terms_for(price)?)
    }

    /// Pre-filled interactive form. Deposit and residual are whole francs.
    pub fn form_for(&self, price: Money) -> LeasingResult<LeaseForm> {
        let terms = self.terms_for(price)?;
        let deposit = whole_francs(terms.deposit, "deposit")?;
        let residual = whole_francs(terms.residual_value, "residual_value")?;
        Ok(LeaseForm {
            deposit: deposit.normalize().to_string(),
            residual_value: residual.normalize().to_string(),
            term_months: self.term_months.to_string(),
            annual_interest_rate_percent: self.annual_interest_rate_percent.normalize().to_string(),
        })
    }
}

fn share_of(price: Money, ratio: Rate, field: &str) -> LeasingResult<Money> {
    price.checked_mul(ratio).ok_or_else(|| {
        LeasingError::invalid_terms(field, format!("{ratio} of {price} exceeds decimal range"))
    })
}

fn whole_francs(amount: Money, field: &str) -> LeasingResult<Money> {
    round_to_whole(amount, Decimal::ONE)
        .ok_or_else(|| LeasingError::invalid_terms(field, "exceeds decimal range"))
}
