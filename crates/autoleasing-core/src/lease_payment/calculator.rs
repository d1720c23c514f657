//! Monthly leasing instalment.
//!
//! The financed principal (price less deposit less residual value) is
//! amortised as an annuity at the nominal monthly rate. The residual value
//! is not charged interest; it is spread evenly over the term and added to
//! the annuity. The sum is rounded to the nearest 5 Rappen.

use std::fmt;
use std::time::Instant;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LeasingError;
use crate::format::format_chf;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate, FIVE_RAPPEN};
use crate::LeasingResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);
const LONG_TERM_WARNING_MONTHS: u32 = 84;
const HIGH_RESIDUAL_RATIO: Decimal = dec!(0.5);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Leasing terms for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseTerms {
    /// Cash price of the vehicle
    pub price: Money,
    /// Upfront payment
    pub deposit: Money,
    /// Value assumed at contract end
    pub residual_value: Money,
    /// Contract duration in months
    pub term_months: u32,
    /// Nominal annual rate as a percentage (5.95 = 5.95%)
    pub annual_interest_rate_percent: Percent,
}

impl LeaseTerms {
    /// Build terms from floating point values, e.g. coming from a JS caller.
    ///
    /// NaN and infinities are rejected rather than carried into the result.
    pub fn from_f64(
        price: f64,
        deposit: f64,
        residual_value: f64,
        term_months: u32,
        annual_interest_rate_percent: f64,
    ) -> LeasingResult<Self> {
        Ok(LeaseTerms {
            price: decimal_from_f64("price", price)?,
            deposit: decimal_from_f64("deposit", deposit)?,
            residual_value: decimal_from_f64("residual_value", residual_value)?,
            term_months,
            annual_interest_rate_percent: decimal_from_f64(
                "annual_interest_rate_percent",
                annual_interest_rate_percent,
            )?,
        })
    }

    /// Amount financed through the annuity.
    pub fn principal(&self) -> Money {
        self.price - self.deposit - self.residual_value
    }

    /// Nominal monthly rate as a fraction.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_interest_rate_percent / PERCENT / MONTHS_PER_YEAR
    }
}

fn decimal_from_f64(field: &str, value: f64) -> LeasingResult<Decimal> {
    if !value.is_finite() {
        return Err(LeasingError::invalid_terms(field, "must be a finite number"));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| LeasingError::invalid_terms(field, format!("{value} is out of range")))
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Monthly instalment, always a multiple of CHF 0.05.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyPayment(Money);

impl MonthlyPayment {
    pub fn amount(&self) -> Money {
        self.0
    }
}

impl From<MonthlyPayment> for Decimal {
    fn from(payment: MonthlyPayment) -> Self {
        payment.0
    }
}

impl fmt::Display for MonthlyPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_chf(self.0, 2))
    }
}

/// Intermediate values of the instalment calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Price less deposit less residual value
    pub principal: Money,
    /// Nominal monthly rate as a fraction
    pub monthly_rate: Rate,
    /// (1 + monthly rate) ^ term
    pub growth_factor: Decimal,
    /// Fixed payment amortising the principal
    pub annuity: Money,
    /// Residual value divided by the term
    pub residual_component: Money,
    /// Unrounded instalment
    pub raw_monthly_payment: Money,
    /// Instalment rounded to 5 Rappen
    pub monthly_payment: MonthlyPayment,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly instalment for the given terms, rounded to 5 Rappen.
pub fn compute_monthly_payment(terms: &LeaseTerms) -> LeasingResult<MonthlyPayment> {
    compute_payment_breakdown(terms).map(|b| b.monthly_payment)
}

/// Monthly instalment together with every intermediate value.
pub fn compute_payment_breakdown(terms: &LeaseTerms) -> LeasingResult<PaymentBreakdown> {
    validate_terms(terms)?;

    let n = Decimal::from(terms.term_months);
    let principal = terms.principal();
    let monthly_rate = terms.monthly_rate();
    let growth_factor = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(terms.term_months))
        .ok_or_else(|| {
            LeasingError::invalid_terms("term_months", "growth factor exceeds decimal range")
        })?;
    let residual_component = terms.residual_value / n;

    // A rate too small to move the growth factor is interest-free.
    let growth = growth_factor - Decimal::ONE;
    let (annuity, raw_monthly_payment) = if monthly_rate.is_zero() || growth.is_zero() {
        // Single division keeps (price - deposit) / term exact.
        (principal / n, (principal + terms.residual_value) / n)
    } else {
        let annuity = monthly_rate
            .checked_mul(growth_factor)
            .and_then(|f| principal.checked_mul(f))
            .and_then(|v| v.checked_div(growth))
            .ok_or_else(|| {
                LeasingError::invalid_terms("price", "annuity exceeds decimal range")
            })?;
        let raw = annuity.checked_add(residual_component).ok_or_else(|| {
            LeasingError::invalid_terms("residual_value", "instalment exceeds decimal range")
        })?;
        (annuity, raw)
    };

    let monthly_payment = round_to_five_rappen(raw_monthly_payment)
        .map(MonthlyPayment)
        .ok_or_else(|| {
            LeasingError::invalid_terms("price", "instalment exceeds decimal range")
        })?;

    Ok(PaymentBreakdown {
        principal,
        monthly_rate,
        growth_factor,
        annuity,
        residual_component,
        raw_monthly_payment,
        monthly_payment,
    })
}

/// Instalment breakdown wrapped in the standard computation envelope.
pub fn calculate_lease_payment(
    terms: &LeaseTerms,
) -> LeasingResult<ComputationOutput<PaymentBreakdown>> {
    let start = Instant::now();
    let breakdown = compute_payment_breakdown(terms)?;

    let mut warnings: Vec<String> = Vec::new();
    if terms.term_months > LONG_TERM_WARNING_MONTHS {
        warnings.push(format!(
            "Term of {} months is longer than the usual {} month maximum",
            terms.term_months, LONG_TERM_WARNING_MONTHS
        ));
    }
    if !terms.price.is_zero() && terms.residual_value / terms.price > HIGH_RESIDUAL_RATIO {
        warnings.push(format!(
            "Residual value {} is more than half of the price {}",
            terms.residual_value, terms.price
        ));
    }

    Ok(with_metadata(
        "Annuity on financed principal plus straight-line residual, rounded to CHF 0.05",
        terms,
        warnings,
        start,
        breakdown,
    ))
}

/// Round to the nearest multiple of `increment`, halves away from zero.
///
/// A non-positive increment returns the value unchanged. `None` when
/// `value / increment` leaves the decimal range.
pub fn round_to_increment(value: Decimal, increment: Decimal) -> Option<Decimal> {
    if increment <= Decimal::ZERO {
        return Some(value);
    }
    let mut rounded = value
        .checked_div(increment)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(increment)?;
    rounded.rescale(increment.scale());
    Some(rounded)
}

/// Round to the nearest 0.05, the smallest Swiss coin.
pub fn round_to_five_rappen(value: Decimal) -> Option<Decimal> {
    round_to_increment(value, FIVE_RAPPEN)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_terms(terms: &LeaseTerms) -> LeasingResult<()> {
    if terms.term_months == 0 {
        return Err(LeasingError::InvalidTerm(
            "term must be at least one month".into(),
        ));
    }
    for (field, value) in [
        ("price", terms.price),
        ("deposit", terms.deposit),
        ("residual_value", terms.residual_value),
    ] {
        if value < Decimal::ZERO {
            return Err(LeasingError::invalid_terms(field, "must not be negative"));
        }
    }
    if terms.annual_interest_rate_percent < Decimal::ZERO {
        return Err(LeasingError::invalid_terms(
            "annual_interest_rate_percent",
            "must not be negative",
        ));
    }
    let committed = terms.deposit.checked_add(terms.residual_value);
    if committed.map_or(true, |c| c > terms.price) {
        return Err(LeasingError::invalid_terms(
            "principal",
            format!(
                "deposit {} plus residual value {} exceed price {}",
                terms.deposit, terms.residual_value, terms.price
            ),
        ));
    }
    Ok(())
}
