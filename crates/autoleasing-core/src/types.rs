use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Amounts in Swiss francs. Decimal keeps Rappen exact.
pub type Money = Decimal;

/// Fractions (0.20 = 20%), used for ratios and the monthly rate.
pub type Rate = Decimal;

/// Percentages as quoted to customers (5.95 = 5.95%).
pub type Percent = Decimal;

/// Every price in the shop is quoted in francs.
pub const CURRENCY: &str = "CHF";

/// Smallest coin in circulation.
pub const FIVE_RAPPEN: Money = dec!(0.05);

/// Result of a calculation together with what went into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// The inputs, echoed back as JSON
    pub assumptions: serde_json::Value,
    /// Non-fatal remarks about unusual inputs
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub currency: String,
    /// Increment the final amount is rounded to
    pub rounding_increment: Money,
}

/// Wrap `result` in the envelope, timing from `started`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> ComputationOutput<T> {
    let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed,
            currency: CURRENCY.to_string(),
            rounding_increment: FIVE_RAPPEN,
        },
    }
}
