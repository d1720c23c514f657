//! Leasing instalment calculation.
//!
//! One calculator shared by the listing cards, the detail page price card and
//! the interactive leasing form. The text boundary in [`form`] turns raw
//! field values into typed [`calculator::LeaseTerms`].

pub mod calculator;
pub mod defaults;
pub mod form;

pub use calculator::{
    calculate_lease_payment, compute_monthly_payment, compute_payment_breakdown,
    round_to_five_rappen, round_to_increment, LeaseTerms, MonthlyPayment, PaymentBreakdown,
};
pub use defaults::LeaseDefaults;
pub use form::{parse_lease_form, quote_lease_form, LeaseForm, LeaseQuote};
