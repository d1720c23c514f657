//! de-CH presentation helpers.
//!
//! Amounts are rendered the way Swiss browsers render `Intl.NumberFormat`
//! with the `de-CH` locale: a right single quotation mark groups thousands
//! and a full stop separates the fraction.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, CURRENCY};

const GROUP_SEPARATOR: char = '\u{2019}';
const ELLIPSIS: char = '\u{2026}';

/// Format an amount as `CHF 45’000` or `CHF 797.30`.
pub fn format_chf(amount: Money, fraction_digits: u32) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(fraction_digits);

    let text = rounded.to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = format!("{CURRENCY} ");
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(integer));
    if let Some(f) = fraction {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Group an unsigned integer in thousands: `12000` becomes `12’000`.
pub fn format_grouped(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Month and year of a date as shown on listing cards: `05.2023`.
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%m.%Y").to_string()
}

/// Shorten `text` to at most `max` characters, ending in an ellipsis when cut.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push(ELLIPSIS);
    out
}

/// Whole-franc rounding used for form pre-fills and reference prices.
///
/// `None` when the result leaves the decimal range.
pub fn round_to_whole(amount: Money, multiple: Decimal) -> Option<Money> {
    if multiple.is_zero() {
        return Some(amount);
    }
    amount
        .checked_div(multiple)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(multiple)
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
