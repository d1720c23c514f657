//! Customer enquiries from the detail page: offer request, leasing request
//! and test drive booking.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LeasingError;
use crate::lease_payment::{compute_monthly_payment, LeaseTerms, MonthlyPayment};
use crate::LeasingResult;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\+?[0-9 ()/-]{6,20}$").unwrap();
}

const TEST_DRIVE_NOTE: &str = "Der Termin muss noch von uns bestätigt werden.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnquiryKind {
    /// Purchase or general offer request
    Offer,
    Leasing,
    TestDrive,
}

impl EnquiryKind {
    pub fn title(&self) -> &'static str {
        match self {
            EnquiryKind::Offer => "Anfrage / Angebot",
            EnquiryKind::Leasing => "Anfrage zum Leasing",
            EnquiryKind::TestDrive => "Probefahrt anfragen",
        }
    }

    fn confirmation(&self) -> &'static str {
        match self {
            EnquiryKind::Offer => {
                "Vielen Dank für Ihre Anfrage! Wir werden uns in Kürze bei Ihnen melden."
            }
            EnquiryKind::Leasing => {
                "Vielen Dank für Ihre Leasinganfrage! Wir werden uns in Kürze bei Ihnen melden."
            }
            EnquiryKind::TestDrive => {
                "Vielen Dank für Ihre Probefahrtanfrage! Wir werden uns in Kürze bei Ihnen melden, um den Termin zu bestätigen."
            }
        }
    }
}

/// Values entered in one of the enquiry dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryForm {
    pub kind: EnquiryKind,
    pub vin: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Test drive only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
    /// Test drive only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<NaiveTime>,
    /// Leasing only: the terms shown in the calculator when sending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_terms: Option<LeaseTerms>,
}

/// Accepted enquiry, ready to be handed to the dealer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryReceipt {
    pub kind: EnquiryKind,
    pub subject: String,
    pub vin: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<MonthlyPayment>,
    /// Thank-you text shown to the customer
    pub confirmation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Validate an enquiry. `today` bounds the earliest test drive date.
pub fn submit_enquiry(form: &EnquiryForm, today: NaiveDate) -> LeasingResult<EnquiryReceipt> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(LeasingError::invalid_input("name", "please enter your name"));
    }
    if form.vin.trim().is_empty() {
        return Err(LeasingError::invalid_input("vin", "no vehicle identifier given"));
    }

    let email = form.email.trim();
    if !EMAIL_PATTERN.is_match(email) {
        return Err(LeasingError::invalid_input(
            "email",
            format!("'{email}' is not an e-mail address"),
        ));
    }

    let phone = non_empty(&form.phone);
    if let Some(ref p) = phone {
        if !PHONE_PATTERN.is_match(p) {
            return Err(LeasingError::invalid_input(
                "phone",
                format!("'{p}' is not a phone number"),
            ));
        }
    }

    let mut receipt = EnquiryReceipt {
        kind: form.kind,
        subject: format!("{}: {}", form.kind.title(), form.vin.trim()),
        vin: form.vin.trim().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone,
        message: non_empty(&form.message),
        preferred_date: None,
        preferred_time: None,
        monthly_payment: None,
        confirmation: form.kind.confirmation().to_string(),
        note: None,
    };

    match form.kind {
        EnquiryKind::Offer => {}
        EnquiryKind::Leasing => {
            let terms = form.lease_terms.as_ref().ok_or_else(|| {
                LeasingError::invalid_input("lease_terms", "required for a leasing enquiry")
            })?;
            receipt.monthly_payment = Some(compute_monthly_payment(terms)?);
        }
        EnquiryKind::TestDrive => {
            let date = form.preferred_date.ok_or_else(|| {
                LeasingError::invalid_input("preferred_date", "please choose a date")
            })?;
            let time = form.preferred_time.ok_or_else(|| {
                LeasingError::invalid_input("preferred_time", "please choose a time")
            })?;
            if date < today {
                return Err(LeasingError::invalid_input(
                    "preferred_date",
                    format!("{date} is in the past"),
                ));
            }
            receipt.preferred_date = Some(date);
            receipt.preferred_time = Some(time);
            receipt.note = Some(TEST_DRIVE_NOTE.to_string());
        }
    }

    Ok(receipt)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form(kind: EnquiryKind) -> EnquiryForm {
        EnquiryForm {
            kind,
            vin: "BMWX32023".into(),
            name: "Anna Muster".into(),
            email: "anna@example.ch".into(),
            phone: Some("+41 79 123 45 67".into()),
            message: Some("  ".into()),
            preferred_date: None,
            preferred_time: None,
            lease_terms: None,
        }
    }

    #[test]
    fn test_offer_enquiry() {
        let receipt = submit_enquiry(&form(EnquiryKind::Offer), today()).unwrap();
        assert_eq!(receipt.subject, "Anfrage / Angebot: BMWX32023");
        assert_eq!(receipt.message, None);
        assert!(receipt.confirmation.starts_with("Vielen Dank für Ihre Anfrage"));
    }

    #[test]
    fn test_leasing_enquiry_carries_rate() {
        let mut f = form(EnquiryKind::Leasing);
        assert!(submit_enquiry(&f, today()).is_err());

        f.lease_terms = Some(LeaseTerms {
            price: dec!(45000),
            deposit: dec!(9000),
            residual_value: dec!(18000),
            term_months: 48,
            annual_interest_rate_percent: dec!(5.95),
        });
        let receipt = submit_enquiry(&f, today()).unwrap();
        assert_eq!(receipt.monthly_payment.map(|p| p.amount()), Some(dec!(797.30)));
    }

    #[test]
    fn test_test_drive_needs_future_slot() {
        let mut f = form(EnquiryKind::TestDrive);
        assert!(submit_enquiry(&f, today()).is_err());

        f.preferred_date = NaiveDate::from_ymd_opt(2024, 5, 31);
        f.preferred_time = NaiveTime::from_hms_opt(10, 30, 0);
        match submit_enquiry(&f, today()).unwrap_err() {
            LeasingError::InvalidInput { field, .. } => assert_eq!(field, "preferred_date"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }

        f.preferred_date = Some(today());
        let receipt = submit_enquiry(&f, today()).unwrap();
        assert_eq!(receipt.note.as_deref(), Some(TEST_DRIVE_NOTE));
    }

    #[test]
    fn test_contact_patterns() {
        assert!(EMAIL_PATTERN.is_match("anna@example.ch"));
        assert!(!EMAIL_PATTERN.is_match("anna@example"));
        assert!(PHONE_PATTERN.is_match("+41 (0)79 123 45 67"));
        assert!(PHONE_PATTERN.is_match("079/123-45-67"));
        assert!(!PHONE_PATTERN.is_match("12345"));
    }

    #[test]
    fn test_contact_validation() {
        let mut f = form(EnquiryKind::Offer);
        f.email = "anna.example.ch".into();
        assert!(submit_enquiry(&f, today()).is_err());

        let mut f = form(EnquiryKind::Offer);
        f.phone = Some("call me".into());
        assert!(submit_enquiry(&f, today()).is_err());

        let mut f = form(EnquiryKind::Offer);
        f.phone = Some(String::new());
        assert_eq!(submit_enquiry(&f, today()).unwrap().phone, None);

        let mut f = form(EnquiryKind::Offer);
        f.name = " ".into();
        assert!(submit_enquiry(&f, today()).is_err());
    }
}
