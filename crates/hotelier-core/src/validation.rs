//! Field validation for hotel records.
//!
//! Text fields are trimmed and emails lower-cased before the checks run,
//! so a record that passes is already in its stored form. Every failing
//! field is reported, not just the first one.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::models::hotel::{
    Address, AddressDraft, ContactInfo, ContactInfoDraft, HotelData, HotelDraft, Owner,
    OwnerDraft, Subscription, SubscriptionDraft, SubscriptionPlan, SubscriptionStatus,
    UnknownVariant,
};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s()\-]+$").expect("phone pattern compiles"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Digits, whitespace, `-`, parentheses, with an optional leading `+`.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// A loose `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Absent, or blank after trimming.
    RequiredFieldMissing,
    PatternMismatch,
    InvalidEnumValue,
}

/// One rejected field, addressed by its dotted path (`contactInfo.phone`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: ValidationErrorKind,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", join(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The error reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

/// Validate a candidate record and produce its stored form.
pub fn validate(draft: HotelDraft) -> Result<HotelData, ValidationErrors> {
    let mut checker = Checker::default();

    let name = checker.text("name", draft.name);
    let address = checker.embedded("address", draft.address, check_address);
    let contact_info = checker.embedded("contactInfo", draft.contact_info, check_contact_info);
    let owner = checker.embedded("owner", draft.owner, check_owner);
    let subscription = checker.embedded("subscription", draft.subscription, check_subscription);

    checker.finish(HotelData {
        name,
        address,
        contact_info,
        owner,
        subscription,
    })
}

impl HotelDraft {
    pub fn validate(self) -> Result<HotelData, ValidationErrors> {
        validate(self)
    }
}

fn check_address(c: &mut Checker, draft: AddressDraft) -> Address {
    Address {
        street: c.text("address.street", draft.street),
        city: c.text("address.city", draft.city),
        state: c.text("address.state", draft.state),
        zip_code: c.text("address.zipCode", draft.zip_code),
        country: c.text("address.country", draft.country),
    }
}

fn check_contact_info(c: &mut Checker, draft: ContactInfoDraft) -> ContactInfo {
    ContactInfo {
        phone: c.phone("contactInfo.phone", draft.phone),
        email: c.email("contactInfo.email", draft.email),
        website: c.text("contactInfo.website", draft.website),
    }
}

fn check_owner(c: &mut Checker, draft: OwnerDraft) -> Owner {
    Owner {
        user_id: c.required("owner.userId", draft.user_id, Uuid::nil),
        name: c.text("owner.name", draft.name),
        email: c.email("owner.email", draft.email),
        phone: c.phone("owner.phone", draft.phone),
    }
}

fn check_subscription(c: &mut Checker, draft: SubscriptionDraft) -> Subscription {
    Subscription {
        plan: c.label("subscription.plan", draft.plan, SubscriptionPlan::default),
        start_date: c.required("subscription.startDate", draft.start_date, epoch),
        end_date: c.required("subscription.endDate", draft.end_date, epoch),
        status: c.label("subscription.status", draft.status, SubscriptionStatus::default),
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Collects field errors. Rejected fields get placeholder values that
/// never leave [`Checker::finish`].
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn reject(&mut self, field: &str, kind: ValidationErrorKind, reason: String) {
        self.errors.push(FieldError {
            field: field.to_string(),
            kind,
            reason,
        });
    }

    fn missing(&mut self, field: &str) {
        self.reject(
            field,
            ValidationErrorKind::RequiredFieldMissing,
            "is required".into(),
        );
    }

    fn text(&mut self, field: &str, value: String) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.missing(field);
        }
        trimmed.to_string()
    }

    fn phone(&mut self, field: &str, value: String) -> String {
        let value = self.text(field, value);
        if !value.is_empty() && !is_valid_phone(&value) {
            self.reject(
                field,
                ValidationErrorKind::PatternMismatch,
                format!("'{value}' is not a valid phone number"),
            );
        }
        value
    }

    fn email(&mut self, field: &str, value: String) -> String {
        let value = self.text(field, value).to_lowercase();
        if !value.is_empty() && !is_valid_email(&value) {
            self.reject(
                field,
                ValidationErrorKind::PatternMismatch,
                format!("'{value}' is not a valid email address"),
            );
        }
        value
    }

    fn required<T>(&mut self, field: &str, value: Option<T>, placeholder: fn() -> T) -> T {
        value.unwrap_or_else(|| {
            self.missing(field);
            placeholder()
        })
    }

    /// Closed-set label. Absent means the default; blank is missing.
    fn label<E>(&mut self, field: &str, value: Option<String>, default: fn() -> E) -> E
    where
        E: FromStr<Err = UnknownVariant>,
    {
        let Some(raw) = value else {
            return default();
        };
        if raw.trim().is_empty() {
            self.missing(field);
            return default();
        }
        match raw.parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                self.reject(field, ValidationErrorKind::InvalidEnumValue, err.to_string());
                default()
            }
        }
    }

    /// Check an embedded value. An absent value is reported once, under
    /// its own path, rather than once per inner field.
    fn embedded<D, T>(
        &mut self,
        field: &str,
        draft: Option<D>,
        check: fn(&mut Self, D) -> T,
    ) -> T
    where
        D: Default,
    {
        match draft {
            Some(draft) => check(self, draft),
            None => {
                let mark = self.errors.len();
                let placeholder = check(self, D::default());
                self.errors.truncate(mark);
                self.missing(field);
                placeholder
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
