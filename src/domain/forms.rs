//! Form validation for the public intake flows and admin edits.
//!
//! Validation failures are not errors in the system sense: they are returned
//! as a list of per-field messages for the caller to show next to the field.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Inquiry, InquiryStatus, Property, Realtor, RealtorStatus};
use super::MailTemplate;

/// Minimum length of a submitted question.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// A validation message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: String,
    /// Human readable message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Something that can check its own fields.
pub trait Validate {
    /// Return every failing field, or an empty list.
    fn validate(&self) -> Vec<FieldError>;

    /// Whether there are no failing fields.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    }
}

fn check_email(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, "Email is required"));
        return;
    }
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if !valid {
        errors.push(FieldError::new(
            field,
            format!("'{}' does not appear to be a valid email address", value),
        ));
    }
}

fn check_phone(errors: &mut Vec<FieldError>, field: &str, value: &str, required: bool) {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.push(FieldError::new(field, "Phone is required"));
        }
        return;
    }
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !allowed || digits < MIN_PHONE_DIGITS {
        errors.push(FieldError::new(
            field,
            format!("Phone must contain at least {} digits", MIN_PHONE_DIGITS),
        ));
    }
}

// ============================================================================
// Public forms
// ============================================================================

/// A question submitted by a site visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub property_id: Option<String>,
    pub message: String,
}

impl Validate for QuestionForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Name");
        check_email(&mut errors, "email", &self.email);
        check_phone(&mut errors, "phone", &self.phone, false);
        if self.message.trim().chars().count() < MIN_MESSAGE_LEN {
            errors.push(FieldError::new(
                "message",
                format!("Message must be at least {} characters", MIN_MESSAGE_LEN),
            ));
        }
        errors
    }
}

impl QuestionForm {
    /// Turn a valid form into a new inquiry.
    pub fn into_inquiry(self, id: String, received_at: String) -> Inquiry {
        Inquiry {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            property_id: self.property_id.filter(|p| !p.trim().is_empty()),
            message: self.message.trim().to_string(),
            status: InquiryStatus::New,
            received_at,
        }
    }
}

/// A realtor signing up from the public site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub agency: String,
    pub license_no: String,
    #[serde(default)]
    pub bio: String,
}

impl Validate for AgentRegistrationForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Name");
        check_email(&mut errors, "email", &self.email);
        check_phone(&mut errors, "phone", &self.phone, true);
        require(&mut errors, "agency", &self.agency, "Agency");
        require(&mut errors, "licenseNo", &self.license_no, "License number");
        errors
    }
}

impl AgentRegistrationForm {
    /// Turn a valid form into a realtor awaiting approval.
    pub fn into_realtor(self, id: String, joined_at: String) -> Realtor {
        Realtor {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            agency: self.agency.trim().to_string(),
            license_no: self.license_no.trim().to_string(),
            listings: 0,
            status: RealtorStatus::Pending,
            joined_at,
            bio: self.bio.trim().to_string(),
        }
    }
}

// ============================================================================
// Admin records
// ============================================================================

impl Validate for Property {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title, "Title");
        require(&mut errors, "address", &self.address, "Address");
        require(&mut errors, "city", &self.city, "City");
        if self.price == 0 {
            errors.push(FieldError::new("price", "Price must be greater than zero"));
        }
        if !self.bathrooms.is_finite() || self.bathrooms < 0.0 {
            errors.push(FieldError::new("bathrooms", "Bathrooms must be zero or more"));
        }
        errors
    }
}

impl Validate for Realtor {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Name");
        check_email(&mut errors, "email", &self.email);
        check_phone(&mut errors, "phone", &self.phone, true);
        require(&mut errors, "agency", &self.agency, "Agency");
        errors
    }
}

impl Validate for MailTemplate {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Name");
        require(&mut errors, "subject", &self.subject, "Subject");
        errors
    }
}

impl Validate for Inquiry {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Name");
        check_email(&mut errors, "email", &self.email);
        errors
    }
}
