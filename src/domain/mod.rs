//! Domain records and forms.
//!
//! This module holds the four record families the admin manages and the
//! validation rules for the forms that create or edit them.

pub mod forms;
mod types;

pub use forms::{AgentRegistrationForm, FieldError, QuestionForm, Validate};
pub use types::{
    Inquiry, InquiryStatus, MailTemplate, Property, PropertyStatus, Realtor, RealtorStatus,
    StatusCycle, TemplateStatus,
};

/// Next id for a table whose ids look like `<prefix>-<n>`.
///
/// Ids that do not follow the pattern are ignored when finding the maximum.
pub fn next_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let max = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix, max + 1)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Builders shared by tests across the crate.

    use super::*;

    pub fn property(id: &str, title: &str) -> Property {
        let n: u64 = id.trim_start_matches("p-").parse().unwrap_or(1);
        Property {
            id: id.to_string(),
            title: title.to_string(),
            address: format!("{} Main St", n),
            city: "Springfield".to_string(),
            price: 250_000 + n * 1_000,
            bedrooms: 3,
            bathrooms: 2.0,
            area_sqft: 1_400,
            status: PropertyStatus::Active,
            listed_at: "2024-03-01".to_string(),
            views: n * 10,
            inquiries: n % 4,
            realtor_id: Some("r-1".to_string()),
            description: "Bright family home".to_string(),
        }
    }

    pub fn properties(n: usize) -> Vec<Property> {
        (1..=n)
            .map(|i| property(&format!("p-{}", i), &format!("Property {}", i)))
            .collect()
    }

    pub fn realtor(id: &str, name: &str) -> Realtor {
        Realtor {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone: "555-010-0000".to_string(),
            agency: "Northside Homes".to_string(),
            license_no: "LIC-1".to_string(),
            listings: 2,
            status: RealtorStatus::Active,
            joined_at: "2023-09-12".to_string(),
            bio: String::new(),
        }
    }

    pub fn inquiry(id: &str) -> Inquiry {
        Inquiry {
            id: id.to_string(),
            name: "Dana Reyes".to_string(),
            email: "dana@mail.example".to_string(),
            phone: String::new(),
            property_id: Some("p-1".to_string()),
            message: "Is the garden south facing?".to_string(),
            status: InquiryStatus::New,
            received_at: "2024-05-02T09:30:00Z".to_string(),
        }
    }
}
