//! Record types for the admin tables.
//!
//! These mirror the JSON fixtures field for field (camelCase on the wire).
//! Column keys are the wire names, so a persisted layout and a fixture talk
//! about the same fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::table::{Align, CellValue, ColumnDescriptor, TableRecord, Tone};

// ============================================================================
// Statuses
// ============================================================================

/// Listing status of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyStatus {
    #[default]
    Active,
    Pending,
    Sold,
    Draft,
}

impl PropertyStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Sold => "Sold",
            Self::Draft => "Draft",
        }
    }

    /// Colour hint for the status label.
    pub fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::Pending => Tone::Warning,
            Self::Sold => Tone::Danger,
            Self::Draft => Tone::Muted,
        }
    }

    /// The status after this one in the admin's cycle order.
    pub fn next(&self) -> Self {
        match self {
            Self::Draft => Self::Active,
            Self::Active => Self::Pending,
            Self::Pending => Self::Sold,
            Self::Sold => Self::Draft,
        }
    }
}

/// Account status of a realtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RealtorStatus {
    Active,
    #[default]
    Pending,
    Inactive,
}

impl RealtorStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Inactive => "Inactive",
        }
    }

    /// Colour hint for the status label.
    pub fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::Pending => Tone::Warning,
            Self::Inactive => Tone::Muted,
        }
    }

    /// The status after this one in the admin's cycle order.
    pub fn next(&self) -> Self {
        match self {
            Self::Pending => Self::Active,
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Pending,
        }
    }
}

/// Publication status of a mail template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemplateStatus {
    Published,
    #[default]
    Draft,
}

impl TemplateStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Published => "Published",
            Self::Draft => "Draft",
        }
    }

    /// Colour hint for the status label.
    pub fn tone(&self) -> Tone {
        match self {
            Self::Published => Tone::Success,
            Self::Draft => Tone::Muted,
        }
    }

    /// Toggle between published and draft.
    pub fn next(&self) -> Self {
        match self {
            Self::Published => Self::Draft,
            Self::Draft => Self::Published,
        }
    }
}

/// Handling status of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InquiryStatus {
    #[default]
    New,
    InProgress,
    Closed,
}

impl InquiryStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In progress",
            Self::Closed => "Closed",
        }
    }

    /// Colour hint for the status label.
    pub fn tone(&self) -> Tone {
        match self {
            Self::New => Tone::Warning,
            Self::InProgress => Tone::Success,
            Self::Closed => Tone::Muted,
        }
    }

    /// The status after this one in the admin's cycle order.
    pub fn next(&self) -> Self {
        match self {
            Self::New => Self::InProgress,
            Self::InProgress => Self::Closed,
            Self::Closed => Self::New,
        }
    }
}

/// Records whose status the admin can step through.
pub trait StatusCycle {
    /// A patch setting the status to the next one in the cycle.
    fn status_patch(&self) -> Map<String, Value>;
}

macro_rules! status_cycle {
    ($($ty:ty),*) => {
        $(
            impl StatusCycle for $ty {
                fn status_patch(&self) -> Map<String, Value> {
                    let mut patch = Map::new();
                    if let Ok(next) = serde_json::to_value(self.status.next()) {
                        patch.insert("status".to_string(), next);
                    }
                    patch
                }
            }
        )*
    };
}

status_cycle!(Property, Realtor, MailTemplate, Inquiry);

fn status(label: &str, tone: Tone) -> CellValue {
    CellValue::Status {
        label: label.to_string(),
        tone,
    }
}

// ============================================================================
// Property
// ============================================================================

/// A property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub address: String,
    pub city: String,
    /// Asking price in whole dollars.
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    #[serde(default)]
    pub area_sqft: u32,
    pub status: PropertyStatus,
    pub listed_at: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub inquiries: u64,
    #[serde(default)]
    pub realtor_id: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl TableRecord for Property {
    const TABLE: &'static str = "properties";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("title", "Title"),
            ColumnDescriptor::new("address", "Address"),
            ColumnDescriptor::new("city", "City"),
            ColumnDescriptor::new("price", "Price").align(Align::Center),
            ColumnDescriptor::new("bedrooms", "Beds").align(Align::Center),
            ColumnDescriptor::new("bathrooms", "Baths").align(Align::Center),
            ColumnDescriptor::new("areaSqft", "Area").align(Align::Center).hidden(),
            ColumnDescriptor::new("status", "Status").align(Align::Center),
            ColumnDescriptor::new("listedAt", "Listed").align(Align::Center),
            ColumnDescriptor::new("views", "Views").align(Align::Center),
            ColumnDescriptor::new("inquiries", "Inquiries").align(Align::Center),
            ColumnDescriptor::new("realtorId", "Realtor").hidden(),
            ColumnDescriptor::new("description", "Description").hidden(),
        ]
    }

    fn cell(&self, key: &str) -> Option<CellValue> {
        let value = match key {
            "title" => CellValue::Text(self.title.clone()),
            "address" => CellValue::Text(self.address.clone()),
            "city" => CellValue::Plain(self.city.clone()),
            "price" => CellValue::Money(self.price),
            "bedrooms" => CellValue::Number(self.bedrooms as f64),
            "bathrooms" => CellValue::Number(self.bathrooms as f64),
            "areaSqft" => CellValue::Number(self.area_sqft as f64),
            "status" => status(self.status.label(), self.status.tone()),
            "listedAt" => CellValue::Date(self.listed_at.clone()),
            "views" => CellValue::Count(self.views),
            "inquiries" => CellValue::Count(self.inquiries),
            "realtorId" => CellValue::Plain(self.realtor_id.clone().unwrap_or_default()),
            "description" => CellValue::Text(self.description.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn csv_header() -> &'static [&'static str] {
        &[
            "ID",
            "Title",
            "Address",
            "City",
            "Price",
            "Bedrooms",
            "Bathrooms",
            "Area (sq ft)",
            "Status",
            "Listed",
            "Views",
            "Inquiries",
            "Realtor",
            "Description",
        ]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.address.clone(),
            self.city.clone(),
            self.price.to_string(),
            self.bedrooms.to_string(),
            self.bathrooms.to_string(),
            self.area_sqft.to_string(),
            self.status.label().to_string(),
            self.listed_at.clone(),
            self.views.to_string(),
            self.inquiries.to_string(),
            self.realtor_id.clone().unwrap_or_default(),
            self.description.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.title.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.status.label(),
        ]
    }
}

// ============================================================================
// Realtor
// ============================================================================

/// A registered realtor (agent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realtor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub agency: String,
    #[serde(default)]
    pub license_no: String,
    #[serde(default)]
    pub listings: u64,
    pub status: RealtorStatus,
    pub joined_at: String,
    #[serde(default)]
    pub bio: String,
}

impl TableRecord for Realtor {
    const TABLE: &'static str = "realtors";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("email", "Email"),
            ColumnDescriptor::new("phone", "Phone"),
            ColumnDescriptor::new("agency", "Agency"),
            ColumnDescriptor::new("licenseNo", "License").hidden(),
            ColumnDescriptor::new("listings", "Listings").align(Align::Center),
            ColumnDescriptor::new("status", "Status").align(Align::Center),
            ColumnDescriptor::new("joinedAt", "Joined").align(Align::Center),
            ColumnDescriptor::new("bio", "Bio").hidden(),
        ]
    }

    fn cell(&self, key: &str) -> Option<CellValue> {
        let value = match key {
            "name" => CellValue::Text(self.name.clone()),
            "email" => CellValue::Text(self.email.clone()),
            "phone" => CellValue::Plain(self.phone.clone()),
            "agency" => CellValue::Text(self.agency.clone()),
            "licenseNo" => CellValue::Plain(self.license_no.clone()),
            "listings" => CellValue::Count(self.listings),
            "status" => status(self.status.label(), self.status.tone()),
            "joinedAt" => CellValue::Date(self.joined_at.clone()),
            "bio" => CellValue::Text(self.bio.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn csv_header() -> &'static [&'static str] {
        &[
            "ID", "Name", "Email", "Phone", "Agency", "License", "Listings", "Status", "Joined",
        ]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.agency.clone(),
            self.license_no.clone(),
            self.listings.to_string(),
            self.status.label().to_string(),
            self.joined_at.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.agency.as_str(),
            self.status.label(),
        ]
    }
}

// ============================================================================
// Mail template
// ============================================================================

/// An outgoing mail template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailTemplate {
    pub id: String,
    pub name: String,
    pub subject: String,
    #[serde(default)]
    pub category: String,
    pub status: TemplateStatus,
    pub updated_at: String,
    #[serde(default)]
    pub body: String,
}

impl TableRecord for MailTemplate {
    const TABLE: &'static str = "mail_templates";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("subject", "Subject"),
            ColumnDescriptor::new("category", "Category"),
            ColumnDescriptor::new("status", "Status").align(Align::Center),
            ColumnDescriptor::new("updatedAt", "Updated").align(Align::Center),
            ColumnDescriptor::new("body", "Body").hidden(),
        ]
    }

    fn cell(&self, key: &str) -> Option<CellValue> {
        let value = match key {
            "name" => CellValue::Text(self.name.clone()),
            "subject" => CellValue::Text(self.subject.clone()),
            "category" => CellValue::Plain(self.category.clone()),
            "status" => status(self.status.label(), self.status.tone()),
            "updatedAt" => CellValue::Date(self.updated_at.clone()),
            "body" => CellValue::Text(self.body.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn csv_header() -> &'static [&'static str] {
        &["ID", "Name", "Subject", "Category", "Status", "Updated", "Body"]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.subject.clone(),
            self.category.clone(),
            self.status.label().to_string(),
            self.updated_at.clone(),
            self.body.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.subject.as_str(),
            self.category.as_str(),
        ]
    }
}

// ============================================================================
// Inquiry
// ============================================================================

/// A question submitted from the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub property_id: Option<String>,
    pub message: String,
    pub status: InquiryStatus,
    pub received_at: String,
}

impl TableRecord for Inquiry {
    const TABLE: &'static str = "inquiries";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("email", "Email"),
            ColumnDescriptor::new("phone", "Phone"),
            ColumnDescriptor::new("propertyId", "Property").align(Align::Center),
            ColumnDescriptor::new("message", "Message"),
            ColumnDescriptor::new("status", "Status").align(Align::Center),
            ColumnDescriptor::new("receivedAt", "Received").align(Align::Center),
        ]
    }

    fn cell(&self, key: &str) -> Option<CellValue> {
        let value = match key {
            "name" => CellValue::Text(self.name.clone()),
            "email" => CellValue::Text(self.email.clone()),
            "phone" => CellValue::Plain(self.phone.clone()),
            "propertyId" => CellValue::Plain(
                self.property_id
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ),
            "message" => CellValue::Text(self.message.clone()),
            "status" => status(self.status.label(), self.status.tone()),
            "receivedAt" => CellValue::Date(self.received_at.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn csv_header() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Phone", "Property", "Message", "Status", "Received"]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.property_id.clone().unwrap_or_default(),
            self.message.clone(),
            self.status.label().to_string(),
            self.received_at.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.message.as_str(),
            self.status.label(),
        ]
    }

    fn configurable() -> bool {
        false
    }
}
