//! Mutation actions.
//!
//! Every action resolves to an [`ActionResponse`] with the same
//! `{ success, message, data }` shape, whether it worked or not. Failures are
//! reported in the response and logged, never raised.

use std::path::Path;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::{
    next_id, AgentRegistrationForm, FieldError, Inquiry, QuestionForm, Realtor, Validate,
};
use crate::store::Repository;
use crate::table::csv::split_csv_records;
use crate::table::TableRecord;

/// Artificial delay before a CSV import reports back.
pub const DEFAULT_IMPORT_DELAY: Duration = Duration::from_millis(1500);

/// Outcome of a mutation action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse<T> {
    /// Whether the action took effect.
    pub success: bool,
    /// Message suitable for a notification.
    pub message: String,
    /// The resulting record, on success.
    pub data: Option<T>,
    /// Per-field validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl<T> ActionResponse<T> {
    /// A successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed response.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(%message, "Action failed");
        Self {
            success: false,
            message,
            data: None,
            errors: Vec::new(),
        }
    }

    /// A response for input that failed validation.
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        debug!(count = errors.len(), "Validation failed");
        Self {
            success: false,
            message: "Please correct the highlighted fields".to_string(),
            data: None,
            errors,
        }
    }
}

/// Apply a partial update to the record with `id`.
///
/// `patch` holds wire-named fields to overwrite. The id cannot change and
/// unknown fields are rejected; the merged record must still validate.
pub fn update_entity<R>(
    repo: &dyn Repository<R>,
    id: &str,
    patch: Map<String, Value>,
) -> ActionResponse<R>
where
    R: TableRecord + Serialize + DeserializeOwned + Validate,
{
    let mut rows = match repo.load() {
        Ok(rows) => rows,
        Err(e) => return ActionResponse::failed(format!("Could not load {}: {}", R::TABLE, e)),
    };

    let Some(index) = rows.iter().position(|r| r.id() == id) else {
        return ActionResponse::failed(format!("Record not found: {}", id));
    };

    if let Some(new_id) = patch.get("id") {
        if new_id.as_str() != Some(id) {
            return ActionResponse::failed("The id of a record cannot be changed");
        }
    }

    let mut value = match serde_json::to_value(&rows[index]) {
        Ok(value) => value,
        Err(e) => return ActionResponse::failed(format!("Could not encode {}: {}", id, e)),
    };
    let Some(fields) = value.as_object_mut() else {
        return ActionResponse::failed(format!("{} is not an object record", R::TABLE));
    };
    for (key, new_value) in patch {
        if !fields.contains_key(&key) {
            return ActionResponse::failed(format!("Unknown field '{}'", key));
        }
        fields.insert(key, new_value);
    }

    let updated: R = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => return ActionResponse::failed(format!("Invalid value: {}", e)),
    };

    let errors = updated.validate();
    if !errors.is_empty() {
        return ActionResponse::invalid(errors);
    }

    rows[index] = updated.clone();
    if let Err(e) = repo.save(&rows) {
        return ActionResponse::failed(format!("Could not save {}: {}", R::TABLE, e));
    }

    info!(table = R::TABLE, id, "Record updated");
    ActionResponse::ok(format!("Saved {}", id), updated)
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Store a visitor's question as a new inquiry.
pub fn submit_question(repo: &dyn Repository<Inquiry>, form: QuestionForm) -> ActionResponse<Inquiry> {
    let errors = form.validate();
    if !errors.is_empty() {
        return ActionResponse::invalid(errors);
    }

    let mut rows = match repo.load() {
        Ok(rows) => rows,
        Err(e) => return ActionResponse::failed(format!("Could not load inquiries: {}", e)),
    };

    let id = next_id("q", rows.iter().map(|r| r.id.as_str()));
    let inquiry = form.into_inquiry(id, now_timestamp());
    rows.push(inquiry.clone());

    if let Err(e) = repo.save(&rows) {
        return ActionResponse::failed(format!("Could not save inquiry: {}", e));
    }

    info!(id = %inquiry.id, "Question submitted");
    ActionResponse::ok("Thanks! Your question has been sent.", inquiry)
}

/// Store an agent registration as a pending realtor.
pub fn register_agent(
    repo: &dyn Repository<Realtor>,
    form: AgentRegistrationForm,
) -> ActionResponse<Realtor> {
    let errors = form.validate();
    if !errors.is_empty() {
        return ActionResponse::invalid(errors);
    }

    let mut rows = match repo.load() {
        Ok(rows) => rows,
        Err(e) => return ActionResponse::failed(format!("Could not load realtors: {}", e)),
    };

    if rows
        .iter()
        .any(|r| r.email.eq_ignore_ascii_case(form.email.trim()))
    {
        return ActionResponse::invalid(vec![FieldError::new(
            "email",
            "An agent with this email is already registered",
        )]);
    }

    let id = next_id("r", rows.iter().map(|r| r.id.as_str()));
    let realtor = form.into_realtor(id, today());
    rows.push(realtor.clone());

    if let Err(e) = repo.save(&rows) {
        return ActionResponse::failed(format!("Could not save registration: {}", e));
    }

    info!(id = %realtor.id, "Agent registered");
    ActionResponse::ok("Registration received. We'll review it shortly.", realtor)
}

/// Simulated CSV import.
///
/// Waits `delay`, then checks the file's header against `R`'s export header
/// and counts the data records. Nothing is stored.
pub async fn import_csv<R: TableRecord>(path: &Path, delay: Duration) -> ActionResponse<usize> {
    debug!(path = %path.display(), ?delay, "Starting CSV import");
    tokio::time::sleep(delay).await;

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => return ActionResponse::failed(format!("Could not read {}: {}", path.display(), e)),
    };

    let mut records = split_csv_records(&content).into_iter();
    let Some(header) = records.next() else {
        return ActionResponse::failed("The file is empty");
    };
    if header != R::csv_header() {
        return ActionResponse::failed(format!(
            "Unexpected header, expected: {}",
            R::csv_header().join(", ")
        ));
    }

    let width = R::csv_header().len();
    let mut count = 0;
    for (index, record) in records.enumerate() {
        if record.len() != width {
            return ActionResponse::failed(format!(
                "Record {} has {} fields, expected {}",
                index + 1,
                record.len(),
                width
            ));
        }
        count += 1;
    }
    info!(table = R::TABLE, count, "CSV import finished");
    ActionResponse::ok(format!("Imported {} {}", count, R::TABLE), count)
}
