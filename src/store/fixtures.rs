//! Bundled demo data.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::trace;

use super::{Repository, Result, StoreError};
use crate::domain::{Inquiry, MailTemplate, Property, Realtor};
use crate::table::TableRecord;

/// A record type with a bundled JSON fixture.
pub trait Fixture: TableRecord + DeserializeOwned + Send + Sync + 'static {
    /// The fixture's JSON text (an array of records).
    const FIXTURE: &'static str;
}

impl Fixture for Property {
    const FIXTURE: &'static str = include_str!("../../fixtures/properties.json");
}

impl Fixture for Realtor {
    const FIXTURE: &'static str = include_str!("../../fixtures/realtors.json");
}

impl Fixture for MailTemplate {
    const FIXTURE: &'static str = include_str!("../../fixtures/mail_templates.json");
}

impl Fixture for Inquiry {
    const FIXTURE: &'static str = include_str!("../../fixtures/inquiries.json");
}

/// Read-only repository over a record type's fixture.
#[derive(Debug)]
pub struct FixtureRepository<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for FixtureRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FixtureRepository<T> {
    /// Create a fixture repository.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Fixture> Repository<T> for FixtureRepository<T> {
    fn load(&self) -> Result<Vec<T>> {
        let rows: Vec<T> = serde_json::from_str(T::FIXTURE)
            .map_err(|e| StoreError::json(format!("fixtures/{}.json", T::TABLE), e))?;
        trace!(table = T::TABLE, count = rows.len(), "Loaded fixture");
        Ok(rows)
    }

    fn save(&self, _rows: &[T]) -> Result<()> {
        Err(StoreError::ReadOnly(format!("fixtures/{}", T::TABLE)))
    }

    fn clear(&self) -> Result<()> {
        Err(StoreError::ReadOnly(format!("fixtures/{}", T::TABLE)))
    }
}
