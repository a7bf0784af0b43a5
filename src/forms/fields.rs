//! The form session: one mapping of field name to value, scoped to a single
//! workflow instance. The field set for each workflow is fixed and known in
//! advance; handlers mutate values, never the schema.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::attachment::FileCandidate;
use super::validators::{has_entries, required_text};

/// Value held by one named form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Items(Vec<String>),
    Date(NaiveDate),
    File(FileCandidate),
    Flag(bool),
}

/// Field-name to value mapping owned by the active workflow instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSession {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.fields
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_items(&mut self, name: &str, items: Vec<String>) {
        self.fields
            .insert(name.to_string(), FieldValue::Items(items));
    }

    pub fn set_date(&mut self, name: &str, date: NaiveDate) {
        self.fields.insert(name.to_string(), FieldValue::Date(date));
    }

    pub fn set_file(&mut self, name: &str, file: FileCandidate) {
        self.fields.insert(name.to_string(), FieldValue::File(file));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.fields
            .insert(name.to_string(), FieldValue::Flag(value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn items(&self, name: &str) -> Option<&[String]> {
        match self.fields.get(name) {
            Some(FieldValue::Items(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.fields.get(name) {
            Some(FieldValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    pub fn file(&self, name: &str) -> Option<&FileCandidate> {
        match self.fields.get(name) {
            Some(FieldValue::File(file)) => Some(file),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(FieldValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    /// Whether a field counts as filled for required-field gating: text
    /// must be non-blank, lists must hold a non-blank entry, flags must be
    /// set, dates and files need only be present. A missing field never
    /// satisfies a requirement.
    pub fn is_satisfied(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(FieldValue::Text(value)) => required_text(value),
            Some(FieldValue::Items(items)) => has_entries(items),
            Some(FieldValue::Date(_)) | Some(FieldValue::File(_)) => true,
            Some(FieldValue::Flag(value)) => *value,
            None => false,
        }
    }

    /// Discard every captured value; used once a submission succeeds.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
