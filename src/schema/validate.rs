// ABOUTME: Submit-time validation for form values
// Deliberately loose: only the fields a quote desk cannot work without

use super::{FieldId, FormValues};

/// Per-field validation messages. Empty means the record is submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(FieldId, String)>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn message_for(&self, field: FieldId) -> Option<&str> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check the full record. Required fields are organization name, requestor
/// name, and a chosen service type; everything else is optional at this
/// stage (the quote desk follows up for missing detail).
pub fn validate(values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if values.org_name.trim().is_empty() {
        errors.push(FieldId::OrgName, "Organization name is required");
    }
    if values.requestor_name.trim().is_empty() {
        errors.push(FieldId::RequestorName, "Requestor name is required");
    }
    if !values.service_type.is_selected() {
        errors.push(FieldId::ServiceType, "Choose a service type");
    }

    errors
}
