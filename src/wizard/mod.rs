// ABOUTME: Step wizard state machine for the quote form
// Tracks the current page, clamped navigation, and conditional field visibility

use crate::schema::{FieldId, FormValues, ServiceType};

/// Pages of the quote wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Basics,
    Appointment,
    Contacts,
    Review,
}

impl WizardStep {
    /// All steps in order
    pub fn all() -> &'static [WizardStep] {
        &[Self::Basics, Self::Appointment, Self::Contacts, Self::Review]
    }

    /// 1-indexed step number for display and persistence
    pub fn number(&self) -> u8 {
        match self {
            Self::Basics => 1,
            Self::Appointment => 2,
            Self::Contacts => 3,
            Self::Review => 4,
        }
    }

    pub fn total() -> u8 {
        4
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Basics => "Basics",
            Self::Appointment => "Appointment",
            Self::Contacts => "Contacts",
            Self::Review => "Review",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Basics => "Organization and requestor information",
            Self::Appointment => "Scheduling and location details",
            Self::Contacts => "Day-of contacts and notes",
            Self::Review => "Billing details and confirmation",
        }
    }

    /// Next step, if any. `None` from the final step.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Basics => Some(Self::Appointment),
            Self::Appointment => Some(Self::Contacts),
            Self::Contacts => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Previous step, if any. `None` from the first step.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Basics => None,
            Self::Appointment => Some(Self::Basics),
            Self::Contacts => Some(Self::Appointment),
            Self::Review => Some(Self::Contacts),
        }
    }

    /// Resolve a 1-indexed step number, clamping out-of-range values.
    /// Used when restoring a draft that recorded its page.
    pub fn from_number(number: u8) -> Self {
        match number {
            0 | 1 => Self::Basics,
            2 => Self::Appointment,
            3 => Self::Contacts,
            _ => Self::Review,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Review)
    }
}

/// VRI link fields only apply when the video service is chosen. When another
/// service is selected the fields may hold stale values, but they are void:
/// hidden from display and from submission summaries.
pub fn vri_section_visible(values: &FormValues) -> bool {
    values.service_type == ServiceType::Vri
}

/// Billing contact fields only apply when there is no account on file.
pub fn billing_contact_visible(values: &FormValues) -> bool {
    values.client_id.trim().is_empty()
}

/// The fields presented on `step`, given the live form state. Recomputed on
/// every call - conditional sections read sibling fields, so caching would
/// serve stale answers.
pub fn visible_fields(step: WizardStep, values: &FormValues) -> Vec<FieldId> {
    match step {
        WizardStep::Basics => vec![
            FieldId::OrgName,
            FieldId::HasAccount,
            FieldId::ClientId,
            FieldId::RequestorName,
            FieldId::RequestorEmail,
            FieldId::RequestorPhone,
            FieldId::ServiceType,
        ],
        WizardStep::Appointment => {
            let mut fields = vec![
                FieldId::Timezone,
                FieldId::Date,
                FieldId::Time,
                FieldId::Duration,
                FieldId::Address,
                FieldId::LocationDetails,
                FieldId::Languages,
                FieldId::Preference,
            ];
            if vri_section_visible(values) {
                fields.push(FieldId::VriRlcProvidesLink);
                fields.push(FieldId::VriLink);
            }
            fields
        }
        WizardStep::Contacts => vec![
            FieldId::PointOfContact,
            FieldId::ProviderName,
            FieldId::Comments,
            FieldId::CostCenter,
            FieldId::AltPhone,
        ],
        WizardStep::Review => {
            let mut fields = Vec::new();
            if billing_contact_visible(values) {
                fields.push(FieldId::BillingContactName);
                fields.push(FieldId::BillingAddress);
                fields.push(FieldId::BillingPhone);
                fields.push(FieldId::BillingEmail);
            }
            fields
        }
    }
}

/// Wizard position with clamped transitions. Advancing past the last step or
/// regressing below the first is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardPosition {
    step: WizardStep,
}

impl Default for WizardPosition {
    fn default() -> Self {
        Self { step: WizardStep::Basics }
    }
}

impl WizardPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(step: WizardStep) -> Self {
        Self { step }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
    }

    pub fn go_back(&mut self) {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
    }

    /// Direct jump used when restoring a draft; clamps to the valid range.
    pub fn goto(&mut self, number: u8) {
        self.step = WizardStep::from_number(number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldValue;

    #[test]
    fn test_step_navigation() {
        assert_eq!(WizardStep::Basics.next(), Some(WizardStep::Appointment));
        assert_eq!(WizardStep::Basics.previous(), None);
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Review.previous(), Some(WizardStep::Contacts));
    }

    #[test]
    fn test_advance_clamps_at_final_step() {
        let mut position = WizardPosition::new();
        for _ in 0..10 {
            position.advance();
        }
        assert_eq!(position.step(), WizardStep::Review);
        assert_eq!(position.step().number(), 4);
    }

    #[test]
    fn test_go_back_clamps_at_first_step() {
        let mut position = WizardPosition::at(WizardStep::Review);
        for _ in 0..10 {
            position.go_back();
        }
        assert_eq!(position.step(), WizardStep::Basics);
        assert_eq!(position.step().number(), 1);
    }

    #[test]
    fn test_goto_clamps_out_of_range() {
        let mut position = WizardPosition::new();
        position.goto(99);
        assert_eq!(position.step(), WizardStep::Review);
        position.goto(0);
        assert_eq!(position.step(), WizardStep::Basics);
        position.goto(2);
        assert_eq!(position.step(), WizardStep::Appointment);
    }

    #[test]
    fn test_step_numbers_round_trip() {
        for step in WizardStep::all() {
            assert_eq!(WizardStep::from_number(step.number()), *step);
        }
        assert_eq!(WizardStep::total(), 4);
    }

    #[test]
    fn test_vri_section_follows_service_type() {
        let mut values = FormValues::defaults();
        assert!(!vri_section_visible(&values));
        let fields = visible_fields(WizardStep::Appointment, &values);
        assert!(!fields.contains(&FieldId::VriLink));

        values.set(FieldId::ServiceType, FieldValue::Text("vri".into()));
        assert!(vri_section_visible(&values));
        let fields = visible_fields(WizardStep::Appointment, &values);
        assert!(fields.contains(&FieldId::VriLink));
        assert!(fields.contains(&FieldId::VriRlcProvidesLink));

        // Switching away hides the section again even though the link value
        // may still be set
        values.set(FieldId::ServiceType, FieldValue::Text("onsite".into()));
        assert!(!vri_section_visible(&values));
    }

    #[test]
    fn test_billing_contact_hidden_with_client_id() {
        let mut values = FormValues::defaults();
        assert!(billing_contact_visible(&values));
        assert!(visible_fields(WizardStep::Review, &values).contains(&FieldId::BillingContactName));

        values.client_id = "RLC-0042".to_string();
        assert!(!billing_contact_visible(&values));
        assert!(visible_fields(WizardStep::Review, &values).is_empty());
    }
}
