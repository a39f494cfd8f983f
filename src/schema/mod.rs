// ABOUTME: Field schema for the quote request form - field ids, typed values,
// defaults, and the service type enum shared by every other module

use serde::{Deserialize, Serialize};

pub mod options;
pub mod validate;

pub use validate::{validate, ValidationErrors};

/// Interpretation service being requested.
///
/// `Unselected` is distinct from every concrete service: conditional form
/// sections referencing the service stay hidden and submission validation
/// rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceType {
    /// Over-the-phone interpretation
    Otp,
    /// Video remote interpretation
    Vri,
    /// Interpreter on location
    Onsite,
    /// Not yet chosen
    #[default]
    Unselected,
}

impl ServiceType {
    /// Parse the wire spelling. Common aliases are accepted; anything
    /// unrecognized maps to `Unselected`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "otp" | "phone" => Self::Otp,
            "vri" | "video" => Self::Vri,
            "onsite" | "on-site" => Self::Onsite,
            _ => Self::Unselected,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Otp => "otp",
            Self::Vri => "vri",
            Self::Onsite => "onsite",
            Self::Unselected => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Otp => "Over-the-Phone",
            Self::Vri => "Video (VRI)",
            Self::Onsite => "Onsite",
            Self::Unselected => "Not selected",
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Self::Unselected)
    }

    /// All selectable services, in the order the form presents them.
    pub fn all() -> &'static [ServiceType] {
        &[Self::Otp, Self::Vri, Self::Onsite]
    }
}

impl Serialize for ServiceType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ServiceType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// Every field the form declares, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    OrgName,
    HasAccount,
    ClientId,
    RequestorName,
    RequestorEmail,
    RequestorPhone,
    ServiceType,
    Timezone,
    Date,
    Time,
    Duration,
    Address,
    LocationDetails,
    Languages,
    Preference,
    VriRlcProvidesLink,
    VriLink,
    PointOfContact,
    ProviderName,
    Comments,
    CostCenter,
    AltPhone,
    BillingAddress,
    BillingContactName,
    BillingPhone,
    BillingEmail,
}

/// Shape of the value a field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    List,
    Service,
}

impl FieldId {
    pub const ALL: [FieldId; 26] = [
        Self::OrgName,
        Self::HasAccount,
        Self::ClientId,
        Self::RequestorName,
        Self::RequestorEmail,
        Self::RequestorPhone,
        Self::ServiceType,
        Self::Timezone,
        Self::Date,
        Self::Time,
        Self::Duration,
        Self::Address,
        Self::LocationDetails,
        Self::Languages,
        Self::Preference,
        Self::VriRlcProvidesLink,
        Self::VriLink,
        Self::PointOfContact,
        Self::ProviderName,
        Self::Comments,
        Self::CostCenter,
        Self::AltPhone,
        Self::BillingAddress,
        Self::BillingContactName,
        Self::BillingPhone,
        Self::BillingEmail,
    ];

    /// Wire name used by the AI backend and persisted drafts.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::OrgName => "orgName",
            Self::HasAccount => "hasAccount",
            Self::ClientId => "clientId",
            Self::RequestorName => "requestorName",
            Self::RequestorEmail => "requestorEmail",
            Self::RequestorPhone => "requestorPhone",
            Self::ServiceType => "serviceType",
            Self::Timezone => "timezone",
            Self::Date => "date",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::Address => "address",
            Self::LocationDetails => "locationDetails",
            Self::Languages => "languages",
            Self::Preference => "preference",
            Self::VriRlcProvidesLink => "vriRLCProvidesLink",
            Self::VriLink => "vriLink",
            Self::PointOfContact => "pointOfContact",
            Self::ProviderName => "providerName",
            Self::Comments => "comments",
            Self::CostCenter => "costCenter",
            Self::AltPhone => "altPhone",
            Self::BillingAddress => "billingAddress",
            Self::BillingContactName => "billingContactName",
            Self::BillingPhone => "billingPhone",
            Self::BillingEmail => "billingEmail",
        }
    }

    /// Resolve a wire name back to a field id. Unknown names return `None`
    /// so callers can drop them silently.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.wire_name() == name)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::HasAccount | Self::VriRlcProvidesLink => FieldKind::Flag,
            Self::Languages => FieldKind::List,
            Self::ServiceType => FieldKind::Service,
            _ => FieldKind::Text,
        }
    }

    /// Human-facing label, used by the UI and validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrgName => "Organization name",
            Self::HasAccount => "Existing account",
            Self::ClientId => "Client ID",
            Self::RequestorName => "Requestor name",
            Self::RequestorEmail => "Requestor email",
            Self::RequestorPhone => "Requestor phone",
            Self::ServiceType => "Service type",
            Self::Timezone => "Timezone",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Duration => "Duration (hours)",
            Self::Address => "Address",
            Self::LocationDetails => "Location details",
            Self::Languages => "Languages",
            Self::Preference => "Interpreter preference",
            Self::VriRlcProvidesLink => "We provide the video link",
            Self::VriLink => "Video meeting link",
            Self::PointOfContact => "Point of contact",
            Self::ProviderName => "Provider name",
            Self::Comments => "Comments",
            Self::CostCenter => "Cost center",
            Self::AltPhone => "Alternate phone",
            Self::BillingAddress => "Billing address",
            Self::BillingContactName => "Billing contact name",
            Self::BillingPhone => "Billing phone",
            Self::BillingEmail => "Billing email",
        }
    }
}

/// A single field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty means "the user has not filled this in": blank text, an empty
    /// list. Flags are never empty - false is a real answer.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Flag(_) => false,
            Self::List(items) => items.is_empty(),
        }
    }

    /// Display rendering for summaries and the review page.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Flag(b) => if *b { "Yes" } else { "No" }.to_string(),
            Self::List(items) => items.join(", "),
        }
    }
}

fn default_true() -> bool {
    true
}

/// The complete user-entered state for one quote request.
///
/// Every declared field is always present; `#[serde(default)]` on each field
/// means a draft written by an older build deserializes with defaults for
/// fields it predates instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub org_name: String,
    pub has_account: bool,
    pub client_id: String,

    pub requestor_name: String,
    pub requestor_email: String,
    pub requestor_phone: String,

    pub service_type: ServiceType,

    pub timezone: String,
    pub date: String,
    pub time: String,
    pub duration: String,

    pub address: String,
    pub location_details: String,

    pub languages: Vec<String>,
    pub preference: String,

    #[serde(rename = "vriRLCProvidesLink", default = "default_true")]
    pub vri_rlc_provides_link: bool,
    pub vri_link: String,

    pub point_of_contact: String,
    pub provider_name: String,

    pub comments: String,
    pub cost_center: String,
    pub alt_phone: String,

    pub billing_address: String,
    pub billing_contact_name: String,
    pub billing_phone: String,
    pub billing_email: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            org_name: String::new(),
            has_account: false,
            client_id: String::new(),
            requestor_name: String::new(),
            requestor_email: String::new(),
            requestor_phone: String::new(),
            service_type: ServiceType::Unselected,
            timezone: String::new(),
            date: String::new(),
            time: String::new(),
            duration: String::new(),
            address: String::new(),
            location_details: String::new(),
            languages: Vec::new(),
            preference: String::new(),
            vri_rlc_provides_link: true,
            vri_link: String::new(),
            point_of_contact: String::new(),
            provider_name: String::new(),
            comments: String::new(),
            cost_center: String::new(),
            alt_phone: String::new(),
            billing_address: String::new(),
            billing_contact_name: String::new(),
            billing_phone: String::new(),
            billing_email: String::new(),
        }
    }
}

/// Split a comma-delimited language string, trimming entries and dropping
/// empties.
pub fn split_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn coerce_flag(value: &FieldValue) -> bool {
    match value {
        FieldValue::Flag(b) => *b,
        FieldValue::Text(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        FieldValue::List(items) => !items.is_empty(),
    }
}

fn coerce_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Flag(b) => b.to_string(),
        FieldValue::List(items) => items.join(", "),
    }
}

fn coerce_list(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(items) => items.clone(),
        FieldValue::Text(s) => split_languages(s),
        FieldValue::Flag(b) => vec![b.to_string()],
    }
}

impl FormValues {
    /// Canonical all-fields-present, all-unset record.
    pub fn defaults() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::OrgName => FieldValue::Text(self.org_name.clone()),
            FieldId::HasAccount => FieldValue::Flag(self.has_account),
            FieldId::ClientId => FieldValue::Text(self.client_id.clone()),
            FieldId::RequestorName => FieldValue::Text(self.requestor_name.clone()),
            FieldId::RequestorEmail => FieldValue::Text(self.requestor_email.clone()),
            FieldId::RequestorPhone => FieldValue::Text(self.requestor_phone.clone()),
            FieldId::ServiceType => FieldValue::Text(self.service_type.as_wire().to_string()),
            FieldId::Timezone => FieldValue::Text(self.timezone.clone()),
            FieldId::Date => FieldValue::Text(self.date.clone()),
            FieldId::Time => FieldValue::Text(self.time.clone()),
            FieldId::Duration => FieldValue::Text(self.duration.clone()),
            FieldId::Address => FieldValue::Text(self.address.clone()),
            FieldId::LocationDetails => FieldValue::Text(self.location_details.clone()),
            FieldId::Languages => FieldValue::List(self.languages.clone()),
            FieldId::Preference => FieldValue::Text(self.preference.clone()),
            FieldId::VriRlcProvidesLink => FieldValue::Flag(self.vri_rlc_provides_link),
            FieldId::VriLink => FieldValue::Text(self.vri_link.clone()),
            FieldId::PointOfContact => FieldValue::Text(self.point_of_contact.clone()),
            FieldId::ProviderName => FieldValue::Text(self.provider_name.clone()),
            FieldId::Comments => FieldValue::Text(self.comments.clone()),
            FieldId::CostCenter => FieldValue::Text(self.cost_center.clone()),
            FieldId::AltPhone => FieldValue::Text(self.alt_phone.clone()),
            FieldId::BillingAddress => FieldValue::Text(self.billing_address.clone()),
            FieldId::BillingContactName => FieldValue::Text(self.billing_contact_name.clone()),
            FieldId::BillingPhone => FieldValue::Text(self.billing_phone.clone()),
            FieldId::BillingEmail => FieldValue::Text(self.billing_email.clone()),
        }
    }

    /// Store `value` into `field`, coercing across kinds where a sensible
    /// coercion exists (text "true" into a flag, a comma list into the
    /// languages field).
    pub fn set(&mut self, field: FieldId, value: FieldValue) {
        match field {
            FieldId::OrgName => self.org_name = coerce_text(&value),
            FieldId::HasAccount => self.has_account = coerce_flag(&value),
            FieldId::ClientId => self.client_id = coerce_text(&value),
            FieldId::RequestorName => self.requestor_name = coerce_text(&value),
            FieldId::RequestorEmail => self.requestor_email = coerce_text(&value),
            FieldId::RequestorPhone => self.requestor_phone = coerce_text(&value),
            FieldId::ServiceType => {
                self.service_type = ServiceType::from_wire(&coerce_text(&value));
            }
            FieldId::Timezone => self.timezone = coerce_text(&value),
            FieldId::Date => self.date = coerce_text(&value),
            FieldId::Time => self.time = coerce_text(&value),
            FieldId::Duration => self.duration = coerce_text(&value),
            FieldId::Address => self.address = coerce_text(&value),
            FieldId::LocationDetails => self.location_details = coerce_text(&value),
            FieldId::Languages => self.languages = coerce_list(&value),
            FieldId::Preference => self.preference = coerce_text(&value),
            FieldId::VriRlcProvidesLink => self.vri_rlc_provides_link = coerce_flag(&value),
            FieldId::VriLink => self.vri_link = coerce_text(&value),
            FieldId::PointOfContact => self.point_of_contact = coerce_text(&value),
            FieldId::ProviderName => self.provider_name = coerce_text(&value),
            FieldId::Comments => self.comments = coerce_text(&value),
            FieldId::CostCenter => self.cost_center = coerce_text(&value),
            FieldId::AltPhone => self.alt_phone = coerce_text(&value),
            FieldId::BillingAddress => self.billing_address = coerce_text(&value),
            FieldId::BillingContactName => self.billing_contact_name = coerce_text(&value),
            FieldId::BillingPhone => self.billing_phone = coerce_text(&value),
            FieldId::BillingEmail => self.billing_email = coerce_text(&value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_every_field_present_and_unset() {
        let values = FormValues::defaults();
        for field in FieldId::ALL {
            let value = values.get(field);
            match field.kind() {
                FieldKind::Flag => {
                    // Flags carry their declared default, not emptiness
                    let expected = field == FieldId::VriRlcProvidesLink;
                    assert_eq!(value, FieldValue::Flag(expected), "{:?}", field);
                }
                _ => assert!(value.is_empty(), "{:?} should default empty", field),
            }
        }
    }

    #[test]
    fn test_service_type_wire_round_trip() {
        for service in ServiceType::all() {
            assert_eq!(ServiceType::from_wire(service.as_wire()), *service);
        }
        assert_eq!(ServiceType::from_wire(""), ServiceType::Unselected);
        assert_eq!(ServiceType::from_wire("phone"), ServiceType::Otp);
        assert_eq!(ServiceType::from_wire("video"), ServiceType::Vri);
        assert_eq!(ServiceType::from_wire("carrier-pigeon"), ServiceType::Unselected);
    }

    #[test]
    fn test_field_wire_name_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_wire(field.wire_name()), Some(field));
        }
        assert_eq!(FieldId::from_wire("patientName"), None);
    }

    #[test]
    fn test_set_coerces_languages_from_text() {
        let mut values = FormValues::defaults();
        values.set(
            FieldId::Languages,
            FieldValue::Text("Spanish, Mandarin ".to_string()),
        );
        assert_eq!(values.languages, vec!["Spanish", "Mandarin"]);
    }

    #[test]
    fn test_set_service_type_from_text() {
        let mut values = FormValues::defaults();
        values.set(FieldId::ServiceType, FieldValue::Text("vri".to_string()));
        assert_eq!(values.service_type, ServiceType::Vri);
    }

    #[test]
    fn test_split_languages_drops_empty_entries() {
        assert_eq!(split_languages("Spanish,, Mandarin , "), vec!["Spanish", "Mandarin"]);
        assert!(split_languages("  ").is_empty());
    }

    #[test]
    fn test_draft_from_older_schema_merges_over_defaults() {
        // A draft written before billing fields existed
        let old = r#"{"orgName":"Acme","requestorName":"Bob","serviceType":"onsite"}"#;
        let values: FormValues = serde_json::from_str(old).unwrap();
        assert_eq!(values.org_name, "Acme");
        assert_eq!(values.service_type, ServiceType::Onsite);
        assert_eq!(values.billing_email, "");
        assert!(values.vri_rlc_provides_link);
    }
}
