//! Contact models for the Freshdesk API.
//!
//! A contact is a customer who raises tickets. The server assigns the id;
//! everything else is set locally and validated on assignment.

use serde::{Deserialize, Serialize};

use super::common::{deserialize_optional_id, normalize_id, require_text, Numeric};
use crate::error::FreshdeskError;

/// A helpdesk contact (requester).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawContact")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,

    name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    mobile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    twitter_id: Option<String>,
}

impl Contact {
    /// Creates a contact with the given name.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, FreshdeskError> {
        Ok(Self {
            id: None,
            name: require_text(name, "Invalid contact name")?,
            email: None,
            phone: None,
            mobile: None,
            twitter_id: None,
        })
    }

    /// Server-assigned id.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Contact name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Phone number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Mobile number.
    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }

    /// Twitter handle.
    pub fn twitter_id(&self) -> Option<&str> {
        self.twitter_id.as_deref()
    }

    /// Sets the id from a number or numeric string.
    pub fn set_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        self.id = Some(normalize_id(value, "Invalid contact id")?);
        Ok(())
    }

    /// Renames the contact.
    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.name = require_text(value, "Invalid contact name")?;
        Ok(())
    }

    /// Sets the email address.
    pub fn set_email(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.email = Some(require_text(value, "Invalid contact Email")?);
        Ok(())
    }

    /// Sets the phone number.
    pub fn set_phone(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.phone = Some(require_text(value, "Invalid contact Phone")?);
        Ok(())
    }

    /// Sets the mobile number.
    pub fn set_mobile(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.mobile = Some(require_text(value, "Invalid contact Mobile")?);
        Ok(())
    }

    /// Sets the Twitter handle.
    pub fn set_twitter_id(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.twitter_id = Some(require_text(value, "Invalid contact TwitterId")?);
        Ok(())
    }

    /// Builder form of [`set_email`](Self::set_email).
    pub fn with_email(mut self, value: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.set_email(value)?;
        Ok(self)
    }

    /// Builder form of [`set_phone`](Self::set_phone).
    pub fn with_phone(mut self, value: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.set_phone(value)?;
        Ok(self)
    }

    /// Builder form of [`set_twitter_id`](Self::set_twitter_id).
    pub fn with_twitter_id(mut self, value: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.set_twitter_id(value)?;
        Ok(self)
    }

    /// A contact needs a name and at least one of email, phone or Twitter id.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && (self.email.is_some() || self.phone.is_some() || self.twitter_id.is_some())
    }

    /// Wire representation; unset fields are omitted.
    pub fn to_json(&self) -> Result<serde_json::Value, FreshdeskError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Builds a contact from an API payload. `null` yields `None`.
    pub fn from_json(raw: &serde_json::Value) -> Result<Option<Self>, FreshdeskError> {
        if raw.is_null() {
            return Ok(None);
        }
        Ok(Some(Self::deserialize(raw)?))
    }
}

/// Contact as it arrives from the API, before validation.
#[derive(Deserialize)]
struct RawContact {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    mobile: Option<String>,
    #[serde(default)]
    twitter_id: Option<String>,
}

impl TryFrom<RawContact> for Contact {
    type Error = FreshdeskError;

    fn try_from(raw: RawContact) -> Result<Self, Self::Error> {
        let mut contact = Contact::new(raw.name.unwrap_or_default())?;
        contact.id = raw.id;
        contact.email = raw.email.filter(|s| !s.is_empty());
        contact.phone = raw.phone.filter(|s| !s.is_empty());
        contact.mobile = raw.mobile.filter(|s| !s.is_empty());
        contact.twitter_id = raw.twitter_id.filter(|s| !s.is_empty());
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_contact_requires_name() {
        assert!(Contact::new("").is_err());
        assert!(Contact::new("   ").is_err());
    }

    #[test]
    fn test_name_only_is_invalid() {
        let contact = Contact::new("John Doe").unwrap();
        assert!(!contact.is_valid());
    }

    #[test]
    fn test_any_reachable_channel_makes_contact_valid() {
        let with_email = Contact::new("John Doe").unwrap().with_email("john@test.cc").unwrap();
        assert!(with_email.is_valid());

        let with_phone = Contact::new("John Doe").unwrap().with_phone("+45 1234").unwrap();
        assert!(with_phone.is_valid());

        let with_twitter = Contact::new("John Doe").unwrap().with_twitter_id("@jd").unwrap();
        assert!(with_twitter.is_valid());
    }

    #[test]
    fn test_mobile_alone_does_not_make_contact_valid() {
        let mut contact = Contact::new("John Doe").unwrap();
        contact.set_mobile("+45 5555").unwrap();
        assert!(!contact.is_valid());
    }

    #[test]
    fn test_invalid_setter_leaves_previous_value() {
        let mut contact = Contact::new("John Doe").unwrap().with_email("john@test.cc").unwrap();
        assert!(contact.set_email("").is_err());
        assert_eq!(contact.email(), Some("john@test.cc"));
        assert!(contact.set_id(0).is_err());
        assert_eq!(contact.id(), None);
    }

    #[test]
    fn test_id_normalized_from_string() {
        let mut contact = Contact::new("John Doe").unwrap();
        contact.set_id("1234").unwrap();
        assert_eq!(contact.id(), Some(1234));
    }

    #[test]
    fn test_to_json_omits_unset_fields() {
        let contact = Contact::new("John Doe").unwrap().with_email("john@test.cc").unwrap();
        assert_eq!(
            contact.to_json().unwrap(),
            json!({"name": "John Doe", "email": "john@test.cc"})
        );
    }

    #[test]
    fn test_from_json() {
        let raw = json!({
            "id": 43000123,
            "name": "Jane Roe",
            "email": "jane@example.com",
            "phone": null,
            "twitter_id": "@jane",
            "active": true,
            "company_id": null
        });
        let contact = Contact::from_json(&raw).unwrap().unwrap();
        assert_eq!(contact.id(), Some(43000123));
        assert_eq!(contact.name(), "Jane Roe");
        assert_eq!(contact.email(), Some("jane@example.com"));
        assert_eq!(contact.phone(), None);
        assert_eq!(contact.twitter_id(), Some("@jane"));
    }

    #[test]
    fn test_from_json_null_and_nameless() {
        assert!(Contact::from_json(&json!(null)).unwrap().is_none());
        assert!(Contact::from_json(&json!({"email": "x@y.z"})).is_err());
    }
}
