//! Provider-agnostic Shipment Models
//!
//! These are the courier contracts a caller fills in before handing a
//! shipment to any provider adapter. Providers only read them.

use serde::{Deserialize, Serialize};

// ============================================================================
// Parcels
// ============================================================================

/// A single physical parcel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

impl Parcel {
    pub fn new(length: f64, width: f64, height: f64, weight: f64) -> Self {
        Parcel {
            length,
            width,
            height,
            weight,
        }
    }
}

/// Parcels attached to a shipment
///
/// A multi-parcel shipment keys every parcel by a caller-chosen identifier;
/// the entry order is kept as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parcels {
    Single(Parcel),
    Multiple(Vec<(String, Parcel)>),
}

impl Parcels {
    /// Build a multi-parcel set from `(id, parcel)` pairs
    pub fn keyed<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Parcel)>,
        K: Into<String>,
    {
        Parcels::Multiple(entries.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Parcels::Single(_) => 1,
            Parcels::Multiple(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Parcel> for Parcels {
    fn from(parcel: Parcel) -> Self {
        Parcels::Single(parcel)
    }
}

// ============================================================================
// Parties
// ============================================================================

/// Address-bearing party (receiver or sender)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub full_name: String,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub street: String,
    pub house_number: String,
    pub apartment_number: Option<String>,
    pub city: String,
    pub zip_code: String,
    pub country_code: String,
}

pub type Receiver = Party;
pub type Sender = Party;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Party {
    /// Building number as the courier expects it: house and apartment joined
    /// by one space. The space is kept even without an apartment number.
    pub fn building_number(&self) -> String {
        format!(
            "{} {}",
            self.house_number,
            self.apartment_number.as_deref().unwrap_or_default()
        )
    }

    /// Check the party against the courier's sender rules
    ///
    /// Returns every violated rule, not just the first one.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let required = [
            ("full_name", &self.full_name),
            ("address", &self.street),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
            ("phone", &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(field, "is required"));
            }
        }

        match self.country_code.chars().count() {
            0 => errors.push(ValidationError::new("country_code", "is required")),
            2 => {}
            _ => errors.push(ValidationError::new(
                "country_code",
                "must be exactly 2 characters",
            )),
        }

        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !looks_like_email(email) {
                errors.push(ValidationError::new("email", "is not a valid email address"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

// ============================================================================
// Shipment
// ============================================================================

/// Shipment handed to a courier for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub receiver: Receiver,
    pub sender: Option<Sender>,
    pub parcels: Parcels,
    /// Free-text content; sent to the courier as the shipment reference
    pub content: String,
}

impl Shipment {
    pub fn new(receiver: Receiver, parcels: impl Into<Parcels>, content: impl Into<String>) -> Self {
        Shipment {
            receiver,
            sender: None,
            parcels: parcels.into(),
            content: content.into(),
        }
    }

    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Party {
        Party {
            full_name: "Jan Kowalski".to_string(),
            email: Some("jan@example.com".to_string()),
            phone: "500600700".to_string(),
            street: "Prosta".to_string(),
            house_number: "51".to_string(),
            city: "Warszawa".to_string(),
            zip_code: "00-838".to_string(),
            country_code: "PL".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_building_number_keeps_trailing_space() {
        let mut party = sender();
        assert_eq!(party.building_number(), "51 ");

        party.apartment_number = Some("4".to_string());
        assert_eq!(party.building_number(), "51 4");
    }

    #[test]
    fn test_valid_sender() {
        assert!(sender().validate().is_ok());
    }

    #[test]
    fn test_sender_without_email_is_valid() {
        let party = Party {
            email: None,
            ..sender()
        };
        assert!(party.validate().is_ok());
    }

    #[test]
    fn test_sender_collects_all_violations() {
        let party = Party {
            full_name: String::new(),
            phone: " ".to_string(),
            country_code: "POL".to_string(),
            email: Some("not-an-email".to_string()),
            ..sender()
        };

        let errors = party.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(fields, vec!["full_name", "phone", "country_code", "email"]);
        assert_eq!(errors[2].to_string(), "country_code: must be exactly 2 characters");
    }

    #[test]
    fn test_parcels_len() {
        let single: Parcels = Parcel::new(1.0, 2.0, 3.0, 4.0).into();
        assert_eq!(single.len(), 1);

        let multi = Parcels::keyed([("a", Parcel::default()), ("b", Parcel::default())]);
        assert_eq!(multi.len(), 2);
        assert!(!multi.is_empty());
    }
}
