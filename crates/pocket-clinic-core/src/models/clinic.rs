//! Clinic models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name given to the clinic synthesized on first launch.
pub const DEFAULT_CLINIC_NAME: &str = "My Clinic";

/// A clinic the device can record data against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// Flag recorded at creation; the active selection itself is the
    /// persisted `activeClinicId` pointer.
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a clinic. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

impl Clinic {
    /// Create a new clinic.
    pub fn new(name: String, address: String, phone: String) -> Self {
        Self {
            id: super::new_id(),
            name,
            address,
            phone,
            is_active: false,
            created_at: Utc::now(),
        }
    }

    /// The clinic created when the device has none.
    pub fn default_clinic(name: &str) -> Self {
        let mut clinic = Self::new(name.to_string(), String::new(), String::new());
        clinic.is_active = true;
        clinic
    }

    /// Merge a partial update into this clinic.
    pub fn apply(&mut self, patch: ClinicPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clinic() {
        let clinic = Clinic::default_clinic(DEFAULT_CLINIC_NAME);
        assert_eq!(clinic.name, "My Clinic");
        assert!(clinic.address.is_empty());
        assert!(clinic.phone.is_empty());
        assert!(clinic.is_active);
    }

    #[test]
    fn test_apply_partial() {
        let mut clinic = Clinic::new("North".into(), "1 Main St".into(), "555".into());
        let id = clinic.id.clone();

        clinic.apply(ClinicPatch {
            phone: Some("555-0199".into()),
            ..Default::default()
        });

        assert_eq!(clinic.id, id);
        assert_eq!(clinic.name, "North");
        assert_eq!(clinic.address, "1 Main St");
        assert_eq!(clinic.phone, "555-0199");
    }

    #[test]
    fn test_camel_case_json() {
        let clinic = Clinic::default_clinic(DEFAULT_CLINIC_NAME);
        let json = serde_json::to_string(&clinic).unwrap();
        assert!(json.contains("\"isActive\":true"));
        assert!(json.contains("\"createdAt\""));
    }
}
