//! Patient models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParseLabelError;

/// Patient sex as recorded on the intake form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Other => "Other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(ParseLabelError {
                kind: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Immutable once created
    pub id: String,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    /// Free-text allergy notes
    #[serde(default)]
    pub allergies: String,
    /// Free-text medical history
    #[serde(default)]
    pub medical_history: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
    pub clinic_id: String,
}

/// Fields supplied when registering a patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub phone: String,
    pub location: String,
    pub allergies: String,
    pub medical_history: String,
}

/// Partial update for a patient. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

impl Patient {
    /// Create a new patient belonging to `clinic_id`.
    pub fn new(clinic_id: &str, fields: NewPatient) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            name: fields.name,
            age: fields.age,
            sex: fields.sex,
            phone: fields.phone,
            location: fields.location,
            allergies: fields.allergies,
            medical_history: fields.medical_history,
            created_at: now,
            updated_at: now,
            clinic_id: clinic_id.to_string(),
        }
    }

    /// Merge a partial update and refresh `updated_at`.
    pub fn apply(&mut self, patch: PatientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(sex) = patch.sex {
            self.sex = sex;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(allergies) = patch.allergies {
            self.allergies = allergies;
        }
        if let Some(medical_history) = patch.medical_history {
            self.medical_history = medical_history;
        }
        self.touch();
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = super::next_timestamp(self.updated_at);
    }

    /// Whether the allergy field carries anything worth flagging.
    pub fn has_allergies(&self) -> bool {
        let text = self.allergies.trim();
        !text.is_empty() && !text.eq_ignore_ascii_case("none")
    }
}
