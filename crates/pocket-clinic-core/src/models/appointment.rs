//! Appointment models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ParseLabelError;

/// Appointment status. Any status may change to any other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Failed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "failed" => Ok(AppointmentStatus::Failed),
            _ => Err(ParseLabelError {
                kind: "appointment status",
                value: s.to_string(),
            }),
        }
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    #[serde(default)]
    pub phone: String,
    pub date: NaiveDate,
    /// Display time such as "09:30 AM"
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub clinic_id: String,
}

/// Fields supplied when booking an appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub patient_id: String,
    pub patient_name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
}

/// Partial update for an appointment. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPatch {
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl Appointment {
    /// Create a new scheduled appointment belonging to `clinic_id`.
    pub fn new(clinic_id: &str, fields: NewAppointment) -> Self {
        Self {
            id: super::new_id(),
            patient_id: fields.patient_id,
            patient_name: fields.patient_name,
            phone: fields.phone,
            date: fields.date,
            time: fields.time,
            status: AppointmentStatus::Scheduled,
            notes: fields.notes,
            clinic_id: clinic_id.to_string(),
        }
    }

    /// Merge a partial update into this appointment.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(patient_name) = patch.patient_name {
            self.patient_name = patient_name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}
