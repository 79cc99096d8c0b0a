//! Visit models.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A logged patient visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    pub patient_id: String,
    /// Copy of the patient's name at visit time
    pub patient_name: String,
    #[serde(default)]
    pub complaints: String,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    /// Consultation fee, never negative
    pub fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    /// Instant of the visit with the clinic's UTC offset at that time
    pub visit_date: DateTime<FixedOffset>,
    pub clinic_id: String,
}

/// Fields supplied when logging a visit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVisit {
    pub patient_id: String,
    pub patient_name: String,
    pub complaints: String,
    pub diagnosis: String,
    pub treatment: String,
    pub fee: f64,
    pub follow_up_date: Option<NaiveDate>,
    /// Defaults to now, at the device's local offset
    pub visit_date: Option<DateTime<FixedOffset>>,
}

impl Visit {
    /// Create a new visit belonging to `clinic_id`.
    pub fn new(clinic_id: &str, fields: NewVisit) -> Self {
        Self {
            id: super::new_id(),
            patient_id: fields.patient_id,
            patient_name: fields.patient_name,
            complaints: fields.complaints,
            diagnosis: fields.diagnosis,
            treatment: fields.treatment,
            fee: fields.fee,
            follow_up_date: fields.follow_up_date,
            visit_date: fields
                .visit_date
                .unwrap_or_else(|| Local::now().fixed_offset()),
            clinic_id: clinic_id.to_string(),
        }
    }

    /// Calendar day of the visit in the offset it was logged with.
    pub fn visit_day(&self) -> NaiveDate {
        self.visit_date.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at_offset(hours: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_visit_defaults_to_now() {
        let before = Utc::now();
        let visit = Visit::new(
            "clinic-1",
            NewVisit {
                patient_id: "p-1".into(),
                patient_name: "Jane Doe".into(),
                fee: 50.0,
                ..Default::default()
            },
        );
        assert!(visit.visit_date >= before);
        assert_eq!(visit.clinic_id, "clinic-1");
        assert!(visit.follow_up_date.is_none());
    }

    #[test]
    fn test_visit_day() {
        let visit = Visit::new(
            "clinic-1",
            NewVisit {
                visit_date: Some(at_offset(0, 2026, 3, 14, 23)),
                ..Default::default()
            },
        );
        assert_eq!(visit.visit_day(), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn test_evening_visit_keeps_local_day() {
        // 20:00 at -05:00 is already the next day in UTC
        let visit = Visit::new(
            "clinic-1",
            NewVisit {
                visit_date: Some(at_offset(-5, 2026, 10, 31, 20)),
                ..Default::default()
            },
        );
        assert_eq!(visit.visit_day(), NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());

        let json = serde_json::to_string(&visit).unwrap();
        assert!(json.contains("2026-10-31T20:00:00-05:00"));
        let parsed: Visit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.visit_day(), visit.visit_day());
    }

    #[test]
    fn test_reads_utc_visit_dates() {
        let json = r#"{"id":"v1","patientId":"p1","patientName":"Jane Doe","fee":50.0,
            "visitDate":"2026-10-16T09:00:00Z","clinicId":"c1"}"#;
        let visit: Visit = serde_json::from_str(json).unwrap();
        assert_eq!(visit.visit_day(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }

    #[test]
    fn test_follow_up_omitted_from_json_when_absent() {
        let visit = Visit::new("clinic-1", NewVisit::default());
        let json = serde_json::to_string(&visit).unwrap();
        assert!(!json.contains("followUpDate"));

        let parsed: Visit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, visit);
    }
}
