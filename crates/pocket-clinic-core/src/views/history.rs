//! Visit history projections.

use chrono::NaiveDate;

use crate::models::Visit;

/// A patient's visits, most recent first. Visits on the same instant keep
/// their logging order.
pub fn patient_visit_history<'a>(visits: &'a [Visit], patient_id: &str) -> Vec<&'a Visit> {
    let mut history: Vec<&Visit> = visits.iter().filter(|v| v.patient_id == patient_id).collect();
    history.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
    history
}

/// Sum of fees over a patient's visits.
pub fn total_spent_by_patient(visits: &[Visit], patient_id: &str) -> f64 {
    visits
        .iter()
        .filter(|v| v.patient_id == patient_id)
        .map(|v| v.fee)
        .sum()
}

/// The patient's most recent visit.
pub fn last_visit<'a>(visits: &'a [Visit], patient_id: &str) -> Option<&'a Visit> {
    visits
        .iter()
        .filter(|v| v.patient_id == patient_id)
        .max_by(|a, b| a.visit_date.cmp(&b.visit_date))
}

/// Visits logged at a clinic on a calendar day, in logging order.
pub fn visits_on<'a>(visits: &'a [Visit], clinic_id: &str, day: NaiveDate) -> Vec<&'a Visit> {
    visits
        .iter()
        .filter(|v| v.clinic_id == clinic_id && v.visit_day() == day)
        .collect()
}
