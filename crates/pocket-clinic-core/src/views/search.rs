//! Patient lookup for the clinic's patient list.

use strsim::jaro_winkler;

use crate::models::Patient;

/// Minimum Jaro-Winkler similarity for a typo-tolerant name match.
pub const NAME_SIMILARITY_THRESHOLD: f64 = 0.85;

/// A clinic's patients, most recently registered first.
pub fn clinic_patients<'a>(patients: &'a [Patient], clinic_id: &str) -> Vec<&'a Patient> {
    let mut list: Vec<&Patient> = patients.iter().filter(|p| p.clinic_id == clinic_id).collect();
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    list
}

/// Search a clinic's patients by name or phone, best match first.
///
/// An exact (case-insensitive) name match ranks first, then name prefixes,
/// then substrings of the name or phone, then names within
/// [`NAME_SIMILARITY_THRESHOLD`]. A blank query returns the clinic list.
pub fn search_patients<'a>(
    patients: &'a [Patient],
    clinic_id: &str,
    query: &str,
    limit: usize,
) -> Vec<&'a Patient> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        let mut all = clinic_patients(patients, clinic_id);
        all.truncate(limit);
        return all;
    }

    let mut scored: Vec<(f64, &Patient)> = patients
        .iter()
        .filter(|p| p.clinic_id == clinic_id)
        .filter_map(|p| match_score(p, &query).map(|score| (score, p)))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, p)| p).collect()
}

/// Score in `0.0..=3.0`, `None` when the patient does not match.
fn match_score(patient: &Patient, query: &str) -> Option<f64> {
    let name = patient.name.to_lowercase();

    if name == query {
        return Some(3.0);
    }
    if name.starts_with(query) {
        return Some(2.0 + jaro_winkler(&name, query) / 10.0);
    }
    if name.contains(query) || (!patient.phone.is_empty() && patient.phone.contains(query)) {
        return Some(1.0 + jaro_winkler(&name, query) / 10.0);
    }

    // Compare against each word too, so "jne" finds "Jane Doe"
    let best = name
        .split_whitespace()
        .map(|word| jaro_winkler(word, query))
        .fold(jaro_winkler(&name, query), f64::max);

    (best >= NAME_SIMILARITY_THRESHOLD).then_some(best)
}
