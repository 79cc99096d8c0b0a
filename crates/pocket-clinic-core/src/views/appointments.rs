//! Appointment dashboards.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentStatus};

/// Default length of the upcoming appointments list.
pub const UPCOMING_LIMIT: usize = 10;

/// Appointment counts for the dashboard.
///
/// Month buckets compare month-of-year only, so an appointment in the same
/// month of another year is counted too.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentCounters {
    pub today: usize,
    pub tomorrow: usize,
    pub this_month: usize,
    pub next_month: usize,
}

/// Count a clinic's appointments by day and month bucket. Every status counts.
pub fn appointment_counters(
    appointments: &[Appointment],
    clinic_id: &str,
    today: NaiveDate,
) -> AppointmentCounters {
    let tomorrow = today.succ_opt();
    let this_month = today.month();
    let next_month = if this_month == 12 { 1 } else { this_month + 1 };

    appointments
        .iter()
        .filter(|a| a.clinic_id == clinic_id)
        .fold(AppointmentCounters::default(), |mut counters, a| {
            if a.date == today {
                counters.today += 1;
            }
            if Some(a.date) == tomorrow {
                counters.tomorrow += 1;
            }
            if a.date.month() == this_month {
                counters.this_month += 1;
            }
            if a.date.month() == next_month {
                counters.next_month += 1;
            }
            counters
        })
}

/// A clinic's scheduled appointments from today on, ordered by date and then
/// by the time string, capped at `limit`.
///
/// Times compare as plain strings, so "09:00 PM" sorts before "10:00 AM" and
/// "01:00 PM" sorts before "12:30 PM".
pub fn upcoming_appointments<'a>(
    appointments: &'a [Appointment],
    clinic_id: &str,
    today: NaiveDate,
    limit: usize,
) -> Vec<&'a Appointment> {
    let mut upcoming: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| {
            a.clinic_id == clinic_id && a.status == AppointmentStatus::Scheduled && a.date >= today
        })
        .collect();

    upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    upcoming.truncate(limit);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAppointment;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appt(clinic: &str, date: NaiveDate, time: &str) -> Appointment {
        Appointment::new(
            clinic,
            NewAppointment {
                patient_id: "p1".into(),
                patient_name: "Jane Doe".into(),
                phone: "555-0100".into(),
                date,
                time: time.into(),
                notes: None,
            },
        )
    }

    #[test]
    fn test_counters_today_and_month() {
        let today = day(2026, 10, 16);
        let appointments = vec![
            appt("c1", today, "09:00 AM"),
            appt("c1", today, "11:00 AM"),
            appt("c1", day(2026, 11, 2), "09:00 AM"),
        ];

        let counters = appointment_counters(&appointments, "c1", today);
        assert_eq!(counters.today, 2);
        assert_eq!(counters.tomorrow, 0);
        assert_eq!(counters.this_month, 2);
        assert_eq!(counters.next_month, 1);
    }

    #[test]
    fn test_counters_alias_across_years() {
        let today = day(2026, 10, 16);
        let appointments = vec![
            appt("c1", today, "09:00 AM"),
            appt("c1", today, "11:00 AM"),
            appt("c1", day(2025, 10, 3), "09:00 AM"),
        ];

        let counters = appointment_counters(&appointments, "c1", today);
        assert_eq!(counters.today, 2);
        assert_eq!(counters.this_month, 3);
    }

    #[test]
    fn test_counters_scoped_to_clinic() {
        let today = day(2026, 10, 16);
        let appointments = vec![appt("c1", today, "09:00 AM"), appt("c2", today, "09:00 AM")];

        assert_eq!(appointment_counters(&appointments, "c1", today).today, 1);
    }

    #[test]
    fn test_december_next_month_wraps() {
        let today = day(2026, 12, 31);
        let appointments = vec![
            appt("c1", day(2027, 1, 1), "09:00 AM"),
            appt("c1", day(2027, 1, 20), "09:00 AM"),
        ];

        let counters = appointment_counters(&appointments, "c1", today);
        assert_eq!(counters.tomorrow, 1);
        assert_eq!(counters.next_month, 2);
        assert_eq!(counters.this_month, 0);
    }

    #[test]
    fn test_upcoming_filters_and_orders() {
        let today = day(2026, 10, 16);
        let mut cancelled = appt("c1", day(2026, 10, 17), "08:00 AM");
        cancelled.status = AppointmentStatus::Cancelled;

        let appointments = vec![
            appt("c1", day(2026, 10, 18), "09:00 AM"),
            appt("c1", day(2026, 10, 15), "09:00 AM"), // past
            cancelled,
            appt("c2", day(2026, 10, 17), "09:00 AM"), // other clinic
            appt("c1", today, "10:00 AM"),
            appt("c1", today, "09:30 AM"),
        ];

        let upcoming = upcoming_appointments(&appointments, "c1", today, UPCOMING_LIMIT);
        let slots: Vec<(NaiveDate, &str)> =
            upcoming.iter().map(|a| (a.date, a.time.as_str())).collect();

        assert_eq!(
            slots,
            vec![
                (today, "09:30 AM"),
                (today, "10:00 AM"),
                (day(2026, 10, 18), "09:00 AM"),
            ]
        );
    }

    #[test]
    fn test_upcoming_time_order_is_lexicographic() {
        let today = day(2026, 10, 16);
        let appointments = vec![
            appt("c1", today, "01:00 PM"),
            appt("c1", today, "12:30 PM"),
            appt("c1", today, "10:00 AM"),
        ];

        let upcoming = upcoming_appointments(&appointments, "c1", today, UPCOMING_LIMIT);
        let times: Vec<&str> = upcoming.iter().map(|a| a.time.as_str()).collect();
        assert_eq!(times, vec!["01:00 PM", "10:00 AM", "12:30 PM"]);
    }

    #[test]
    fn test_upcoming_limit() {
        let today = day(2026, 10, 16);
        let appointments: Vec<Appointment> = (1..=15)
            .map(|d| appt("c1", day(2026, 11, d), "09:00 AM"))
            .collect();

        let upcoming = upcoming_appointments(&appointments, "c1", today, UPCOMING_LIMIT);
        assert_eq!(upcoming.len(), 10);
        assert_eq!(upcoming[9].date, day(2026, 11, 10));
    }
}
