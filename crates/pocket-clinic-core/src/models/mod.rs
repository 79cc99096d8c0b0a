//! Domain models for the pocket-clinic system.

mod appointment;
mod clinic;
mod finance;
mod patient;
mod settings;
mod visit;

pub use appointment::*;
pub use clinic::*;
pub use finance::*;
pub use patient::*;
pub use settings::*;
pub use visit::*;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Error returned when a stored or user-supplied label does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

/// Generate a new record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time, guaranteed to be later than `previous`.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 36);
        assert_ne!(id, new_id());
    }

    #[test]
    fn test_next_timestamp_strictly_increases() {
        let future = Utc::now() + Duration::hours(1);
        assert!(next_timestamp(future) > future);

        let past = Utc::now() - Duration::hours(1);
        assert!(next_timestamp(past) > past);
    }
}
