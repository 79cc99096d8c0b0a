//! Read-side projections over the in-memory collections.
//!
//! Everything here is a pure function of its inputs. "Today" is always passed
//! in by the caller.

mod appointments;
mod finance;
mod history;
mod search;

pub use appointments::*;
pub use finance::*;
pub use history::*;
pub use search::*;
