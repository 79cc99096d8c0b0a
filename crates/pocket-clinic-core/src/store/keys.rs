//! Storage keys. These names are the on-device persistence contract.

pub const CLINICS: &str = "clinics";
pub const ACTIVE_CLINIC_ID: &str = "activeClinicId";
pub const PATIENTS: &str = "patients";
pub const VISITS: &str = "visits";
pub const APPOINTMENTS: &str = "appointments";
pub const INCOME_RECORDS: &str = "incomeRecords";
pub const EXPENSE_RECORDS: &str = "expenseRecords";
pub const THEME: &str = "theme";
