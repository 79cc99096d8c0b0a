//! Pocket Clinic Core Library
//!
//! Offline-first data core for a small clinic: patients, visits,
//! appointments, and income/expense tracking, scoped to an active clinic and
//! persisted on the device.
//!
//! # Architecture
//!
//! ```text
//!   Host app (Swift/Kotlin)
//!          │  uniffi
//!          ▼
//!     ClinicCore ── Mutex ──► ClinicSession
//!                               │
//!        ┌──────────────────────┼──────────────────────┐
//!        ▼                      ▼                      ▼
//!   ClinicStore             DataStore             SettingsStore
//!   clinics +               patients, visits,     theme
//!   active pointer          appointments,
//!                           income, expenses
//!        └──────────────────────┼──────────────────────┘
//!                               ▼
//!                  KeyValueStore (SQLite kv_store)
//! ```
//!
//! Every mutation writes the whole affected collection before the in-memory
//! copy changes. Derived views in [`views`] are pure functions over the
//! in-memory collections.
//!
//! # Modules
//!
//! - [`db`]: SQLite key-value storage
//! - [`models`]: Domain types (Clinic, Patient, Visit, Appointment, ...)
//! - [`store`]: Clinic, data and settings stores
//! - [`views`]: History, dashboards, search and financial summaries
//! - [`session`]: Storage plus stores, scoped to the active clinic
//! - [`config`]: TOML configuration
//! - [`logging`]: `tracing` subscriber setup and redaction

pub mod capability;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use capability::Capability;
pub use config::{ConfigError, CoreConfig};
pub use db::{Database, KeyValueStore};
pub use models::{
    Appointment, AppointmentStatus, Clinic, ExpenseRecord, IncomeRecord, Patient, Sex, Theme,
    Visit,
};
pub use session::ClinicSession;
pub use store::{StoreError, StoreResult};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset, NaiveDate};

use models::{
    AppointmentPatch, ClinicPatch, ExpensePatch, NewAppointment, NewExpense, NewPatient, NewVisit,
    PatientPatch,
};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for ClinicError {
    fn from(e: db::DbError) -> Self {
        ClinicError::DatabaseError(e.to_string())
    }
}

impl From<StoreError> for ClinicError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Storage(db) => db.into(),
            StoreError::Decode { .. } | StoreError::Json(_) => {
                ClinicError::SerializationError(e.to_string())
            }
            StoreError::InvalidInput(msg) => ClinicError::InvalidInput(msg),
            StoreError::Unsupported(capability) => ClinicError::Unsupported(capability.to_string()),
        }
    }
}

impl From<ConfigError> for ClinicError {
    fn from(e: ConfigError) -> Self {
        ClinicError::ConfigError(e.to_string())
    }
}

impl From<models::ParseLabelError> for ClinicError {
    fn from(e: models::ParseLabelError) -> Self {
        ClinicError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

fn config_from(config_toml: Option<String>) -> Result<CoreConfig, ClinicError> {
    match config_toml {
        Some(content) => Ok(CoreConfig::from_toml_str(&content)?),
        None => Ok(CoreConfig::default()),
    }
}

/// Open or create the clinic database at the given path.
#[uniffi::export]
pub fn open_clinic_core(
    path: String,
    config_toml: Option<String>,
) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = config_from(config_toml)?;
    let db = Database::open(&path)?;
    ClinicCore::new(db, config)
}

/// Open an in-memory clinic database (for testing and previews).
#[uniffi::export]
pub fn open_clinic_core_in_memory(
    config_toml: Option<String>,
) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = config_from(config_toml)?;
    let db = Database::open_in_memory()?;
    ClinicCore::new(db, config)
}

/// Install the log subscriber described by the `[logging]` table.
///
/// Calling this again keeps the first subscriber; only the personal-data
/// switch is updated.
#[uniffi::export]
pub fn init_core_logging(config_toml: Option<String>) -> Result<(), ClinicError> {
    let config = config_from(config_toml)?;
    let log_config = config.log_config()?;
    if let Err(e) = logging::init_logging(&log_config) {
        tracing::debug!(error = %e, "log subscriber already installed");
    }
    Ok(())
}

/// Expense categories offered by the entry form.
#[uniffi::export]
pub fn suggested_expense_categories() -> Vec<String> {
    models::SUGGESTED_EXPENSE_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    session: Mutex<ClinicSession<Database>>,
}

impl ClinicCore {
    fn new(db: Database, config: CoreConfig) -> Result<Arc<Self>, ClinicError> {
        let session = ClinicSession::open(db, config)?;
        Ok(Arc::new(Self {
            session: Mutex::new(session),
        }))
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Clinic Operations
    // =========================================================================

    pub fn list_clinics(&self) -> Result<Vec<FfiClinic>, ClinicError> {
        let session = self.session.lock()?;
        let active_id = session.active_clinic_id();
        Ok(session
            .clinics()
            .iter()
            .map(|clinic| FfiClinic::from_clinic(clinic.clone(), active_id))
            .collect())
    }

    pub fn active_clinic(&self) -> Result<FfiClinic, ClinicError> {
        let session = self.session.lock()?;
        Ok(FfiClinic::from_clinic(
            session.active_clinic().clone(),
            session.active_clinic_id(),
        ))
    }

    /// Add a clinic. The active clinic does not change.
    pub fn add_clinic(
        &self,
        name: String,
        address: String,
        phone: String,
    ) -> Result<FfiClinic, ClinicError> {
        let mut session = self.session.lock()?;
        let clinic = session.add_clinic(name, address, phone)?;
        Ok(FfiClinic::from_clinic(clinic, session.active_clinic_id()))
    }

    /// Update a clinic. Returns `None` when the id is unknown.
    pub fn update_clinic(
        &self,
        id: String,
        patch: FfiClinicPatch,
    ) -> Result<Option<FfiClinic>, ClinicError> {
        let mut session = self.session.lock()?;
        let clinic = session.update_clinic(&id, patch.into())?;
        let active_id = session.active_clinic_id();
        Ok(clinic.map(|clinic| FfiClinic::from_clinic(clinic, active_id)))
    }

    /// Switch the active clinic. Returns `false` when the id is unknown.
    pub fn set_active_clinic(&self, id: String) -> Result<bool, ClinicError> {
        let mut session = self.session.lock()?;
        Ok(session.set_active_clinic(&id)?)
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient at the active clinic.
    pub fn add_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, ClinicError> {
        let fields = NewPatient::try_from(patient)?;
        let mut session = self.session.lock()?;
        Ok(session.add_patient(fields)?.into())
    }

    pub fn update_patient(
        &self,
        id: String,
        patch: FfiPatientPatch,
    ) -> Result<Option<FfiPatient>, ClinicError> {
        let patch = PatientPatch::try_from(patch)?;
        let mut session = self.session.lock()?;
        Ok(session.update_patient(&id, patch)?.map(Into::into))
    }

    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session.patient(&id).cloned().map(Into::into))
    }

    /// Patients of the active clinic, newest first.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session
            .clinic_patients()
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Search the active clinic's patients by name or phone.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session
            .search_patients(&query, limit as usize)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Visit Operations
    // =========================================================================

    /// Log a visit at the active clinic together with its income record.
    pub fn add_visit(&self, visit: FfiNewVisit) -> Result<FfiVisitWithIncome, ClinicError> {
        let fields = NewVisit::try_from(visit)?;
        let mut session = self.session.lock()?;
        let (visit, income) = session.add_visit(fields)?;
        Ok(FfiVisitWithIncome {
            visit: visit.into(),
            income: income.into(),
        })
    }

    /// A patient's visits, most recent first.
    pub fn patient_visit_history(&self, patient_id: String) -> Result<Vec<FfiVisit>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session
            .patient_visit_history(&patient_id)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    pub fn patient_total_spent(&self, patient_id: String) -> Result<f64, ClinicError> {
        let session = self.session.lock()?;
        Ok(session.patient_total_spent(&patient_id))
    }

    pub fn last_visit(&self, patient_id: String) -> Result<Option<FfiVisit>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session.last_visit(&patient_id).cloned().map(Into::into))
    }

    /// Visits at the active clinic on a `YYYY-MM-DD` day.
    pub fn visits_on(&self, day: String) -> Result<Vec<FfiVisit>, ClinicError> {
        let day = parse_date("day", &day)?;
        let session = self.session.lock()?;
        Ok(session
            .visits_on(day)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    pub fn add_appointment(
        &self,
        appointment: FfiNewAppointment,
    ) -> Result<FfiAppointment, ClinicError> {
        let fields = NewAppointment::try_from(appointment)?;
        let mut session = self.session.lock()?;
        Ok(session.add_appointment(fields)?.into())
    }

    pub fn update_appointment(
        &self,
        id: String,
        patch: FfiAppointmentPatch,
    ) -> Result<Option<FfiAppointment>, ClinicError> {
        let patch = AppointmentPatch::try_from(patch)?;
        let mut session = self.session.lock()?;
        Ok(session.update_appointment(&id, patch)?.map(Into::into))
    }

    /// Dashboard counters relative to the device's local date.
    pub fn appointment_counters(&self) -> Result<FfiAppointmentCounters, ClinicError> {
        let session = self.session.lock()?;
        Ok(session.appointment_counters(today()).into())
    }

    /// Scheduled appointments from the device's local date on.
    pub fn upcoming_appointments(&self) -> Result<Vec<FfiAppointment>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session
            .upcoming_appointments(today())
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Finance Operations
    // =========================================================================

    pub fn add_expense(&self, expense: FfiNewExpense) -> Result<FfiExpenseRecord, ClinicError> {
        let fields = NewExpense::try_from(expense)?;
        let mut session = self.session.lock()?;
        Ok(session.add_expense(fields)?.into())
    }

    pub fn update_expense(
        &self,
        id: String,
        patch: FfiExpensePatch,
    ) -> Result<Option<FfiExpenseRecord>, ClinicError> {
        let patch = ExpensePatch::try_from(patch)?;
        let mut session = self.session.lock()?;
        Ok(session.update_expense(&id, patch)?.map(Into::into))
    }

    /// Delete an expense. Returns `false` when the id is unknown.
    pub fn delete_expense(&self, id: String) -> Result<bool, ClinicError> {
        let mut session = self.session.lock()?;
        Ok(session.delete_expense(&id)?)
    }

    pub fn list_income_records(&self) -> Result<Vec<FfiIncomeRecord>, ClinicError> {
        let session = self.session.lock()?;
        let clinic_id = session.active_clinic_id();
        Ok(session
            .data()
            .income_records()
            .iter()
            .filter(|r| r.clinic_id == clinic_id)
            .cloned()
            .map(Into::into)
            .collect())
    }

    pub fn list_expense_records(&self) -> Result<Vec<FfiExpenseRecord>, ClinicError> {
        let session = self.session.lock()?;
        let clinic_id = session.active_clinic_id();
        Ok(session
            .data()
            .expense_records()
            .iter()
            .filter(|r| r.clinic_id == clinic_id)
            .cloned()
            .map(Into::into)
            .collect())
    }

    pub fn monthly_summary(&self, month: u32, year: i32) -> Result<FfiMonthlySummary, ClinicError> {
        check_month(month)?;
        let session = self.session.lock()?;
        Ok(session.monthly_summary(month, year).into())
    }

    pub fn expense_breakdown(
        &self,
        month: u32,
        year: i32,
    ) -> Result<Vec<FfiCategoryTotal>, ClinicError> {
        check_month(month)?;
        let session = self.session.lock()?;
        Ok(session
            .expense_breakdown(month, year)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Settings and Capabilities
    // =========================================================================

    /// Current theme, `light` or `dark`.
    pub fn theme(&self) -> Result<String, ClinicError> {
        let session = self.session.lock()?;
        Ok(session.theme().to_string())
    }

    pub fn set_theme(&self, theme: String) -> Result<(), ClinicError> {
        let theme: Theme = theme.parse()?;
        let mut session = self.session.lock()?;
        Ok(session.set_theme(theme)?)
    }

    pub fn capabilities(&self) -> Result<Vec<FfiCapability>, ClinicError> {
        let session = self.session.lock()?;
        Ok(session
            .capabilities()
            .into_iter()
            .map(|(capability, supported)| FfiCapability {
                name: capability.to_string(),
                supported,
            })
            .collect())
    }

    pub fn sync_data(&self) -> Result<(), ClinicError> {
        let session = self.session.lock()?;
        Ok(session.sync_data()?)
    }

    pub fn export_data(&self) -> Result<String, ClinicError> {
        let session = self.session.lock()?;
        Ok(session.export_data()?)
    }

    pub fn import_data(&self, payload: String) -> Result<(), ClinicError> {
        let mut session = self.session.lock()?;
        Ok(session.import_data(&payload)?)
    }
}

// =========================================================================
// Input Parsing
// =========================================================================

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ClinicError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ClinicError::InvalidInput(format!("{}: '{}' is not a YYYY-MM-DD date ({})", field, raw, e)))
}

/// Keeps the caller's UTC offset so the visit's calendar day stays local.
fn parse_instant(field: &str, raw: &str) -> Result<DateTime<FixedOffset>, ClinicError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| ClinicError::InvalidInput(format!("{}: '{}' is not an RFC 3339 time ({})", field, raw, e)))
}

fn parse_optional_date(field: &str, raw: Option<String>) -> Result<Option<NaiveDate>, ClinicError> {
    raw.map(|r| parse_date(field, &r)).transpose()
}

fn check_month(month: u32) -> Result<(), ClinicError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ClinicError::InvalidInput(format!("month must be 1-12, got {}", month)))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe clinic.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinic {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Whether this is the clinic new records go to
    pub is_active: bool,
    /// RFC 3339
    pub created_at: String,
}

impl FfiClinic {
    fn from_clinic(clinic: Clinic, active_id: &str) -> Self {
        Self {
            is_active: clinic.id == active_id,
            id: clinic.id,
            name: clinic.name,
            address: clinic.address,
            phone: clinic.phone,
            created_at: clinic.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<FfiClinicPatch> for ClinicPatch {
    fn from(patch: FfiClinicPatch) -> Self {
        ClinicPatch {
            name: patch.name,
            address: patch.address,
            phone: patch.phone,
            is_active: None,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub age: u32,
    /// `Male`, `Female` or `Other`
    pub sex: String,
    pub phone: String,
    pub location: String,
    pub allergies: String,
    /// Allergy text present and not "none"
    pub has_allergies: bool,
    pub medical_history: String,
    pub created_at: String,
    pub updated_at: String,
    pub clinic_id: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            has_allergies: patient.has_allergies(),
            id: patient.id,
            name: patient.name,
            age: patient.age,
            sex: patient.sex.to_string(),
            phone: patient.phone,
            location: patient.location,
            allergies: patient.allergies,
            medical_history: patient.medical_history,
            created_at: patient.created_at.to_rfc3339(),
            updated_at: patient.updated_at.to_rfc3339(),
            clinic_id: patient.clinic_id,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub age: u32,
    pub sex: String,
    pub phone: String,
    pub location: String,
    pub allergies: String,
    pub medical_history: String,
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = ClinicError;

    fn try_from(patient: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(NewPatient {
            name: patient.name,
            age: patient.age,
            sex: patient.sex.parse()?,
            phone: patient.phone,
            location: patient.location,
            allergies: patient.allergies,
            medical_history: patient.medical_history,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

impl TryFrom<FfiPatientPatch> for PatientPatch {
    type Error = ClinicError;

    fn try_from(patch: FfiPatientPatch) -> Result<Self, Self::Error> {
        Ok(PatientPatch {
            name: patch.name,
            age: patch.age,
            sex: patch.sex.map(|s| s.parse::<Sex>()).transpose()?,
            phone: patch.phone,
            location: patch.location,
            allergies: patch.allergies,
            medical_history: patch.medical_history,
        })
    }
}

/// FFI-safe visit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisit {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub complaints: String,
    pub diagnosis: String,
    pub treatment: String,
    pub fee: f64,
    /// `YYYY-MM-DD`
    pub follow_up_date: Option<String>,
    /// RFC 3339
    pub visit_date: String,
    pub clinic_id: String,
}

impl From<Visit> for FfiVisit {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            patient_id: visit.patient_id,
            patient_name: visit.patient_name,
            complaints: visit.complaints,
            diagnosis: visit.diagnosis,
            treatment: visit.treatment,
            fee: visit.fee,
            follow_up_date: visit.follow_up_date.map(|d| d.to_string()),
            visit_date: visit.visit_date.to_rfc3339(),
            clinic_id: visit.clinic_id,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewVisit {
    pub patient_id: String,
    pub patient_name: String,
    pub complaints: String,
    pub diagnosis: String,
    pub treatment: String,
    pub fee: f64,
    pub follow_up_date: Option<String>,
    /// Defaults to now
    pub visit_date: Option<String>,
}

impl TryFrom<FfiNewVisit> for NewVisit {
    type Error = ClinicError;

    fn try_from(visit: FfiNewVisit) -> Result<Self, Self::Error> {
        Ok(NewVisit {
            patient_id: visit.patient_id,
            patient_name: visit.patient_name,
            complaints: visit.complaints,
            diagnosis: visit.diagnosis,
            treatment: visit.treatment,
            fee: visit.fee,
            follow_up_date: parse_optional_date("follow_up_date", visit.follow_up_date)?,
            visit_date: visit
                .visit_date
                .map(|raw| parse_instant("visit_date", &raw))
                .transpose()?,
        })
    }
}

/// A logged visit and the income record created with it.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisitWithIncome {
    pub visit: FfiVisit,
    pub income: FfiIncomeRecord,
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    /// `scheduled`, `completed`, `cancelled` or `failed`
    pub status: String,
    pub notes: Option<String>,
    pub clinic_id: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            patient_name: appointment.patient_name,
            phone: appointment.phone,
            date: appointment.date.to_string(),
            time: appointment.time,
            status: appointment.status.to_string(),
            notes: appointment.notes,
            clinic_id: appointment.clinic_id,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAppointment {
    pub patient_id: String,
    pub patient_name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

impl TryFrom<FfiNewAppointment> for NewAppointment {
    type Error = ClinicError;

    fn try_from(appointment: FfiNewAppointment) -> Result<Self, Self::Error> {
        Ok(NewAppointment {
            patient_id: appointment.patient_id,
            patient_name: appointment.patient_name,
            phone: appointment.phone,
            date: parse_date("date", &appointment.date)?,
            time: appointment.time,
            notes: appointment.notes,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentPatch {
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    /// Replaces the notes when set
    pub notes: Option<String>,
    /// Removes the notes; takes precedence over `notes`
    pub clear_notes: bool,
}

impl TryFrom<FfiAppointmentPatch> for AppointmentPatch {
    type Error = ClinicError;

    fn try_from(patch: FfiAppointmentPatch) -> Result<Self, Self::Error> {
        Ok(AppointmentPatch {
            patient_id: patch.patient_id,
            patient_name: patch.patient_name,
            phone: patch.phone,
            date: parse_optional_date("date", patch.date)?,
            time: patch.time,
            status: patch
                .status
                .map(|s| s.parse::<AppointmentStatus>())
                .transpose()?,
            notes: if patch.clear_notes {
                Some(None)
            } else {
                patch.notes.map(Some)
            },
        })
    }
}

/// FFI-safe income record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIncomeRecord {
    pub id: String,
    pub visit_id: String,
    pub patient_name: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub clinic_id: String,
}

impl From<IncomeRecord> for FfiIncomeRecord {
    fn from(record: IncomeRecord) -> Self {
        Self {
            id: record.id,
            visit_id: record.visit_id,
            patient_name: record.patient_name,
            amount: record.amount,
            date: record.date.to_string(),
            description: record.description,
            clinic_id: record.clinic_id,
        }
    }
}

/// FFI-safe expense record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExpenseRecord {
    pub id: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub clinic_id: String,
}

impl From<ExpenseRecord> for FfiExpenseRecord {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            date: record.date.to_string(),
            description: record.description,
            category: record.category,
            clinic_id: record.clinic_id,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewExpense {
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub category: String,
}

impl TryFrom<FfiNewExpense> for NewExpense {
    type Error = ClinicError;

    fn try_from(expense: FfiNewExpense) -> Result<Self, Self::Error> {
        Ok(NewExpense {
            amount: expense.amount,
            date: parse_date("date", &expense.date)?,
            description: expense.description,
            category: expense.category,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExpensePatch {
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl TryFrom<FfiExpensePatch> for ExpensePatch {
    type Error = ClinicError;

    fn try_from(patch: FfiExpensePatch) -> Result<Self, Self::Error> {
        Ok(ExpensePatch {
            amount: patch.amount,
            date: parse_optional_date("date", patch.date)?,
            description: patch.description,
            category: patch.category,
        })
    }
}

/// FFI-safe appointment counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentCounters {
    pub today: u32,
    pub tomorrow: u32,
    pub this_month: u32,
    pub next_month: u32,
}

impl From<views::AppointmentCounters> for FfiAppointmentCounters {
    fn from(counters: views::AppointmentCounters) -> Self {
        Self {
            today: counters.today as u32,
            tomorrow: counters.tomorrow as u32,
            this_month: counters.this_month as u32,
            next_month: counters.next_month as u32,
        }
    }
}

/// FFI-safe monthly summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub income_count: u32,
    pub expense_count: u32,
}

impl From<views::MonthlySummary> for FfiMonthlySummary {
    fn from(summary: views::MonthlySummary) -> Self {
        Self {
            month: summary.month,
            year: summary.year,
            total_income: summary.total_income,
            total_expenses: summary.total_expenses,
            profit: summary.profit,
            income_count: summary.income_count as u32,
            expense_count: summary.expense_count as u32,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: u32,
    pub suggested: bool,
}

impl From<views::CategoryTotal> for FfiCategoryTotal {
    fn from(total: views::CategoryTotal) -> Self {
        Self {
            category: total.category,
            total: total.total,
            count: total.count as u32,
            suggested: total.suggested,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCapability {
    /// `remote_sync`, `export` or `import`
    pub name: String,
    pub supported: bool,
}
