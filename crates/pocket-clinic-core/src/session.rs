//! The clinic session: storage plus every store, scoped to the active clinic.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::capability::Capability;
use crate::config::CoreConfig;
use crate::db::{Database, KeyValueStore};
use crate::models::{
    Appointment, AppointmentPatch, Clinic, ClinicPatch, ExpensePatch, ExpenseRecord, IncomeRecord,
    NewAppointment, NewExpense, NewPatient, NewVisit, Patient, PatientPatch, Theme, Visit,
};
use crate::store::{ClinicStore, DataStore, SettingsStore, StoreError, StoreResult};
use crate::views::{self, AppointmentCounters, CategoryTotal, MonthlySummary};

/// Owns the storage handle and the in-memory stores loaded from it.
///
/// New records are tagged with the active clinic. Views that list or count
/// records only look at the active clinic's records, except the
/// per-patient history which follows the patient id.
pub struct ClinicSession<S: KeyValueStore = Database> {
    storage: S,
    config: CoreConfig,
    clinics: ClinicStore,
    data: DataStore,
    settings: SettingsStore,
}

impl<S: KeyValueStore> ClinicSession<S> {
    /// Load every store from `storage`, creating the default clinic on first use.
    pub fn open(mut storage: S, config: CoreConfig) -> StoreResult<Self> {
        let clinics = ClinicStore::load(&mut storage, &config.clinic.default_name)?;
        let data = DataStore::load(&storage)?;
        let settings = SettingsStore::load(&storage)?;

        info!(
            clinics = clinics.clinics().len(),
            active_clinic = clinics.active_clinic_id(),
            patients = data.patients().len(),
            visits = data.visits().len(),
            "opened clinic session"
        );

        Ok(Self {
            storage,
            config,
            clinics,
            data,
            settings,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Close the session, handing back the storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    // =========================================================================
    // Clinics
    // =========================================================================

    pub fn clinics(&self) -> &[Clinic] {
        self.clinics.clinics()
    }

    pub fn active_clinic(&self) -> &Clinic {
        self.clinics.active_clinic()
    }

    pub fn active_clinic_id(&self) -> &str {
        self.clinics.active_clinic_id()
    }

    pub fn add_clinic(&mut self, name: String, address: String, phone: String) -> StoreResult<Clinic> {
        self.clinics.add_clinic(&mut self.storage, name, address, phone)
    }

    pub fn update_clinic(&mut self, id: &str, patch: ClinicPatch) -> StoreResult<Option<Clinic>> {
        self.clinics.update_clinic(&mut self.storage, id, patch)
    }

    pub fn set_active_clinic(&mut self, id: &str) -> StoreResult<bool> {
        self.clinics.set_active_clinic(&mut self.storage, id)
    }

    // =========================================================================
    // Records
    // =========================================================================

    pub fn add_patient(&mut self, fields: NewPatient) -> StoreResult<Patient> {
        let clinic_id = self.clinics.active_clinic_id();
        self.data.add_patient(&mut self.storage, clinic_id, fields)
    }

    pub fn update_patient(&mut self, id: &str, patch: PatientPatch) -> StoreResult<Option<Patient>> {
        self.data.update_patient(&mut self.storage, id, patch)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.data.patient(id)
    }

    /// Log a visit at the active clinic; returns the visit and its income record.
    pub fn add_visit(&mut self, fields: NewVisit) -> StoreResult<(Visit, IncomeRecord)> {
        let clinic_id = self.clinics.active_clinic_id();
        self.data.add_visit(&mut self.storage, clinic_id, fields)
    }

    pub fn add_appointment(&mut self, fields: NewAppointment) -> StoreResult<Appointment> {
        let clinic_id = self.clinics.active_clinic_id();
        self.data.add_appointment(&mut self.storage, clinic_id, fields)
    }

    pub fn update_appointment(
        &mut self,
        id: &str,
        patch: AppointmentPatch,
    ) -> StoreResult<Option<Appointment>> {
        self.data.update_appointment(&mut self.storage, id, patch)
    }

    pub fn add_expense(&mut self, fields: NewExpense) -> StoreResult<ExpenseRecord> {
        let clinic_id = self.clinics.active_clinic_id();
        self.data.add_expense(&mut self.storage, clinic_id, fields)
    }

    pub fn update_expense(&mut self, id: &str, patch: ExpensePatch) -> StoreResult<Option<ExpenseRecord>> {
        self.data.update_expense(&mut self.storage, id, patch)
    }

    pub fn delete_expense(&mut self, id: &str) -> StoreResult<bool> {
        self.data.delete_expense(&mut self.storage, id)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// The active clinic's patients, newest first.
    pub fn clinic_patients(&self) -> Vec<&Patient> {
        views::clinic_patients(self.data.patients(), self.active_clinic_id())
    }

    pub fn search_patients(&self, query: &str, limit: usize) -> Vec<&Patient> {
        views::search_patients(self.data.patients(), self.active_clinic_id(), query, limit)
    }

    pub fn patient_visit_history(&self, patient_id: &str) -> Vec<&Visit> {
        views::patient_visit_history(self.data.visits(), patient_id)
    }

    pub fn patient_total_spent(&self, patient_id: &str) -> f64 {
        views::total_spent_by_patient(self.data.visits(), patient_id)
    }

    pub fn last_visit(&self, patient_id: &str) -> Option<&Visit> {
        views::last_visit(self.data.visits(), patient_id)
    }

    pub fn visits_on(&self, day: NaiveDate) -> Vec<&Visit> {
        views::visits_on(self.data.visits(), self.active_clinic_id(), day)
    }

    pub fn appointment_counters(&self, today: NaiveDate) -> AppointmentCounters {
        views::appointment_counters(self.data.appointments(), self.active_clinic_id(), today)
    }

    /// Upcoming appointments, capped at the configured limit.
    pub fn upcoming_appointments(&self, today: NaiveDate) -> Vec<&Appointment> {
        views::upcoming_appointments(
            self.data.appointments(),
            self.active_clinic_id(),
            today,
            self.config.views.upcoming_limit,
        )
    }

    pub fn monthly_summary(&self, month: u32, year: i32) -> MonthlySummary {
        let clinic_id = self.active_clinic_id();
        views::monthly_summary(
            self.data
                .income_records()
                .iter()
                .filter(|r| r.clinic_id == clinic_id),
            self.data
                .expense_records()
                .iter()
                .filter(|r| r.clinic_id == clinic_id),
            month,
            year,
        )
    }

    pub fn expense_breakdown(&self, month: u32, year: i32) -> Vec<CategoryTotal> {
        let clinic_id = self.active_clinic_id();
        views::expense_breakdown(
            self.data
                .expense_records()
                .iter()
                .filter(|r| r.clinic_id == clinic_id),
            month,
            year,
        )
    }

    // =========================================================================
    // Settings and capabilities
    // =========================================================================

    pub fn theme(&self) -> Theme {
        self.settings.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) -> StoreResult<()> {
        self.settings.set_theme(&mut self.storage, theme)
    }

    /// Every capability with whether this build provides it.
    pub fn capabilities(&self) -> Vec<(Capability, bool)> {
        Capability::ALL.iter().map(|c| (*c, c.is_supported())).collect()
    }

    pub fn sync_data(&self) -> StoreResult<()> {
        self.data.sync_data()
    }

    pub fn export_data(&self) -> StoreResult<String> {
        debug!("export requested");
        Err(StoreError::Unsupported(Capability::Export))
    }

    pub fn import_data(&mut self, _payload: &str) -> StoreResult<()> {
        debug!("import requested");
        Err(StoreError::Unsupported(Capability::Import))
    }
}
