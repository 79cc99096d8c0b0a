//! Data store: patients, visits, appointments, income and expenses.

use tracing::{debug, info};

use super::{
    append_persisted, encode_collection, ensure_amount, keys, load_collection, persist_collection,
    update_persisted, write_entries, StoreError, StoreResult,
};
use crate::capability::Capability;
use crate::db::KeyValueStore;
use crate::logging::redact_value;
use crate::models::{
    Appointment, AppointmentPatch, ExpensePatch, ExpenseRecord, IncomeRecord, NewAppointment,
    NewExpense, NewPatient, NewVisit, Patient, PatientPatch, Visit,
};

/// Owns the five record collections.
///
/// Clinic ids are supplied by the caller and stored as given; no
/// cross-entity reference is checked.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    patients: Vec<Patient>,
    visits: Vec<Visit>,
    appointments: Vec<Appointment>,
    income_records: Vec<IncomeRecord>,
    expense_records: Vec<ExpenseRecord>,
}

impl DataStore {
    /// Load every collection from storage. Missing keys load as empty.
    pub fn load(storage: &impl KeyValueStore) -> StoreResult<Self> {
        let store = Self {
            patients: load_collection(storage, keys::PATIENTS)?,
            visits: load_collection(storage, keys::VISITS)?,
            appointments: load_collection(storage, keys::APPOINTMENTS)?,
            income_records: load_collection(storage, keys::INCOME_RECORDS)?,
            expense_records: load_collection(storage, keys::EXPENSE_RECORDS)?,
        };

        debug!(
            patients = store.patients.len(),
            visits = store.visits.len(),
            appointments = store.appointments.len(),
            income = store.income_records.len(),
            expenses = store.expense_records.len(),
            "loaded records"
        );
        Ok(store)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn income_records(&self) -> &[IncomeRecord] {
        &self.income_records
    }

    pub fn expense_records(&self) -> &[ExpenseRecord] {
        &self.expense_records
    }

    /// Look up a patient by id.
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    // =========================================================================
    // Patients
    // =========================================================================

    /// Register a patient. `created_at` and `updated_at` start equal.
    pub fn add_patient(
        &mut self,
        storage: &mut impl KeyValueStore,
        clinic_id: &str,
        fields: NewPatient,
    ) -> StoreResult<Patient> {
        let patient = Patient::new(clinic_id, fields);
        append_persisted(storage, keys::PATIENTS, &mut self.patients, patient.clone())?;

        info!(
            patient_id = %patient.id,
            name = redact_value(&patient.name),
            clinic_id,
            "added patient"
        );
        Ok(patient)
    }

    /// Merge `patch` into a patient and refresh `updated_at`.
    ///
    /// Returns `None` without writing when the id is unknown.
    pub fn update_patient(
        &mut self,
        storage: &mut impl KeyValueStore,
        id: &str,
        patch: PatientPatch,
    ) -> StoreResult<Option<Patient>> {
        let updated = update_persisted(
            storage,
            keys::PATIENTS,
            &mut self.patients,
            |p| p.id == id,
            |p| p.apply(patch),
        )?;
        log_update("patient", id, updated.is_some());
        Ok(updated)
    }

    // =========================================================================
    // Visits
    // =========================================================================

    /// Log a visit together with its income record.
    ///
    /// Both collections are written in one storage batch, so either both
    /// records exist afterwards or neither does.
    pub fn add_visit(
        &mut self,
        storage: &mut impl KeyValueStore,
        clinic_id: &str,
        fields: NewVisit,
    ) -> StoreResult<(Visit, IncomeRecord)> {
        ensure_amount("fee", fields.fee)?;

        let visit = Visit::new(clinic_id, fields);
        let income = IncomeRecord::from_visit(&visit);

        let mut next_visits = self.visits.clone();
        next_visits.push(visit.clone());
        let mut next_income = self.income_records.clone();
        next_income.push(income.clone());

        let visits_json = encode_collection(&next_visits)?;
        let income_json = encode_collection(&next_income)?;
        write_entries(
            storage,
            &[
                (keys::VISITS, &visits_json),
                (keys::INCOME_RECORDS, &income_json),
            ],
        )?;

        self.visits = next_visits;
        self.income_records = next_income;

        info!(
            visit_id = %visit.id,
            patient_id = %visit.patient_id,
            fee = visit.fee,
            clinic_id,
            "logged visit"
        );
        Ok((visit, income))
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Book an appointment with status `scheduled`.
    pub fn add_appointment(
        &mut self,
        storage: &mut impl KeyValueStore,
        clinic_id: &str,
        fields: NewAppointment,
    ) -> StoreResult<Appointment> {
        let appointment = Appointment::new(clinic_id, fields);
        append_persisted(
            storage,
            keys::APPOINTMENTS,
            &mut self.appointments,
            appointment.clone(),
        )?;

        info!(
            appointment_id = %appointment.id,
            date = %appointment.date,
            clinic_id,
            "booked appointment"
        );
        Ok(appointment)
    }

    /// Merge `patch` into an appointment. Any status may move to any other.
    pub fn update_appointment(
        &mut self,
        storage: &mut impl KeyValueStore,
        id: &str,
        patch: AppointmentPatch,
    ) -> StoreResult<Option<Appointment>> {
        let updated = update_persisted(
            storage,
            keys::APPOINTMENTS,
            &mut self.appointments,
            |a| a.id == id,
            |a| a.apply(patch),
        )?;
        log_update("appointment", id, updated.is_some());
        Ok(updated)
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    pub fn add_expense(
        &mut self,
        storage: &mut impl KeyValueStore,
        clinic_id: &str,
        fields: NewExpense,
    ) -> StoreResult<ExpenseRecord> {
        ensure_amount("amount", fields.amount)?;

        let expense = ExpenseRecord::new(clinic_id, fields);
        append_persisted(
            storage,
            keys::EXPENSE_RECORDS,
            &mut self.expense_records,
            expense.clone(),
        )?;

        info!(expense_id = %expense.id, amount = expense.amount, clinic_id, "recorded expense");
        Ok(expense)
    }

    pub fn update_expense(
        &mut self,
        storage: &mut impl KeyValueStore,
        id: &str,
        patch: ExpensePatch,
    ) -> StoreResult<Option<ExpenseRecord>> {
        if let Some(amount) = patch.amount {
            ensure_amount("amount", amount)?;
        }

        let updated = update_persisted(
            storage,
            keys::EXPENSE_RECORDS,
            &mut self.expense_records,
            |e| e.id == id,
            |e| e.apply(patch),
        )?;
        log_update("expense", id, updated.is_some());
        Ok(updated)
    }

    /// Remove an expense. Returns `false` without writing when the id is unknown.
    pub fn delete_expense(&mut self, storage: &mut impl KeyValueStore, id: &str) -> StoreResult<bool> {
        if !self.expense_records.iter().any(|e| e.id == id) {
            debug!(expense_id = id, "delete for unknown expense ignored");
            return Ok(false);
        }

        let next: Vec<ExpenseRecord> = self
            .expense_records
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        persist_collection(storage, keys::EXPENSE_RECORDS, &next)?;
        self.expense_records = next;

        info!(expense_id = id, "deleted expense");
        Ok(true)
    }

    // =========================================================================
    // Sync
    // =========================================================================

    /// Remote backup is not available. Performs no I/O.
    pub fn sync_data(&self) -> StoreResult<()> {
        debug!("sync requested but remote sync is not supported");
        Err(StoreError::Unsupported(Capability::RemoteSync))
    }
}

fn log_update(kind: &'static str, id: &str, found: bool) {
    if found {
        info!(kind, id, "updated record");
    } else {
        debug!(kind, id, "update for unknown record ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{AppointmentStatus, Sex};
    use crate::store::testing::FlakyStore;
    use chrono::NaiveDate;

    fn setup() -> (Database, DataStore) {
        let db = Database::open_in_memory().unwrap();
        let store = DataStore::load(&db).unwrap();
        (db, store)
    }

    fn jane() -> NewPatient {
        NewPatient {
            name: "Jane Doe".into(),
            age: 30,
            sex: Sex::Female,
            phone: "555-0100".into(),
            ..Default::default()
        }
    }

    fn visit_for(patient: &Patient, fee: f64) -> NewVisit {
        NewVisit {
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            complaints: "Cough".into(),
            diagnosis: "Bronchitis".into(),
            treatment: "Rest".into(),
            fee,
            ..Default::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_db, store) = setup();
        assert!(store.patients().is_empty());
        assert!(store.visits().is_empty());
        assert!(store.appointments().is_empty());
        assert!(store.income_records().is_empty());
        assert!(store.expense_records().is_empty());
    }

    #[test]
    fn test_add_and_update_patient() {
        let (mut db, mut store) = setup();
        let patient = store.add_patient(&mut db, "c1", jane()).unwrap();
        assert_eq!(patient.created_at, patient.updated_at);

        let updated = store
            .update_patient(
                &mut db,
                &patient.id,
                PatientPatch {
                    age: Some(31),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.age, 31);
        assert!(updated.updated_at > patient.updated_at);
        assert_eq!(store.patient(&patient.id), Some(&updated));
    }

    #[test]
    fn test_update_unknown_patient_writes_nothing() {
        let (mut db, mut store) = setup();
        let result = store
            .update_patient(&mut db, "missing", PatientPatch::default())
            .unwrap();
        assert!(result.is_none());
        assert_eq!(db.get(keys::PATIENTS).unwrap(), None);
    }

    #[test]
    fn test_add_visit_creates_income() {
        let (mut db, mut store) = setup();
        let patient = store.add_patient(&mut db, "c1", jane()).unwrap();

        let (visit, income) = store.add_visit(&mut db, "c1", visit_for(&patient, 50.0)).unwrap();

        assert_eq!(store.income_records().len(), 1);
        assert_eq!(income.visit_id, visit.id);
        assert_eq!(income.amount, 50.0);
        assert_eq!(income.description, "Visit fee - Jane Doe");
        assert_eq!(income.clinic_id, "c1");
        assert_eq!(store.income_records()[0], income);
    }

    #[test]
    fn test_add_visit_rejects_negative_fee() {
        let (mut db, mut store) = setup();
        let patient = store.add_patient(&mut db, "c1", jane()).unwrap();

        let result = store.add_visit(&mut db, "c1", visit_for(&patient, -5.0));

        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
        assert!(store.visits().is_empty());
        assert!(store.income_records().is_empty());
    }

    #[test]
    fn test_add_visit_is_all_or_nothing() {
        let mut storage = FlakyStore::new();
        let mut store = DataStore::load(&storage).unwrap();
        let patient = store.add_patient(&mut storage, "c1", jane()).unwrap();

        storage.poison(keys::INCOME_RECORDS);
        let result = store.add_visit(&mut storage, "c1", visit_for(&patient, 50.0));
        assert!(result.is_err());

        // Neither in memory nor on disk
        assert!(store.visits().is_empty());
        assert!(store.income_records().is_empty());
        assert_eq!(storage.get(keys::VISITS).unwrap(), None);

        storage.heal();
        store.add_visit(&mut storage, "c1", visit_for(&patient, 50.0)).unwrap();
        assert_eq!(store.visits().len(), 1);
        assert_eq!(store.income_records().len(), 1);
    }

    #[test]
    fn test_appointment_lifecycle() {
        let (mut db, mut store) = setup();
        let appt = store
            .add_appointment(
                &mut db,
                "c1",
                NewAppointment {
                    patient_id: "p-1".into(),
                    patient_name: "Jane Doe".into(),
                    phone: "555-0100".into(),
                    date: day(2026, 10, 20),
                    time: "10:00 AM".into(),
                    notes: Some("Bring reports".into()),
                },
            )
            .unwrap();
        assert_eq!(appt.status, AppointmentStatus::Scheduled);

        let updated = store
            .update_appointment(
                &mut db,
                &appt.id,
                AppointmentPatch {
                    status: Some(AppointmentStatus::Failed),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Failed);
        assert_eq!(updated.notes.as_deref(), Some("Bring reports"));

        store
            .update_appointment(
                &mut db,
                &appt.id,
                AppointmentPatch {
                    notes: Some(None),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        let reloaded = DataStore::load(&db).unwrap();
        assert_eq!(reloaded.appointments()[0].notes, None);
    }

    #[test]
    fn test_expense_crud() {
        let (mut db, mut store) = setup();
        let rent = store
            .add_expense(
                &mut db,
                "c1",
                NewExpense {
                    amount: 900.0,
                    date: day(2026, 10, 1),
                    description: "October rent".into(),
                    category: "Rent".into(),
                },
            )
            .unwrap();

        let updated = store
            .update_expense(
                &mut db,
                &rent.id,
                ExpensePatch {
                    amount: Some(950.0),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount, 950.0);

        assert!(store.delete_expense(&mut db, &rent.id).unwrap());
        assert!(store.expense_records().is_empty());
        assert!(!store.delete_expense(&mut db, &rent.id).unwrap());

        let reloaded = DataStore::load(&db).unwrap();
        assert!(reloaded.expense_records().is_empty());
    }

    #[test]
    fn test_update_expense_rejects_negative_amount() {
        let (mut db, mut store) = setup();
        let expense = store
            .add_expense(
                &mut db,
                "c1",
                NewExpense {
                    amount: 10.0,
                    date: day(2026, 10, 1),
                    description: "Gauze".into(),
                    category: "Supplies".into(),
                },
            )
            .unwrap();

        let result = store.update_expense(
            &mut db,
            &expense.id,
            ExpensePatch {
                amount: Some(-1.0),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
        assert_eq!(store.expense_records()[0].amount, 10.0);
    }

    #[test]
    fn test_failed_write_is_not_a_phantom_success() {
        let mut storage = FlakyStore::new();
        let mut store = DataStore::load(&storage).unwrap();
        storage.poison(keys::PATIENTS);

        let result = store.add_patient(&mut storage, "c1", jane());

        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(store.patients().is_empty());
    }

    #[test]
    fn test_sync_is_unsupported() {
        let (_db, store) = setup();
        assert!(matches!(
            store.sync_data(),
            Err(StoreError::Unsupported(Capability::RemoteSync))
        ));
    }
}
