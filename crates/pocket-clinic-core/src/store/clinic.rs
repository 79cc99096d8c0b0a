//! Clinic store: the clinic list and the active selection.

use tracing::{debug, info, warn};

use super::{append_persisted, encode_collection, keys, load_collection, update_persisted};
use super::{write_entries, StoreResult};
use crate::db::KeyValueStore;
use crate::models::{Clinic, ClinicPatch};

/// Owns the device's clinics and which one is active.
///
/// Invariant: `clinics` is never empty and `active_id` names one of them.
#[derive(Debug, Clone)]
pub struct ClinicStore {
    clinics: Vec<Clinic>,
    active_id: String,
}

impl ClinicStore {
    /// Load clinics from storage.
    ///
    /// An empty device gets a default clinic, persisted immediately and made
    /// active. An active id that matches no clinic falls back to the first one.
    pub fn load(storage: &mut impl KeyValueStore, default_name: &str) -> StoreResult<Self> {
        let clinics: Vec<Clinic> = load_collection(&*storage, keys::CLINICS)?;

        let Some(first) = clinics.first() else {
            return Self::bootstrap(storage, default_name);
        };

        let active_id = match storage.get(keys::ACTIVE_CLINIC_ID)? {
            Some(id) if clinics.iter().any(|c| c.id == id) => id,
            stored => {
                warn!(
                    stored = stored.as_deref().unwrap_or(""),
                    fallback = %first.id,
                    "active clinic not found, falling back to first clinic"
                );
                first.id.clone()
            }
        };

        debug!(count = clinics.len(), active = %active_id, "loaded clinics");
        Ok(Self { clinics, active_id })
    }

    fn bootstrap(storage: &mut impl KeyValueStore, default_name: &str) -> StoreResult<Self> {
        let clinic = Clinic::default_clinic(default_name);
        let list = encode_collection(std::slice::from_ref(&clinic))?;
        write_entries(
            storage,
            &[(keys::CLINICS, &list), (keys::ACTIVE_CLINIC_ID, &clinic.id)],
        )?;

        info!(clinic_id = %clinic.id, name = %clinic.name, "created default clinic");
        Ok(Self {
            active_id: clinic.id.clone(),
            clinics: vec![clinic],
        })
    }

    /// All clinics, in creation order.
    pub fn clinics(&self) -> &[Clinic] {
        &self.clinics
    }

    /// Look up a clinic by id.
    pub fn clinic(&self, id: &str) -> Option<&Clinic> {
        self.clinics.iter().find(|c| c.id == id)
    }

    /// The active clinic.
    pub fn active_clinic(&self) -> &Clinic {
        self.clinic(&self.active_id)
            .unwrap_or(&self.clinics[0])
    }

    /// Id of the active clinic.
    pub fn active_clinic_id(&self) -> &str {
        &self.active_id
    }

    /// Add a clinic. The active clinic does not change.
    pub fn add_clinic(
        &mut self,
        storage: &mut impl KeyValueStore,
        name: String,
        address: String,
        phone: String,
    ) -> StoreResult<Clinic> {
        let clinic = Clinic::new(name, address, phone);
        append_persisted(storage, keys::CLINICS, &mut self.clinics, clinic.clone())?;

        info!(clinic_id = %clinic.id, "added clinic");
        Ok(clinic)
    }

    /// Merge `patch` into a clinic. Returns `None` without writing when the id is unknown.
    pub fn update_clinic(
        &mut self,
        storage: &mut impl KeyValueStore,
        id: &str,
        patch: ClinicPatch,
    ) -> StoreResult<Option<Clinic>> {
        let updated = update_persisted(
            storage,
            keys::CLINICS,
            &mut self.clinics,
            |c| c.id == id,
            |c| c.apply(patch),
        )?;

        match &updated {
            Some(clinic) => info!(clinic_id = %clinic.id, active = clinic.id == self.active_id, "updated clinic"),
            None => debug!(clinic_id = id, "update for unknown clinic ignored"),
        }
        Ok(updated)
    }

    /// Switch the active clinic, persisting only the pointer.
    ///
    /// Returns `false` and changes nothing when the id is unknown.
    pub fn set_active_clinic(&mut self, storage: &mut impl KeyValueStore, id: &str) -> StoreResult<bool> {
        if self.clinic(id).is_none() {
            debug!(clinic_id = id, "switch to unknown clinic ignored");
            return Ok(false);
        }

        write_entries(storage, &[(keys::ACTIVE_CLINIC_ID, id)])?;
        self.active_id = id.to_string();

        info!(clinic_id = id, "switched active clinic");
        Ok(true)
    }
}
