//! Device settings store.

use tracing::{info, warn};

use super::{keys, write_entries, StoreResult};
use crate::db::KeyValueStore;
use crate::models::Theme;

/// Persisted device preferences.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    theme: Theme,
}

impl SettingsStore {
    /// Load settings. An absent or unrecognised theme falls back to light.
    pub fn load(storage: &impl KeyValueStore) -> StoreResult<Self> {
        let theme = match storage.get(keys::THEME)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(Self { theme })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, storage: &mut impl KeyValueStore, theme: Theme) -> StoreResult<()> {
        write_entries(storage, &[(keys::THEME, theme.as_str())])?;
        self.theme = theme;
        info!(theme = %theme, "changed theme");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_default_theme() {
        let db = Database::open_in_memory().unwrap();
        let settings = SettingsStore::load(&db).unwrap();
        assert_eq!(settings.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_persists_as_plain_string() {
        let mut db = Database::open_in_memory().unwrap();
        let mut settings = SettingsStore::load(&db).unwrap();

        settings.set_theme(&mut db, Theme::Dark).unwrap();

        assert_eq!(db.get(keys::THEME).unwrap(), Some("dark".into()));
        assert_eq!(SettingsStore::load(&db).unwrap().theme(), Theme::Dark);
    }

    #[test]
    fn test_garbage_theme_falls_back() {
        let mut db = Database::open_in_memory().unwrap();
        db.put(keys::THEME, "sepia").unwrap();
        assert_eq!(SettingsStore::load(&db).unwrap().theme(), Theme::Light);
    }
}
