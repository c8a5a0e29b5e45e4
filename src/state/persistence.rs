use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{NutriError, Result};
use crate::models::{SavedPlan, UserProfile};
use crate::planner::constants::LAST_PLAN_KEY;

/// Key/value JSON file holding the single saved plan.
///
/// The file is an object of storage keys; only [`LAST_PLAN_KEY`] is used, so
/// each save overwrites the previous one.
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved plan, `None` if nothing was saved.
    ///
    /// Unparseable content is reported as [`NutriError::CorruptSave`].
    pub fn load(&self) -> Result<Option<SavedPlan>> {
        let Some(mut entries) = self.read_entries()? else {
            return Ok(None);
        };
        let Some(raw) = entries.remove(LAST_PLAN_KEY) else {
            return Ok(None);
        };

        serde_json::from_value(raw)
            .map(Some)
            .map_err(|e| NutriError::CorruptSave(e.to_string()))
    }

    /// Load the saved plan only if it was made for `current`.
    pub fn load_for(&self, current: &UserProfile) -> Result<SavedPlan> {
        let saved = self.load()?.ok_or(NutriError::NothingSaved)?;
        if !saved.matches(current) {
            debug!(saved = %saved.signature, current = %current.signature(), "signature mismatch");
            return Err(NutriError::SignatureMismatch);
        }
        Ok(saved)
    }

    /// Persist `plan`, replacing any earlier save.
    pub fn save(&self, plan: &SavedPlan) -> Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable storage file");
                BTreeMap::new()
            }
        };
        entries.insert(LAST_PLAN_KEY.to_string(), serde_json::to_value(plan)?);
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), meals = plan.meals.len(), "saved plan");
        Ok(())
    }

    /// Remove the saved plan. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        let Some(mut entries) = self.read_entries()? else {
            return Ok(false);
        };
        let existed = entries.remove(LAST_PLAN_KEY).is_some();
        if existed {
            self.write_entries(&entries)?;
        }
        Ok(existed)
    }

    fn read_entries(&self) -> Result<Option<BTreeMap<String, Value>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| NutriError::CorruptSave(e.to_string()))
    }

    fn write_entries(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Diet, Goal, SelectedMeal, Sex};
    use tempfile::TempDir;

    fn saved() -> SavedPlan {
        SavedPlan::new(
            UserProfile {
                sex: Sex::Male,
                age: 40,
                height: 175.0,
                weight: 82.0,
                activity: ActivityLevel::MostlySitting,
                goal: Goal::LoseFat,
                diet: Diet::Vegetarian,
            },
            vec![SelectedMeal {
                meal: "Breakfast".to_string(),
                items: vec!["Poha (1 cup)".to_string()],
                calories: 210.0,
            }],
        )
    }

    #[test]
    fn test_missing_file_is_nothing_saved() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("storage.json"));
        assert!(store.load().unwrap().is_none());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_save_overwrites_and_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = PlanStore::new(&path);
        let mut first = saved();
        store.save(&first).unwrap();
        first.meals[0].calories = 300.0;
        store.save(&first).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.meals[0].calories, 300.0);

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[LAST_PLAN_KEY]["signature"], first.signature.as_str());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = PlanStore::new(&path);
        assert!(matches!(store.load(), Err(NutriError::CorruptSave(_))));

        // A save recovers the slot.
        store.save(&saved()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_load_for_checks_signature() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("storage.json"));
        let plan = saved();
        assert!(matches!(store.load_for(&plan.user), Err(NutriError::NothingSaved)));

        store.save(&plan).unwrap();
        assert_eq!(store.load_for(&plan.user).unwrap(), plan);

        let mut heavier = plan.user.clone();
        heavier.weight = 83.0;
        assert!(matches!(store.load_for(&heavier), Err(NutriError::SignatureMismatch)));
    }

    #[test]
    fn test_clear_removes_plan() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path().join("storage.json"));
        store.save(&saved()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }
}
