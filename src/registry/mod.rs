//! Alert-level policy registry
//!
//! Maps (alert level, resource category) to the policy that should be live
//! while that level is in effect. Levels loaded from older saves may lack a
//! category; lookups repair those gaps from the live managers when the
//! category's content is active.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::ContentFlags;
use crate::core::error::{AlertError, Result};
use crate::core::types::{AlertLevelId, ResourceCategory};
use crate::policy::{ManagerSet, PolicyHandle};

/// Stored policies for one alert level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertLevel {
    pub level: AlertLevelId,
    pub settings: AHashMap<ResourceCategory, PolicyHandle>,
}

impl AlertLevel {
    pub fn new(level: AlertLevelId, settings: AHashMap<ResourceCategory, PolicyHandle>) -> Self {
        Self { level, settings }
    }

    pub fn get(&self, category: ResourceCategory) -> Option<&PolicyHandle> {
        self.settings.get(&category)
    }
}

/// Result of a bulk capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Number of categories written into the level
    Captured(usize),
    /// The registry has no entry for the level yet; nothing was written
    Uninitialized,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertRegistry {
    levels: Vec<AlertLevel>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a registry from persisted levels
    ///
    /// Levels are kept sorted by id so that a level's position in the list
    /// matches its id. Entries sharing an id keep their relative order.
    pub fn from_levels(mut levels: Vec<AlertLevel>) -> Self {
        if levels.windows(2).any(|w| w[0].level > w[1].level) {
            tracing::warn!("Persisted alert levels were out of order, sorting by level");
            levels.sort_by_key(|l| l.level);
        }
        Self { levels }
    }

    /// Add the normal or emergency level if a restored registry lacks one
    ///
    /// A missing level copies the other level's handles, or the managers'
    /// live policies when neither exists. An empty registry is left empty
    /// so the next lookup initializes it. Returns the number of levels added.
    pub fn ensure_levels(&mut self, managers: &ManagerSet) -> usize {
        if !self.is_initialized() {
            return 0;
        }

        let mut added = 0;
        for (missing, other) in [
            (AlertLevelId::NORMAL, AlertLevelId::EMERGENCY),
            (AlertLevelId::EMERGENCY, AlertLevelId::NORMAL),
        ] {
            if self.level(missing).is_some() {
                continue;
            }
            let settings = match self.level(other) {
                Some(existing) => existing.settings.clone(),
                None => {
                    let mut live = AHashMap::new();
                    for category in ResourceCategory::ALL {
                        live.insert(category, managers.active_policy(category));
                    }
                    live
                }
            };
            tracing::warn!(level = %missing, "Restored alert registry lacked a level, rebuilding it");
            self.levels.push(AlertLevel::new(missing, settings));
            added += 1;
        }

        if added > 0 {
            self.levels.sort_by_key(|l| l.level);
        }
        added
    }

    pub fn is_initialized(&self) -> bool {
        !self.levels.is_empty()
    }

    pub fn levels(&self) -> &[AlertLevel] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<AlertLevel> {
        self.levels
    }

    pub fn level(&self, level: AlertLevelId) -> Option<&AlertLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// Rebuild both levels from the managers' live policies
    ///
    /// The emergency level starts as a copy of the normal one, sharing
    /// every handle. Any previous customization is discarded.
    pub fn force_init(&mut self, managers: &ManagerSet) {
        let mut no_alert = AHashMap::new();
        for category in ResourceCategory::ALL {
            no_alert.insert(category, managers.active_policy(category));
        }
        let alert_on = no_alert.clone();

        self.levels = vec![
            AlertLevel::new(AlertLevelId::NORMAL, no_alert),
            AlertLevel::new(AlertLevelId::EMERGENCY, alert_on),
        ];
        tracing::debug!("Alert registry initialized with {} levels", self.levels.len());
    }

    fn find_mut(&mut self, level: AlertLevelId) -> Result<&mut AlertLevel> {
        self.levels
            .iter_mut()
            .find(|l| l.level == level)
            .ok_or(AlertError::MissingLevelEntry(level))
    }

    /// Stored policy for `category` at `level`
    ///
    /// Initializes an empty registry first. A missing optional category is
    /// filled from its manager when its content is active; a missing
    /// mandatory category is logged and yields `None`.
    pub fn get_alert_policy(
        &mut self,
        level: AlertLevelId,
        category: ResourceCategory,
        managers: &ManagerSet,
        flags: &ContentFlags,
    ) -> Result<Option<PolicyHandle>> {
        if !self.is_initialized() {
            self.force_init(managers);
        }

        let entry = self.find_mut(level)?;
        if let Some(policy) = entry.settings.get(&category) {
            return Ok(Some(policy.clone()));
        }

        if !category.is_optional() {
            tracing::error!("{}", AlertError::MissingCategoryDefault(category));
            return Ok(None);
        }

        if !flags.content_active(category) {
            return Ok(None);
        }

        let policy = managers.active_policy(category);
        tracing::debug!(%level, %category, "Repaired missing alert policy");
        entry.settings.insert(category, policy.clone());
        Ok(Some(policy))
    }

    /// Overwrite one slot, addressing the level by its position in the list
    ///
    /// Position and id agree for registries built by `force_init` or
    /// `from_levels`, which keeps levels sorted by id. A registry with gaps
    /// in its ids (e.g. only level 1 stored) is addressed by position.
    pub fn set_alert_policy(
        &mut self,
        level: AlertLevelId,
        category: ResourceCategory,
        policy: PolicyHandle,
    ) -> Result<()> {
        let entry = self
            .levels
            .get_mut(level.0 as usize)
            .ok_or(AlertError::MissingLevelEntry(level))?;
        entry.settings.insert(category, policy);
        Ok(())
    }

    /// Insert or replace one slot of the level with id `level`
    pub fn save_policy(
        &mut self,
        level: AlertLevelId,
        category: ResourceCategory,
        policy: PolicyHandle,
    ) -> Result<()> {
        self.find_mut(level)?.settings.insert(category, policy);
        Ok(())
    }

    /// Capture every syncing category's live policy into `level`
    ///
    /// Does nothing when the level does not exist yet, e.g. an alert raised
    /// before the registry was ever read. A later lookup initializes it.
    pub fn save_state(
        &mut self,
        level: AlertLevelId,
        managers: &ManagerSet,
        flags: &ContentFlags,
    ) -> SaveOutcome {
        let Some(entry) = self.levels.iter_mut().find(|l| l.level == level) else {
            tracing::debug!(%level, "Alert registry not initialized, skipping save");
            return SaveOutcome::Uninitialized;
        };

        let mut captured = 0;
        for category in ResourceCategory::ALL {
            if !flags.syncs(category) {
                continue;
            }
            entry.settings.insert(category, managers.active_policy(category));
            captured += 1;
        }
        tracing::debug!(%level, captured, "Saved alert policies");
        SaveOutcome::Captured(captured)
    }

    /// Push every stored policy of `level` into its manager
    ///
    /// Categories that do not sync under `flags` are skipped. Returns the
    /// number of policies applied.
    pub fn load_state(
        &self,
        level: AlertLevelId,
        managers: &mut ManagerSet,
        flags: &ContentFlags,
    ) -> usize {
        let mut applied = 0;
        for entry in self.levels.iter().filter(|l| l.level == level) {
            for (category, policy) in entry.settings.iter() {
                if !flags.syncs(*category) {
                    continue;
                }
                managers.load_state(*category, policy);
                applied += 1;
            }
        }
        tracing::debug!(%level, applied, "Loaded alert policies");
        applied
    }
}
