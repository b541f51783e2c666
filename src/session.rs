//! Alert session: owns the registry and drives level transitions
//!
//! One session exists per running game. Hosts pass it to whatever raises or
//! clears the alert; nothing here is process-global.

use serde::{Deserialize, Serialize};

use crate::core::config::{AlertConfig, BehaviourConfig, ContentFlags};
use crate::core::error::Result;
use crate::core::types::{AlertLevelId, ResourceCategory};
use crate::policy::{ManagerSet, PolicyHandle};
use crate::registry::{AlertRegistry, SaveOutcome};
use crate::simulation::interrupt::{interrupt_forced, Actor, InterruptReport};

/// Persisted shape: current level plus every stored level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub alert_level: AlertLevelId,
    pub levels: AlertRegistry,
}

impl SaveData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What a level change did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AlertLevelId,
    pub to: AlertLevelId,
    pub saved: SaveOutcome,
    pub applied: usize,
    pub interrupted: Option<InterruptReport>,
}

pub struct AlertSession {
    registry: AlertRegistry,
    managers: ManagerSet,
    flags: ContentFlags,
    behaviour: BehaviourConfig,
    alert_level: AlertLevelId,
}

impl AlertSession {
    pub fn new(managers: ManagerSet, config: &AlertConfig) -> Self {
        Self {
            registry: AlertRegistry::new(),
            managers,
            flags: config.content,
            behaviour: config.behaviour.clone(),
            alert_level: AlertLevelId::NORMAL,
        }
    }

    pub fn level(&self) -> AlertLevelId {
        self.alert_level
    }

    pub fn on_alert(&self) -> bool {
        self.alert_level.is_alert()
    }

    /// Set the flag without touching any policy
    pub fn set_on_alert(&mut self, on: bool) {
        self.alert_level = if on {
            AlertLevelId::EMERGENCY
        } else {
            AlertLevelId::NORMAL
        };
    }

    pub fn registry(&self) -> &AlertRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AlertRegistry {
        &mut self.registry
    }

    pub fn managers(&self) -> &ManagerSet {
        &self.managers
    }

    pub fn managers_mut(&mut self) -> &mut ManagerSet {
        &mut self.managers
    }

    pub fn flags(&self) -> &ContentFlags {
        &self.flags
    }

    /// Content packs can change mid-run, e.g. after loading another save
    pub fn flags_mut(&mut self) -> &mut ContentFlags {
        &mut self.flags
    }

    pub fn force_init(&mut self) {
        self.registry.force_init(&self.managers);
    }

    pub fn get_alert_policy(
        &mut self,
        level: AlertLevelId,
        category: ResourceCategory,
    ) -> Result<Option<PolicyHandle>> {
        self.registry
            .get_alert_policy(level, category, &self.managers, &self.flags)
    }

    pub fn set_alert_policy(
        &mut self,
        level: AlertLevelId,
        category: ResourceCategory,
        policy: PolicyHandle,
    ) -> Result<()> {
        self.registry.set_alert_policy(level, category, policy)
    }

    pub fn save_policy(
        &mut self,
        level: AlertLevelId,
        category: ResourceCategory,
        policy: PolicyHandle,
    ) -> Result<()> {
        self.registry.save_policy(level, category, policy)
    }

    pub fn save_state(&mut self, level: AlertLevelId) -> SaveOutcome {
        self.registry.save_state(level, &self.managers, &self.flags)
    }

    pub fn load_state(&mut self, level: AlertLevelId) -> usize {
        self.registry
            .load_state(level, &mut self.managers, &self.flags)
    }

    fn switch_to(&mut self, to: AlertLevelId) -> Transition {
        let from = self.alert_level;
        let saved = self.save_state(from);
        self.alert_level = to;
        let applied = self.load_state(to);
        tracing::info!(%from, %to, applied, "Alert level changed");
        Transition {
            from,
            to,
            saved,
            applied,
            interrupted: None,
        }
    }

    /// Enter the emergency level
    ///
    /// Captures the normal policies, applies the emergency ones and, when
    /// configured, interrupts `actors`. Returns `None` if already on alert.
    pub fn raise_alert<'a, A, I>(&mut self, actors: I) -> Option<Transition>
    where
        A: Actor + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        if self.on_alert() {
            return None;
        }
        let mut transition = self.switch_to(AlertLevelId::EMERGENCY);
        if self.behaviour.interrupt_on_alert {
            transition.interrupted = Some(interrupt_forced(actors));
        }
        Some(transition)
    }

    /// Return to the normal level. Returns `None` if not on alert.
    pub fn stand_down(&mut self) -> Option<Transition> {
        if !self.on_alert() {
            return None;
        }
        Some(self.switch_to(AlertLevelId::NORMAL))
    }

    pub fn toggle<'a, A, I>(&mut self, actors: I) -> Option<Transition>
    where
        A: Actor + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        if self.on_alert() {
            self.stand_down()
        } else {
            self.raise_alert(actors)
        }
    }

    pub fn save_data(&self) -> SaveData {
        SaveData {
            alert_level: self.alert_level,
            levels: self.registry.clone(),
        }
    }

    /// Replace the registry and level with persisted ones
    ///
    /// Live manager state is left alone; the host restores that itself.
    /// A save missing the normal or emergency level gets it rebuilt.
    pub fn restore(&mut self, data: SaveData) {
        self.alert_level = data.alert_level;
        self.registry = AlertRegistry::from_levels(data.levels.into_levels());
        self.registry.ensure_levels(&self.managers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::world::World;
    use crate::entity::colonist::Colonist;
    use crate::policy::PolicyId;

    fn session() -> AlertSession {
        let mut session = AlertSession::new(ManagerSet::in_memory(), &AlertConfig::default());
        session.force_init();
        session
    }

    #[test]
    fn test_on_alert_flag() {
        let mut session = session();
        assert!(!session.on_alert());
        session.set_on_alert(true);
        assert_eq!(session.level(), AlertLevelId::EMERGENCY);
        session.set_on_alert(false);
        assert_eq!(session.level(), AlertLevelId::NORMAL);
    }

    #[test]
    fn test_raise_is_idempotent() {
        let mut session = session();
        let mut world = World::new();
        assert!(session.raise_alert(world.free_colonists_mut()).is_some());
        assert!(session.raise_alert(world.free_colonists_mut()).is_none());
        assert!(session.stand_down().is_some());
        assert!(session.stand_down().is_none());
    }

    #[test]
    fn test_raise_applies_emergency_policies() {
        let mut session = session();
        let drill = PolicyHandle::new(PolicyId(12), "Drill schedule");
        session
            .set_alert_policy(AlertLevelId::EMERGENCY, ResourceCategory::Restrict, drill.clone())
            .unwrap();

        let mut nobody: Vec<Colonist> = Vec::new();
        let transition = session.raise_alert(nobody.iter_mut()).unwrap();
        assert_eq!(transition.saved, SaveOutcome::Captured(4));
        assert_eq!(transition.applied, 4);
        assert!(session
            .managers()
            .active_policy(ResourceCategory::Restrict)
            .same_instance(&drill));
    }

    #[test]
    fn test_save_data_round_trip() {
        let mut session = session();
        session.set_on_alert(true);
        let json = session.save_data().to_json().unwrap();

        let data = SaveData::from_json(&json).unwrap();
        assert_eq!(data.alert_level, AlertLevelId::EMERGENCY);

        let mut restored = AlertSession::new(ManagerSet::in_memory(), &AlertConfig::default());
        restored.restore(data);
        assert!(restored.on_alert());
        let policy = restored
            .get_alert_policy(AlertLevelId::NORMAL, ResourceCategory::Animal)
            .unwrap()
            .unwrap();
        assert_eq!(policy.label(), "Default animal");
    }

    #[test]
    fn test_restore_rebuilds_missing_emergency_level() {
        let full = session();
        let mut levels = full.registry().clone().into_levels();
        levels.retain(|l| l.level == AlertLevelId::NORMAL);
        let data = SaveData {
            alert_level: AlertLevelId::NORMAL,
            levels: AlertRegistry::from_levels(levels),
        };

        let mut restored = AlertSession::new(ManagerSet::in_memory(), &AlertConfig::default());
        restored.restore(data);

        let policy = restored
            .get_alert_policy(AlertLevelId::EMERGENCY, ResourceCategory::Assign)
            .unwrap();
        assert_eq!(policy.unwrap().label(), "Default assign");
        assert_eq!(restored.registry().levels().len(), 2);
    }
}
