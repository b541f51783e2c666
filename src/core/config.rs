//! Alert configuration
//!
//! Content-pack flags decide which optional categories take part in the
//! save/load protocol. Behaviour flags decide what happens on a transition.

use crate::core::error::{AlertError, Result};
use crate::core::types::ResourceCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which optional categories apply in the current run
///
/// Hosts may flip these at any time, e.g. after loading a save made without
/// a content pack. The registry re-reads them on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFlags {
    /// Mechanoid content pack is active
    pub mech: bool,
    /// Weapon assignment integration is available
    pub weapons: bool,
    /// Robot content pack is available
    pub robots: bool,
    /// The work tab is owned by another mod, so work policies are left alone
    pub work_integration_disabled: bool,
}

impl ContentFlags {
    pub fn all() -> Self {
        Self {
            mech: true,
            weapons: true,
            robots: true,
            work_integration_disabled: false,
        }
    }

    /// Whether the category's content exists in this run
    ///
    /// Mandatory categories always exist.
    pub fn content_active(&self, category: ResourceCategory) -> bool {
        match category {
            ResourceCategory::Mech => self.mech,
            ResourceCategory::Weapons => self.weapons,
            ResourceCategory::Robots => self.robots,
            ResourceCategory::Work
            | ResourceCategory::Restrict
            | ResourceCategory::Assign
            | ResourceCategory::Animal => true,
        }
    }

    /// Whether the category takes part in bulk save/load
    pub fn syncs(&self, category: ResourceCategory) -> bool {
        match category {
            ResourceCategory::Work => !self.work_integration_disabled,
            other => self.content_active(other),
        }
    }
}

/// What an alert transition does beyond swapping policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourConfig {
    /// Force-end interruptible tasks of free colonists when raising an alert
    pub interrupt_on_alert: bool,
    /// `tracing` filter directive used by the binary
    pub log_filter: String,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            interrupt_on_alert: true,
            log_filter: "colony_alert=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default)]
    pub content: ContentFlags,
    #[serde(default)]
    pub behaviour: BehaviourConfig,
}

impl AlertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AlertConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.behaviour.log_filter.trim().is_empty() {
            return Err(AlertError::Config("log_filter must not be empty".into()));
        }
        tracing_subscriber::EnvFilter::try_new(&self.behaviour.log_filter).map_err(|e| {
            AlertError::Config(format!(
                "log_filter {:?} is not a valid directive: {}",
                self.behaviour.log_filter, e
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AlertConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.behaviour.interrupt_on_alert);
        assert!(!config.content.mech);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = AlertConfig::from_toml_str(
            r#"
            [content]
            mech = true
            work_integration_disabled = true
            "#,
        )
        .expect("partial config should parse");

        assert!(config.content.mech);
        assert!(!config.content.weapons);
        assert!(config.content.work_integration_disabled);
        assert_eq!(config.behaviour, BehaviourConfig::default());
    }

    #[test]
    fn test_empty_log_filter_rejected() {
        let result = AlertConfig::from_toml_str(
            r#"
            [behaviour]
            log_filter = "  "
            "#,
        );
        assert!(matches!(result, Err(AlertError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = AlertConfig::from_toml_str("[content\nmech = ");
        assert!(matches!(result, Err(AlertError::TomlError(_))));
    }

    #[test]
    fn test_sync_gating() {
        let mut flags = ContentFlags::default();
        assert!(flags.syncs(ResourceCategory::Work));
        assert!(flags.syncs(ResourceCategory::Animal));
        assert!(!flags.syncs(ResourceCategory::Robots));

        flags.work_integration_disabled = true;
        flags.robots = true;
        assert!(!flags.syncs(ResourceCategory::Work));
        assert!(flags.content_active(ResourceCategory::Work));
        assert!(flags.syncs(ResourceCategory::Robots));
    }
}
