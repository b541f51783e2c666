//! Category managers: the live side of every stored policy

use crate::core::types::{CategoryTable, ResourceCategory};
use crate::policy::{PolicyHandle, PolicyId};

/// Live configuration owner for one resource category
///
/// Hosts implement this for their work/schedule/assignment/... managers.
pub trait CategoryManager {
    /// The policy currently in effect. Must not change any state.
    fn active_policy(&self) -> PolicyHandle;

    /// Make `policy` the live configuration.
    fn load_state(&mut self, policy: &PolicyHandle);
}

/// One manager per resource category
pub struct ManagerSet {
    managers: CategoryTable<Box<dyn CategoryManager>>,
}

impl ManagerSet {
    pub fn new(managers: CategoryTable<Box<dyn CategoryManager>>) -> Self {
        Self { managers }
    }

    /// Build a set from a constructor called once per category
    pub fn from_fn(mut f: impl FnMut(ResourceCategory) -> Box<dyn CategoryManager>) -> Self {
        Self::new(CategoryTable::from_fn(&mut f))
    }

    /// In-memory managers with a single default policy each
    pub fn in_memory() -> Self {
        Self::from_fn(|category| -> Box<dyn CategoryManager> {
            Box::new(InMemoryManager::with_default(category))
        })
    }

    pub fn get(&self, category: ResourceCategory) -> &dyn CategoryManager {
        self.managers[category].as_ref()
    }

    pub fn get_mut(&mut self, category: ResourceCategory) -> &mut dyn CategoryManager {
        self.managers[category].as_mut()
    }

    pub fn active_policy(&self, category: ResourceCategory) -> PolicyHandle {
        self.get(category).active_policy()
    }

    pub fn load_state(&mut self, category: ResourceCategory, policy: &PolicyHandle) {
        self.get_mut(category).load_state(policy);
    }
}

/// Manager holding a list of named policies and which one is live
///
/// Backs the demo binary and stands in for host managers in tests.
#[derive(Debug, Clone)]
pub struct InMemoryManager {
    policies: Vec<PolicyHandle>,
    active: PolicyHandle,
    loads: usize,
}

impl InMemoryManager {
    pub fn new(active: PolicyHandle) -> Self {
        Self {
            policies: vec![active.clone()],
            active,
            loads: 0,
        }
    }

    pub fn with_default(category: ResourceCategory) -> Self {
        Self::new(PolicyHandle::new(PolicyId(0), format!("Default {}", category)))
    }

    /// Add a policy and return its handle; the live one is unchanged
    pub fn add_policy(&mut self, label: impl Into<String>) -> PolicyHandle {
        let next = self.policies.iter().map(|p| p.id().0 + 1).max().unwrap_or(0);
        let handle = PolicyHandle::new(PolicyId(next), label);
        self.policies.push(handle.clone());
        handle
    }

    /// Switch the live policy, as a player would from the UI
    pub fn select(&mut self, id: PolicyId) -> Option<PolicyHandle> {
        let handle = self.policies.iter().find(|p| p.id() == id)?.clone();
        self.active = handle.clone();
        Some(handle)
    }

    pub fn policies(&self) -> &[PolicyHandle] {
        &self.policies
    }

    /// Number of `load_state` calls received
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl CategoryManager for InMemoryManager {
    fn active_policy(&self) -> PolicyHandle {
        self.active.clone()
    }

    fn load_state(&mut self, policy: &PolicyHandle) {
        self.loads += 1;
        if !self.policies.iter().any(|p| p == policy) {
            self.policies.push(policy.clone());
        }
        self.active = policy.clone();
    }
}
