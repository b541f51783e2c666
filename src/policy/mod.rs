//! Opaque policy handles and the managers that own them

pub mod manager;

pub use manager::{CategoryManager, InMemoryManager, ManagerSet};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier of a policy within its category manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub u32);

/// Serialized form of a policy handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub id: PolicyId,
    pub label: String,
}

/// Shared, immutable reference to a policy owned by a category manager
///
/// The registry stores handles but never looks inside them. Cloning a
/// handle shares the snapshot, so two alert levels can point at the same
/// policy without either being able to change it under the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "PolicySnapshot", into = "PolicySnapshot")]
pub struct PolicyHandle(Arc<PolicySnapshot>);

impl PolicyHandle {
    pub fn new(id: PolicyId, label: impl Into<String>) -> Self {
        Self(Arc::new(PolicySnapshot {
            id,
            label: label.into(),
        }))
    }

    pub fn id(&self) -> PolicyId {
        self.0.id
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    /// True when both handles share one allocation, not just one id
    pub fn same_instance(&self, other: &PolicyHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for PolicyHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for PolicyHandle {}

impl From<PolicySnapshot> for PolicyHandle {
    fn from(snapshot: PolicySnapshot) -> Self {
        Self(Arc::new(snapshot))
    }
}

impl From<PolicyHandle> for PolicySnapshot {
    fn from(handle: PolicyHandle) -> Self {
        PolicySnapshot::clone(&handle.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_instance() {
        let a = PolicyHandle::new(PolicyId(3), "Night shift");
        let b = a.clone();
        assert!(a.same_instance(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_ids_are_distinct_instances() {
        let a = PolicyHandle::new(PolicyId(3), "Night shift");
        let b = PolicyHandle::new(PolicyId(3), "Night shift");
        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
    }

    #[test]
    fn test_handle_serializes_as_snapshot() {
        let handle = PolicyHandle::new(PolicyId(7), "Hunters");
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, r#"{"id":7,"label":"Hunters"}"#);

        let back: PolicyHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), PolicyId(7));
        assert_eq!(back.label(), "Hunters");
    }
}
