//! Physical body state

use serde::{Deserialize, Serialize};

/// Physical state of an actor's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyState {
    /// 0.0 = none, 1.0 = incapacitating
    pub pain: f32,
    /// 0.0 = dead, 1.0 = unharmed
    pub overall_health: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyState {
    pub fn new() -> Self {
        Self {
            pain: 0.0,
            overall_health: 1.0,
        }
    }

    /// Too hurt to stand; the engine owns this actor's task lifecycle
    pub fn is_downed(&self) -> bool {
        self.overall_health <= 0.1 || self.pain >= 0.9
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.overall_health = (self.overall_health - amount).max(0.0);
        self.pain = (self.pain + amount * 0.5).min(1.0);
    }
}
