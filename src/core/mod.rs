pub mod config;
pub mod error;
pub mod types;

pub use config::{AlertConfig, BehaviourConfig, ContentFlags};
pub use error::{AlertError, Result};
pub use types::{ActorId, AlertLevelId, CategoryTable, ResourceCategory, Tick};
