//! Colony Alert - emergency policy registry for colony simulations
//!
//! Stores one policy per resource category for each alert level and swaps
//! them into the live category managers when the colony goes on or off alert.

pub mod core;
pub mod ecs;
pub mod entity;
pub mod policy;
pub mod registry;
pub mod session;
pub mod simulation;

pub use crate::core::{AlertConfig, AlertError, AlertLevelId, ContentFlags, ResourceCategory};
pub use policy::{CategoryManager, InMemoryManager, ManagerSet, PolicyHandle, PolicyId};
pub use registry::{AlertLevel, AlertRegistry, SaveOutcome};
pub use session::{AlertSession, SaveData, Transition};
pub use simulation::interrupt::{interrupt_forced, Actor, InterruptReport};
