//! Colonists and the state the interrupt routine looks at

use crate::core::types::{ActorId, Tick};
use crate::entity::body::BodyState;
use crate::entity::tasks::{JobCondition, Task, TaskQueue};
use crate::simulation::interrupt::Actor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Visitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentalState {
    Berserk,
    Wander,
    Catatonic,
}

/// Map cell a colonist has reserved as a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone)]
pub struct Colonist {
    pub id: ActorId,
    pub name: String,
    pub faction: Faction,
    /// Guests and prisoners live in the player faction but are not free
    pub guest: bool,
    pub spawned: bool,
    pub drafted: bool,
    pub mental_state: Option<MentalState>,
    pub body: BodyState,
    pub tasks: TaskQueue,
    pub claims: Vec<Cell>,
    pub birth_tick: Tick,
}

impl Colonist {
    pub fn new(name: impl Into<String>, tick: Tick) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            faction: Faction::Player,
            guest: false,
            spawned: true,
            drafted: false,
            mental_state: None,
            body: BodyState::new(),
            tasks: TaskQueue::new(),
            claims: Vec::new(),
            birth_tick: tick,
        }
    }

    /// Free colonists take orders from the player
    pub fn is_free(&self) -> bool {
        self.faction == Faction::Player && !self.guest
    }

    pub fn claim(&mut self, cell: Cell) {
        if !self.claims.contains(&cell) {
            self.claims.push(cell);
        }
    }

    pub fn assign(&mut self, task: Task) {
        self.tasks.push(task);
    }
}

impl Actor for Colonist {
    fn clear_prioritized_work_and_queue(&mut self) {
        self.tasks.clear_prioritized_and_queue();
    }

    fn is_spawned(&self) -> bool {
        self.spawned
    }

    fn is_downed(&self) -> bool {
        self.body.is_downed()
    }

    fn in_mental_state(&self) -> bool {
        self.mental_state.is_some()
    }

    fn is_drafted(&self) -> bool {
        self.drafted
    }

    fn release_claims(&mut self) {
        self.claims.clear();
    }

    fn clear_queued_jobs(&mut self) {
        self.tasks.clear_queued();
    }

    fn has_current_job(&self) -> bool {
        self.tasks.current().is_some()
    }

    fn current_job_interruptible(&self) -> bool {
        self.tasks.current().is_some_and(|t| t.interruptible)
    }

    fn end_current_job(&mut self, condition: JobCondition) {
        self.tasks.end_current(condition);
    }
}
