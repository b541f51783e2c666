//! Task queue and execution

use crate::core::types::Tick;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A unit of work an actor is doing or will do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub label: String,
    pub priority: TaskPriority,
    pub created_tick: Tick,
    /// Whether a player order may cut this task short
    pub interruptible: bool,
    pub source: TaskSource,
}

/// Task priority levels with explicit ordering values
///
/// Higher numeric value = higher priority.
/// This ordering is relied upon by TaskQueue::push for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TaskPriority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSource {
    PlayerCommand,
    Autonomous,
}

/// How a task stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobCondition {
    Succeeded,
    InterruptForced,
}

impl Task {
    pub fn new(label: impl Into<String>, priority: TaskPriority, tick: Tick) -> Self {
        Self {
            label: label.into(),
            priority,
            created_tick: tick,
            interruptible: true,
            source: TaskSource::Autonomous,
        }
    }

    pub fn from_player(mut self) -> Self {
        self.source = TaskSource::PlayerCommand;
        self
    }

    pub fn uninterruptible(mut self) -> Self {
        self.interruptible = false;
        self
    }
}

/// Queue of tasks for an actor
///
/// `prioritized` is a player-forced order that runs ahead of everything in
/// `queued` once the current task ends.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    current: Option<Task>,
    prioritized: Option<Task>,
    queued: VecDeque<Task>,
    last_ended: Option<(Task, JobCondition)>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Task> {
        self.current.as_ref()
    }

    pub fn prioritized(&self) -> Option<&Task> {
        self.prioritized.as_ref()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Most recently ended task and how it ended
    pub fn last_ended(&self) -> Option<&(Task, JobCondition)> {
        self.last_ended.as_ref()
    }

    pub fn push(&mut self, task: Task) {
        let pos = self
            .queued
            .iter()
            .position(|t| task.priority as u8 > t.priority as u8)
            .unwrap_or(self.queued.len());
        self.queued.insert(pos, task);

        if self.current.is_none() {
            self.current = self.next();
        }
    }

    /// Force `task` ahead of the queue, as a player right-click order does
    pub fn prioritize(&mut self, task: Task) {
        let task = task.from_player();
        if self.current.is_none() {
            self.current = Some(task);
        } else {
            self.prioritized = Some(task);
        }
    }

    fn next(&mut self) -> Option<Task> {
        self.prioritized.take().or_else(|| self.queued.pop_front())
    }

    /// End the current task and start the next one
    pub fn end_current(&mut self, condition: JobCondition) -> Option<&Task> {
        if let Some(task) = self.current.take() {
            self.last_ended = Some((task, condition));
        }
        self.current = self.next();
        self.current.as_ref()
    }

    pub fn clear_prioritized_and_queue(&mut self) {
        self.prioritized = None;
        self.queued.clear();
    }

    pub fn clear_queued(&mut self) {
        self.queued.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.prioritized.is_none() && self.queued.is_empty()
    }
}
