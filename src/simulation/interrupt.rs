//! Forced interruption of free colonists when an alert is raised

use crate::entity::tasks::JobCondition;

/// What the interrupt routine needs from a host actor
pub trait Actor {
    fn clear_prioritized_work_and_queue(&mut self);
    fn is_spawned(&self) -> bool;
    fn is_downed(&self) -> bool;
    fn in_mental_state(&self) -> bool;
    fn is_drafted(&self) -> bool;
    /// Drop destination and reservation claims held by this actor
    fn release_claims(&mut self);
    fn clear_queued_jobs(&mut self);
    fn has_current_job(&self) -> bool;
    fn current_job_interruptible(&self) -> bool;
    fn end_current_job(&mut self, condition: JobCondition);

    /// Downed, broken or player-controlled actors have their task
    /// lifecycle managed by the engine
    fn engine_managed(&self) -> bool {
        self.is_downed() || self.in_mental_state() || self.is_drafted()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptReport {
    pub actors: usize,
    pub claims_released: usize,
    pub tasks_ended: usize,
}

/// Clear the queues of every actor and end whatever they are doing
///
/// Queues are always cleared. Claims are released and the current task is
/// ended only for actors the engine is not already managing.
pub fn interrupt_forced<'a, A, I>(actors: I) -> InterruptReport
where
    A: Actor + 'a,
    I: IntoIterator<Item = &'a mut A>,
{
    let mut report = InterruptReport::default();

    for actor in actors {
        report.actors += 1;
        actor.clear_prioritized_work_and_queue();

        if actor.is_spawned() && !actor.engine_managed() {
            actor.release_claims();
            report.claims_released += 1;
        }

        actor.clear_queued_jobs();

        if actor.has_current_job() && actor.current_job_interruptible() && !actor.engine_managed() {
            actor.end_current_job(JobCondition::InterruptForced);
            report.tasks_ended += 1;
        }
    }

    tracing::info!(
        actors = report.actors,
        tasks_ended = report.tasks_ended,
        "Interrupted colonists for alert"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::colonist::{Cell, Colonist, MentalState};
    use crate::entity::tasks::{Task, TaskPriority};

    fn busy_colonist(name: &str) -> Colonist {
        let mut colonist = Colonist::new(name, 0);
        colonist.assign(Task::new("build wall", TaskPriority::Normal, 0));
        colonist.assign(Task::new("haul steel", TaskPriority::Low, 0));
        colonist
            .tasks
            .prioritize(Task::new("rescue", TaskPriority::High, 0));
        colonist.claim(Cell { x: 3, y: 4 });
        colonist
    }

    #[test]
    fn test_idle_ready_colonist_is_fully_interrupted() {
        let mut colonists = vec![busy_colonist("Ada")];
        let report = interrupt_forced(colonists.iter_mut());

        let ada = &colonists[0];
        assert!(ada.tasks.is_idle());
        assert!(ada.claims.is_empty());
        let (task, condition) = ada.tasks.last_ended().unwrap();
        assert_eq!(task.label, "build wall");
        assert_eq!(*condition, JobCondition::InterruptForced);
        assert_eq!(
            report,
            InterruptReport {
                actors: 1,
                claims_released: 1,
                tasks_ended: 1
            }
        );
    }

    #[test]
    fn test_downed_colonist_keeps_task_and_claims() {
        let mut colonist = busy_colonist("Bram");
        colonist.body.take_damage(0.95);
        let mut colonists = vec![colonist];

        let report = interrupt_forced(colonists.iter_mut());

        let bram = &colonists[0];
        assert_eq!(bram.tasks.queued_len(), 0);
        assert!(bram.tasks.prioritized().is_none());
        assert_eq!(bram.tasks.current().unwrap().label, "build wall");
        assert_eq!(bram.claims.len(), 1);
        assert_eq!(report.tasks_ended, 0);
        assert_eq!(report.claims_released, 0);
    }

    #[test]
    fn test_drafted_and_broken_colonists_are_left_running() {
        let mut drafted = busy_colonist("Cato");
        drafted.drafted = true;
        let mut broken = busy_colonist("Dara");
        broken.mental_state = Some(MentalState::Wander);
        let mut colonists = vec![drafted, broken];

        let report = interrupt_forced(colonists.iter_mut());

        for colonist in &colonists {
            assert!(colonist.tasks.current().is_some());
            assert_eq!(colonist.tasks.queued_len(), 0);
        }
        assert_eq!(report.actors, 2);
        assert_eq!(report.tasks_ended, 0);
    }

    #[test]
    fn test_uninterruptible_task_survives() {
        let mut colonist = Colonist::new("Edda", 0);
        colonist.assign(Task::new("surgery", TaskPriority::Critical, 0).uninterruptible());
        colonist.claim(Cell { x: 0, y: 0 });
        let mut colonists = vec![colonist];

        let report = interrupt_forced(colonists.iter_mut());

        assert_eq!(colonists[0].tasks.current().unwrap().label, "surgery");
        assert!(colonists[0].claims.is_empty());
        assert_eq!(report.tasks_ended, 0);
    }

    #[test]
    fn test_unspawned_colonist_keeps_claims_but_ends_task() {
        let mut colonist = busy_colonist("Fenn");
        colonist.spawned = false;
        let mut colonists = vec![colonist];

        let report = interrupt_forced(colonists.iter_mut());

        assert_eq!(colonists[0].claims.len(), 1);
        assert!(colonists[0].tasks.is_idle());
        assert_eq!(report.tasks_ended, 1);
    }
}
