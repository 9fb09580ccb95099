//! The single mode-task slot

use rck_core::Priority;

use crate::api::RtosApi;
use crate::task::{Job, TaskHandle, TaskStorage};

/// Owner of "the currently running competition-mode task".
///
/// Exactly one mode task exists at any time; the slot reuses one piece of
/// statically reserved storage for every occupant. Replacement is always
/// delete-then-create: the outgoing task is gone before its successor is
/// spawned, so two mode tasks never coexist.
pub struct ModeTaskSlot {
    storage: TaskStorage,
    occupant: Option<TaskHandle>,
}

impl ModeTaskSlot {
    /// An idle slot with its storage reserved
    pub const fn new() -> Self {
        ModeTaskSlot {
            storage: TaskStorage::new(),
            occupant: None,
        }
    }

    /// Handle of the current occupant, if any
    pub fn occupant(&self) -> Option<TaskHandle> {
        self.occupant
    }

    /// Whether a task currently occupies the slot
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Replace the occupant with a freshly created task.
    ///
    /// The outgoing task is deleted first, gated on its scheduler state:
    /// ready, blocked, or suspended tasks are deleted; a handle the
    /// scheduler already considers dead is left alone. The new task is
    /// then created in the same storage.
    pub fn replace<R: RtosApi>(
        &mut self,
        rtos: &R,
        job: Job,
        priority: Priority,
        name: &'static str,
    ) -> TaskHandle {
        if let Some(old) = self.occupant.take() {
            if rtos.task_state(old).is_deletable() {
                rtos.task_delete(old);
            }
        }
        let handle = rtos.task_spawn_static(job, priority, name, &mut self.storage);
        self.occupant = Some(handle);
        handle
    }
}

impl Default for ModeTaskSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::mock::{MockEvent, MockRtos};
    use crate::task::TaskState;

    fn entry() {}

    #[test]
    fn replace_fills_an_empty_slot_without_deleting() {
        let rtos = MockRtos::new();
        let mut slot = ModeTaskSlot::new();
        assert!(!slot.is_occupied());

        let handle = slot.replace(&rtos, Job::new(entry), Priority::DEFAULT, "first");
        assert_eq!(slot.occupant(), Some(handle));
        assert_eq!(rtos.count_matching(|e| matches!(e, MockEvent::Delete(_))), 0);
    }

    #[test]
    fn replace_deletes_the_live_occupant_before_spawning() {
        let rtos = MockRtos::new();
        let mut slot = ModeTaskSlot::new();
        let first = slot.replace(&rtos, Job::new(entry), Priority::DEFAULT, "first");

        rtos.clear_journal();
        let second = slot.replace(&rtos, Job::new(entry), Priority::DEFAULT, "second");
        assert_ne!(first, second);

        let events = rtos.events();
        assert_eq!(events[0], MockEvent::Delete(first));
        assert!(matches!(events[1], MockEvent::Spawn { .. }));
        assert_eq!(rtos.live_task_count(), 1);
    }

    #[test]
    fn dead_occupant_is_left_alone() {
        let rtos = MockRtos::new();
        let mut slot = ModeTaskSlot::new();
        let first = slot.replace(&rtos, Job::new(entry), Priority::DEFAULT, "first");
        rtos.set_task_state(first, TaskState::Deleted);

        rtos.clear_journal();
        slot.replace(&rtos, Job::new(entry), Priority::DEFAULT, "second");
        assert_eq!(rtos.count_matching(|e| matches!(e, MockEvent::Delete(_))), 0);
    }
}
