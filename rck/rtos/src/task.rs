//! Task vocabulary types shared with the underlying RTOS

use core::fmt;
use rck_core::config::TASK_STACK_DEPTH;
use rck_core::EntryFn;

/// Opaque handle to a scheduler task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u32);

impl TaskHandle {
    /// Create a handle from a raw scheduler identifier
    pub const fn from_raw(raw: u32) -> Self {
        TaskHandle(raw)
    }

    /// Get the raw scheduler identifier
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task#{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TaskHandle {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Task#{}", self.0);
    }
}

/// Scheduler state of a task, as reported by the RTOS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Currently executing on the CPU
    Running,
    /// Runnable, waiting for the CPU
    Ready,
    /// Waiting on a delay, notification, or mutex
    Blocked,
    /// Explicitly suspended
    Suspended,
    /// Deleted and awaiting reclamation
    Deleted,
    /// Handle does not name a live task
    Invalid,
}

impl TaskState {
    /// Whether a task in this state may be deleted by the daemon.
    ///
    /// Only live-but-not-running states qualify. `Running` never occurs
    /// for a mode task observed from the daemon (the daemon itself holds
    /// the CPU at that point), and deleting a `Deleted`/`Invalid` handle
    /// is a scheduler fault.
    pub const fn is_deletable(self) -> bool {
        matches!(self, TaskState::Ready | TaskState::Blocked | TaskState::Suspended)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Running => "running",
            TaskState::Ready => "ready",
            TaskState::Blocked => "blocked",
            TaskState::Suspended => "suspended",
            TaskState::Deleted => "deleted",
            TaskState::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TaskState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TaskState::Running => defmt::write!(fmt, "running"),
            TaskState::Ready => defmt::write!(fmt, "ready"),
            TaskState::Blocked => defmt::write!(fmt, "blocked"),
            TaskState::Suspended => defmt::write!(fmt, "suspended"),
            TaskState::Deleted => defmt::write!(fmt, "deleted"),
            TaskState::Invalid => defmt::write!(fmt, "invalid"),
        }
    }
}

/// What a spawned task runs.
///
/// The RTOS-side task wrapper invokes `entry` to completion; if
/// `notify_on_exit` is set, it then notifies that handle before the task
/// deletes itself. The initialization task uses the notification to tell
/// the daemon that bootstrap may end.
#[derive(Debug, Clone, Copy)]
pub struct Job {
    pub entry: EntryFn,
    pub notify_on_exit: Option<TaskHandle>,
}

impl Job {
    /// A job that runs `entry` and exits silently
    pub const fn new(entry: EntryFn) -> Self {
        Job {
            entry,
            notify_on_exit: None,
        }
    }

    /// A job that notifies `target` once `entry` has returned
    pub const fn notifying(entry: EntryFn, target: TaskHandle) -> Self {
        Job {
            entry,
            notify_on_exit: Some(target),
        }
    }
}

/// Statically reserved backing store for one task.
///
/// The scheduler never allocates: every task the kernel creates is placed
/// in storage like this, reserved for the whole kernel lifetime and
/// reused across task replacements.
pub struct TaskStorage {
    _stack: [usize; TASK_STACK_DEPTH],
}

impl TaskStorage {
    /// Reserve zeroed storage
    pub const fn new() -> Self {
        TaskStorage {
            _stack: [0; TASK_STACK_DEPTH],
        }
    }
}

impl Default for TaskStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletable_states() {
        assert!(TaskState::Ready.is_deletable());
        assert!(TaskState::Blocked.is_deletable());
        assert!(TaskState::Suspended.is_deletable());
        assert!(!TaskState::Running.is_deletable());
        assert!(!TaskState::Deleted.is_deletable());
        assert!(!TaskState::Invalid.is_deletable());
    }

    #[test]
    fn job_notification_target() {
        fn entry() {}
        let daemon = TaskHandle::from_raw(1);
        assert!(Job::new(entry).notify_on_exit.is_none());
        assert_eq!(Job::notifying(entry, daemon).notify_on_exit, Some(daemon));
    }
}
