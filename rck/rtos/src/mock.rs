//! Scripted in-memory RTOS and platform for host-side tests
//!
//! [`MockRtos`] implements both seam traits against a single event
//! journal, so tests can assert not just how often the kernel called the
//! platform but in what order.

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use heapless::Vec;
use rck_core::{CompStatus, Duration, Instant, Priority};

use crate::api::{RtosApi, SystemServices};
use crate::task::{Job, TaskHandle, TaskState, TaskStorage};

/// Upper bound on journal entries a single test can record
pub const JOURNAL_CAPACITY: usize = 1024;

const MAX_TASKS: usize = 16;

/// One observed call into the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEvent {
    Spawn {
        handle: TaskHandle,
        priority: Priority,
        name: &'static str,
    },
    Delete(TaskHandle),
    Notify(TaskHandle),
    SuspendAll,
    ResumeAll,
    LockDevices,
    UnlockDevices,
    FlushSerial,
    VendorBackground,
    DeviceBackground,
    StatusPoll,
}

struct TaskRecord {
    handle: TaskHandle,
    job: Job,
    state: TaskState,
}

struct Inner {
    clock: Instant,
    next_handle: u32,
    tasks: Vec<TaskRecord, MAX_TASKS>,
    journal: Vec<MockEvent, JOURNAL_CAPACITY>,
    pending_notifications: u32,
    scripted_notification: Option<u32>,
    status: CompStatus,
    serial_busy: bool,
}

impl Inner {
    fn record(&mut self, event: MockEvent) {
        self.journal.push(event).expect("mock journal overflow");
    }

    fn task_mut(&mut self, handle: TaskHandle) -> Option<&mut TaskRecord> {
        self.tasks.iter_mut().find(|t| t.handle == handle)
    }
}

/// Scripted mock implementing [`RtosApi`] and [`SystemServices`].
///
/// The calling test thread always counts as the daemon task
/// ([`MockRtos::DAEMON`]); spawned tasks do not run until the test
/// completes them explicitly with [`complete_task`].
///
/// [`complete_task`]: MockRtos::complete_task
pub struct MockRtos {
    inner: Mutex<RefCell<Inner>>,
}

impl MockRtos {
    /// Handle the mock reports for the calling task
    pub const DAEMON: TaskHandle = TaskHandle::from_raw(0);

    /// A fresh mock: empty journal, clock at zero, empty status
    pub fn new() -> Self {
        MockRtos {
            inner: Mutex::new(RefCell::new(Inner {
                clock: Instant::ZERO,
                next_handle: 1,
                tasks: Vec::new(),
                journal: Vec::new(),
                pending_notifications: 0,
                scripted_notification: None,
                status: CompStatus::NONE,
                serial_busy: false,
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Script the status the next polls will observe
    pub fn set_status(&self, status: CompStatus) {
        self.with(|inner| inner.status = status);
    }

    /// Script whether the serial transmitter reports `WouldBlock`
    pub fn set_serial_busy(&self, busy: bool) {
        self.with(|inner| inner.serial_busy = busy);
    }

    /// Script a notification that arrives after `waits` timed-out waits.
    ///
    /// The next `waits` calls to [`notify_take`] time out as usual; the
    /// call after that succeeds.
    ///
    /// [`notify_take`]: RtosApi::notify_take
    pub fn script_notification_after(&self, waits: u32) {
        self.with(|inner| inner.scripted_notification = Some(waits));
    }

    /// Force a spawned task into a specific scheduler state
    pub fn set_task_state(&self, task: TaskHandle, state: TaskState) {
        self.with(|inner| {
            if let Some(record) = inner.task_mut(task) {
                record.state = state;
            }
        });
    }

    /// Run a spawned task to completion: invoke its entry, deliver its
    /// exit notification if it has one, and mark it deleted.
    pub fn complete_task(&self, task: TaskHandle) {
        let job = self.with(|inner| inner.task_mut(task).map(|record| record.job));
        let Some(job) = job else { return };

        // Entry runs outside the mock lock so it may call back in.
        (job.entry)();

        if let Some(target) = job.notify_on_exit {
            self.notify(target);
        }
        self.with(|inner| {
            if let Some(record) = inner.task_mut(task) {
                record.state = TaskState::Deleted;
            }
        });
    }

    /// Copy of the journal so far
    pub fn events(&self) -> Vec<MockEvent, JOURNAL_CAPACITY> {
        self.with(|inner| inner.journal.clone())
    }

    /// Number of journal entries matching a predicate
    pub fn count_matching(&self, f: impl Fn(&MockEvent) -> bool) -> usize {
        self.with(|inner| inner.journal.iter().filter(|e| f(e)).count())
    }

    /// Drop everything recorded so far, keeping task and clock state
    pub fn clear_journal(&self) {
        self.with(|inner| inner.journal.clear());
    }

    /// Tasks the scheduler still considers live
    pub fn live_task_count(&self) -> usize {
        self.with(|inner| {
            inner
                .tasks
                .iter()
                .filter(|t| !matches!(t.state, TaskState::Deleted | TaskState::Invalid))
                .count()
        })
    }
}

impl Default for MockRtos {
    fn default() -> Self {
        Self::new()
    }
}

impl RtosApi for MockRtos {
    fn now(&self) -> Instant {
        self.with(|inner| inner.clock)
    }

    fn delay(&self, duration: Duration) {
        self.with(|inner| inner.clock = inner.clock.wrapping_add(duration));
    }

    fn delay_until(&self, deadline: &mut Instant, period: Duration) {
        let next = deadline.wrapping_add(period);
        *deadline = next;
        self.with(|inner| {
            if next.as_millis() > inner.clock.as_millis() {
                inner.clock = next;
            }
        });
    }

    fn suspend_all(&self) {
        self.with(|inner| inner.record(MockEvent::SuspendAll));
    }

    fn resume_all(&self) {
        self.with(|inner| inner.record(MockEvent::ResumeAll));
    }

    fn current_task(&self) -> TaskHandle {
        Self::DAEMON
    }

    fn task_spawn_static(
        &self,
        job: Job,
        priority: Priority,
        name: &'static str,
        _storage: &mut TaskStorage,
    ) -> TaskHandle {
        self.with(|inner| {
            let handle = TaskHandle::from_raw(inner.next_handle);
            inner.next_handle += 1;
            inner
                .tasks
                .push(TaskRecord {
                    handle,
                    job,
                    state: TaskState::Ready,
                })
                .map_err(|_| ())
                .expect("mock task table full");
            inner.record(MockEvent::Spawn {
                handle,
                priority,
                name,
            });
            handle
        })
    }

    fn task_delete(&self, task: TaskHandle) {
        self.with(|inner| {
            if let Some(record) = inner.task_mut(task) {
                record.state = TaskState::Deleted;
            }
            inner.record(MockEvent::Delete(task));
        });
    }

    fn task_state(&self, task: TaskHandle) -> TaskState {
        self.with(|inner| {
            inner
                .tasks
                .iter()
                .find(|t| t.handle == task)
                .map(|t| t.state)
                .unwrap_or(TaskState::Invalid)
        })
    }

    fn notify_take(&self, timeout: Duration) -> bool {
        self.with(|inner| {
            if inner.pending_notifications > 0 {
                inner.pending_notifications -= 1;
                return true;
            }
            match inner.scripted_notification {
                Some(0) => {
                    inner.scripted_notification = None;
                    true
                }
                Some(waits) => {
                    inner.scripted_notification = Some(waits - 1);
                    inner.clock = inner.clock.wrapping_add(timeout);
                    false
                }
                None => {
                    inner.clock = inner.clock.wrapping_add(timeout);
                    false
                }
            }
        })
    }

    fn notify(&self, task: TaskHandle) {
        self.with(|inner| {
            if task == Self::DAEMON {
                inner.pending_notifications += 1;
            }
            inner.record(MockEvent::Notify(task));
        });
    }
}

impl SystemServices for MockRtos {
    fn competition_status(&self) -> CompStatus {
        self.with(|inner| {
            inner.record(MockEvent::StatusPoll);
            inner.status
        })
    }

    fn flush_serial(&self) -> nb::Result<(), Infallible> {
        self.with(|inner| {
            inner.record(MockEvent::FlushSerial);
            if inner.serial_busy {
                Err(nb::Error::WouldBlock)
            } else {
                Ok(())
            }
        })
    }

    fn vendor_background(&self) {
        self.with(|inner| inner.record(MockEvent::VendorBackground));
    }

    fn device_background(&self) {
        self.with(|inner| inner.record(MockEvent::DeviceBackground));
    }

    fn lock_all_devices(&self) {
        self.with(|inner| inner.record(MockEvent::LockDevices));
    }

    fn unlock_all_devices(&self) {
        self.with(|inner| inner.record(MockEvent::UnlockDevices));
    }
}
