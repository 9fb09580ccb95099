//! Traits the kernel expects from the RTOS and the vendor platform

use core::convert::Infallible;
use rck_core::{CompStatus, Duration, Instant, Priority};

use crate::task::{Job, TaskHandle, TaskState, TaskStorage};

/// Scheduler primitives supplied by the underlying preemptive RTOS.
///
/// Task creation cannot fail: all task storage is reserved ahead of time
/// and handed back in on every spawn, so the scheduler has nothing to
/// exhaust.
pub trait RtosApi {
    /// Millisecond tick counter since scheduler start
    fn now(&self) -> Instant;

    /// Relative sleep of the calling task
    fn delay(&self, duration: Duration);

    /// Absolute-deadline sleep: advances `deadline` by `period` and sleeps
    /// until it, so a loop paced this way does not accumulate drift.
    fn delay_until(&self, deadline: &mut Instant, period: Duration);

    /// Suspend the scheduler; no other task runs until [`resume_all`]
    ///
    /// [`resume_all`]: RtosApi::resume_all
    fn suspend_all(&self);

    /// Resume the scheduler
    fn resume_all(&self);

    /// Handle of the calling task
    fn current_task(&self) -> TaskHandle;

    /// Create a task in caller-provided storage
    fn task_spawn_static(
        &self,
        job: Job,
        priority: Priority,
        name: &'static str,
        storage: &mut TaskStorage,
    ) -> TaskHandle;

    /// Delete a task unconditionally. The caller is responsible for only
    /// deleting handles in a deletable scheduler state.
    fn task_delete(&self, task: TaskHandle);

    /// Scheduler state of a task
    fn task_state(&self, task: TaskHandle) -> TaskState;

    /// Block on the calling task's notification slot. Returns `true` if a
    /// notification arrived before `timeout` elapsed.
    fn notify_take(&self, timeout: Duration) -> bool;

    /// Notify a task, unblocking its pending [`notify_take`]
    ///
    /// [`notify_take`]: RtosApi::notify_take
    fn notify(&self, task: TaskHandle);
}

/// Vendor platform services the daemon drives once per tick.
///
/// Lock ordering is fixed: the full device-mutex set brackets the entire
/// background service step, and the scheduler suspension brackets only
/// the vendor servicing call inside it.
pub trait SystemServices {
    /// Competition-control link status, polled once per tick
    fn competition_status(&self) -> CompStatus;

    /// Push buffered serial output toward the host. A busy transmitter
    /// reports `WouldBlock` and is simply retried on the next tick.
    fn flush_serial(&self) -> nb::Result<(), Infallible>;

    /// The vendor's low-level hardware servicing routine. Short,
    /// non-blocking, and safe to run with scheduling disabled.
    fn vendor_background(&self);

    /// The device subsystem's periodic servicing pass
    fn device_background(&self);

    /// Acquire every device-access mutex, serializing user device access
    /// against periodic hardware servicing
    fn lock_all_devices(&self);

    /// Release every device-access mutex
    fn unlock_all_devices(&self);
}
