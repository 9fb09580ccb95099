//! The competition daemon control loop

use rck_core::config::{
    BOOTSTRAP_POLL, BOOT_SETTLE_DELAY, DAEMON_TASK_NAME, DAEMON_TICK, INIT_TASK_NAME,
};
use rck_core::{CompMode, CompStatus, EntryFn, Priority, UserCallback};
use rck_reload::ResolvedCallbacks;
use rck_rtos::{Job, ModeTaskSlot, RtosApi, SystemServices, TaskHandle, TaskStorage};

/// Spawn the daemon itself as a dedicated scheduler task.
///
/// The daemon outranks every user mode task so its tick deadline holds
/// even while user code spins.
pub fn spawn_daemon_task<R: RtosApi>(
    rtos: &R,
    entry: EntryFn,
    storage: &mut TaskStorage,
) -> TaskHandle {
    rtos.task_spawn_static(Job::new(entry), Priority::DAEMON, DAEMON_TASK_NAME, storage)
}

/// The top-level control loop.
///
/// Owns the single mode-task slot and the previous-status snapshot. Every
/// steady-state tick runs the background service step, polls the
/// competition link, and applies the [`decide`] rules; the slot occupant
/// is replaced only when a transition is decided.
///
/// [`decide`]: crate::transition::decide
pub struct CompetitionDaemon<'a, P> {
    platform: &'a P,
    callbacks: &'a ResolvedCallbacks,
    slot: ModeTaskSlot,
    previous: CompStatus,
}

impl<'a, P> CompetitionDaemon<'a, P>
where
    P: RtosApi + SystemServices,
{
    /// A daemon ready to bootstrap.
    ///
    /// The previous-status snapshot starts at [`CompStatus::INVALID`] so
    /// the first steady-state tick always observes a change and starts
    /// the appropriate mode task.
    pub fn new(platform: &'a P, callbacks: &'a ResolvedCallbacks) -> Self {
        CompetitionDaemon {
            platform,
            callbacks,
            slot: ModeTaskSlot::new(),
            previous: CompStatus::INVALID,
        }
    }

    /// Handle of the current mode task, if one occupies the slot
    pub fn mode_task(&self) -> Option<TaskHandle> {
        self.slot.occupant()
    }

    /// One background service step.
    ///
    /// The device-mutex set brackets the whole step. Serial output is
    /// pushed first; a busy transmitter is retried on the next tick. The
    /// scheduler suspension brackets only the vendor servicing call, the
    /// shortest section that must not run concurrently with any task.
    fn background_service(&self) {
        self.platform.lock_all_devices();
        let _ = self.platform.flush_serial();
        self.platform.suspend_all();
        self.platform.vendor_background();
        self.platform.resume_all();
        self.platform.device_background();
        self.platform.unlock_all_devices();
    }

    /// Run the bootstrap phase to completion.
    ///
    /// Holds the full device-mutex set through a short settle delay so
    /// constructor-spawned tasks stay off the hardware, then starts the
    /// user initialization task in the mode slot and keeps servicing the
    /// background step until that task's completion notification arrives.
    /// No mode transition happens before this returns.
    pub fn bootstrap(&mut self) {
        self.platform.lock_all_devices();
        self.platform.delay(BOOT_SETTLE_DELAY);
        self.platform.unlock_all_devices();

        let init = self.callbacks.entry(UserCallback::Initialize);
        let daemon = self.platform.current_task();
        self.slot.replace(
            self.platform,
            Job::notifying(init, daemon),
            Priority::DEFAULT,
            INIT_TASK_NAME,
        );

        while !self.platform.notify_take(BOOTSTRAP_POLL) {
            self.background_service();
        }
    }

    /// One steady-state tick: service step first, then the transition
    /// decision against the fresh status snapshot.
    pub fn tick(&mut self) {
        self.background_service();

        let status = self.platform.competition_status();
        if let Some(mode) = crate::transition::decide(self.previous, status) {
            self.enter_mode(mode);
        }
        self.previous = status;
    }

    fn enter_mode(&mut self, mode: CompMode) {
        let entry = self.callbacks.entry(mode.callback());
        self.slot.replace(
            self.platform,
            Job::new(entry),
            Priority::DEFAULT,
            mode.task_name(),
        );
    }

    /// Bootstrap, then loop forever on the 2ms deadline.
    ///
    /// Paced by absolute deadline rather than relative sleep, so a slow
    /// tick shortens the following sleep instead of shifting every later
    /// tick.
    pub fn run(&mut self) -> ! {
        self.bootstrap();
        let mut deadline = self.platform.now();
        loop {
            self.tick();
            self.platform.delay_until(&mut deadline, DAEMON_TICK);
        }
    }
}
