//! Kernel configuration constants

use crate::time::Duration;

/// Period of the competition daemon's steady-state loop.
///
/// The daemon paces itself on an absolute deadline, so the background
/// service step runs exactly once per period with no cumulative drift.
pub const DAEMON_TICK: Duration = Duration::from_millis(2);

/// How long the daemon blocks on the initialize-completion notification
/// before running another background service step during bootstrap.
pub const BOOTSTRAP_POLL: Duration = Duration::from_millis(2);

/// Settle delay at daemon start, held under the full device-mutex set.
///
/// Tasks created from static constructors may already be running; the
/// delay keeps them off the device registers until shared memory has been
/// copied over.
pub const BOOT_SETTLE_DELAY: Duration = Duration::from_millis(2);

/// Stack depth, in words, reserved for the mode task and the daemon task
pub const TASK_STACK_DEPTH: usize = 0x2000;

/// Scheduler name of the daemon task
pub const DAEMON_TASK_NAME: &str = "RCK System Daemon";

/// Scheduler name of the user initialization task
pub const INIT_TASK_NAME: &str = "User Initialization (RCK)";
