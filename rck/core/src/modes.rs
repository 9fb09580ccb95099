//! Competition modes and the user callbacks they run

use core::fmt;

/// Entry-point type for user callbacks and mode tasks.
///
/// Every user-overridable callback takes no arguments and is run to
/// completion by a dedicated task.
pub type EntryFn = fn();

/// The five user-overridable competition callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCallback {
    Initialize,
    Autonomous,
    Opcontrol,
    Disabled,
    CompetitionInitialize,
}

impl UserCallback {
    /// All callbacks, in table order
    pub const ALL: [UserCallback; 5] = [
        UserCallback::Initialize,
        UserCallback::Autonomous,
        UserCallback::Opcontrol,
        UserCallback::Disabled,
        UserCallback::CompetitionInitialize,
    ];

    /// Symbolic name of the callback
    pub const fn name(self) -> &'static str {
        match self {
            UserCallback::Initialize => "initialize",
            UserCallback::Autonomous => "autonomous",
            UserCallback::Opcontrol => "opcontrol",
            UserCallback::Disabled => "disabled",
            UserCallback::CompetitionInitialize => "competition_initialize",
        }
    }
}

impl fmt::Display for UserCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UserCallback {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name());
    }
}

/// Competition mode the daemon can place the robot in.
///
/// `Bootstrap` is not listed here: it is the daemon's own start-up phase
/// and never owns a mode task of its own (the initialization task runs in
/// the same slot before the first transition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompMode {
    Opcontrol,
    Autonomous,
    Disabled,
    CompInit,
}

impl CompMode {
    /// The user callback a mode task executes
    pub const fn callback(self) -> UserCallback {
        match self {
            CompMode::Opcontrol => UserCallback::Opcontrol,
            CompMode::Autonomous => UserCallback::Autonomous,
            CompMode::Disabled => UserCallback::Disabled,
            CompMode::CompInit => UserCallback::CompetitionInitialize,
        }
    }

    /// Task name registered with the scheduler for this mode
    pub const fn task_name(self) -> &'static str {
        match self {
            CompMode::Opcontrol => "User Operator Control (RCK)",
            CompMode::Autonomous => "User Autonomous (RCK)",
            CompMode::Disabled => "User Disabled (RCK)",
            CompMode::CompInit => "User Comp. Init. (RCK)",
        }
    }
}

impl fmt::Display for CompMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompMode::Opcontrol => write!(f, "opcontrol"),
            CompMode::Autonomous => write!(f, "autonomous"),
            CompMode::Disabled => write!(f, "disabled"),
            CompMode::CompInit => write!(f, "competition-initialize"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CompMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CompMode::Opcontrol => defmt::write!(fmt, "opcontrol"),
            CompMode::Autonomous => defmt::write!(fmt, "autonomous"),
            CompMode::Disabled => defmt::write!(fmt, "disabled"),
            CompMode::CompInit => defmt::write!(fmt, "competition-initialize"),
        }
    }
}
