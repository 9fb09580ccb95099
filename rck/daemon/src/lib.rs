#![cfg_attr(not(feature = "std"), no_std)]

//! # RCK Competition Daemon
//!
//! The top-level control loop of the kernel. [`KernelContext`] owns the
//! reload table and the resolved callback bindings; [`CompetitionDaemon`]
//! polls the competition-control link once per 2ms tick, runs the
//! background service step every tick, and drives the single mode-task
//! slot through the transition rules in [`transition`].
//!
//! The daemon has no failure path. Status masks are externally validated,
//! callback bindings can never be null, and task storage is reserved up
//! front, so the loop neither returns nor reports errors.

pub mod context;
pub mod daemon;
pub mod transition;

pub use context::*;
pub use daemon::*;
pub use transition::*;
