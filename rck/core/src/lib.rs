#![no_std]
#![forbid(unsafe_code)]

//! # RCK Core
//!
//! Core types for the rck competition kernel: the competition status
//! bitmask, competition modes and their user callbacks, task priorities,
//! tick-based time types, and the kernel-wide configuration constants.

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub mod config;
pub mod modes;
pub mod priorities;
pub mod status;
pub mod time;

pub use modes::*;
pub use priorities::*;
pub use status::*;
pub use time::*;

/// Kernel version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the kernel
pub type KernelResult<T> = Result<T, KernelError>;

/// Error types for kernel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Priority outside the range the scheduler accepts
    InvalidPriority,
    /// Tick arithmetic overflowed
    TimeOverflow,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidPriority => write!(f, "priority outside scheduler range"),
            KernelError::TimeOverflow => write!(f, "tick arithmetic overflowed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KernelError {}

#[cfg(feature = "defmt")]
impl defmt::Format for KernelError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            KernelError::InvalidPriority => defmt::write!(fmt, "InvalidPriority"),
            KernelError::TimeOverflow => defmt::write!(fmt, "TimeOverflow"),
        }
    }
}
