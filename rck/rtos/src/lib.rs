#![cfg_attr(not(feature = "std"), no_std)]

//! # RCK RTOS Seam
//!
//! The kernel does not schedule tasks itself; a preemptive RTOS supplies
//! tasks, static allocation, mutexes, and tick-based delay. This crate
//! defines the traits the kernel expects from that RTOS and from the
//! vendor platform ([`RtosApi`], [`SystemServices`]), the task vocabulary
//! types, and the single-occupancy [`ModeTaskSlot`] the competition
//! daemon drives.
//!
//! With the `std` feature enabled, [`mock`] provides a scripted in-memory
//! implementation of both traits for host-side tests.

pub mod api;
pub mod slot;
pub mod task;

#[cfg(feature = "std")]
pub mod mock;

pub use api::*;
pub use slot::*;
pub use task::*;
