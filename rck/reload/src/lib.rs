#![cfg_attr(not(feature = "std"), no_std)]

//! # RCK Hot Reload
//!
//! A freshly compiled user program replaces its entry points in a running
//! kernel through an explicit handoff: the hot binary describes itself as
//! a [`HotImage`], the kernel validates its [`ReloadHeader`] and installs
//! its entries into the persistent [`ReloadTable`], and the resolution
//! layer binds each user callback once to either the table override or the
//! statically linked default.
//!
//! Install is all or nothing. A header mismatch clears the whole table, so
//! every callback falls back to its default; a match replaces every slot
//! wholesale. The table never holds a partial mix of the two.

pub mod image;
pub mod resolve;
pub mod table;

pub use image::*;
pub use resolve::*;
pub use table::*;
