//! The hot-binary seam and the table installer

use core::fmt;

use rck_core::EntryFn;

use crate::table::{EntrySlot, ReloadHeader, ReloadTable};

/// What a hot binary exposes for the kernel to install it.
///
/// The two writable regions are the image's uninitialized-data memory: a
/// short, possibly empty scratch region and the main uninitialized region.
/// Both must be zeroed in full before any function linked into the image
/// runs, because image code may rely on zero-initialized statics.
pub trait HotImage {
    /// Compatibility header the image was built with
    fn header(&self) -> ReloadHeader;

    /// Build timestamp linked into the image
    fn compile_timestamp(&self) -> &'static str;

    /// Build directory linked into the image
    fn compile_directory(&self) -> &'static str;

    /// Entry point the image links for a slot, if it defines one
    fn entry(&self, slot: EntrySlot) -> Option<EntryFn>;

    /// The image's short uninitialized scratch region
    fn scratch_region(&mut self) -> &mut [u8];

    /// The image's main uninitialized-data region
    fn uninit_region(&mut self) -> &mut [u8];

    /// Run the image's global constructor sequence
    fn run_initializers(&mut self);
}

/// Result of an install attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Header matched; the table now holds the image's entries
    Installed,
    /// Header mismatched; the table was cleared and the image untouched
    Rejected,
}

impl InstallOutcome {
    pub const fn is_installed(self) -> bool {
        matches!(self, InstallOutcome::Installed)
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallOutcome::Installed => "installed",
            InstallOutcome::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InstallOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            InstallOutcome::Installed => defmt::write!(fmt, "installed"),
            InstallOutcome::Rejected => defmt::write!(fmt, "rejected"),
        }
    }
}

/// Install a hot image's entries into the table.
///
/// A rejected header clears the table and leaves the image alone; that is
/// the normal cold-boot and incompatible-image path, not an error. A
/// matching header replaces the table wholesale:
///
/// 1. capture the image's build metadata,
/// 2. copy every entry slot,
/// 3. zero both uninitialized regions in full,
/// 4. run the image's global constructor sequence.
///
/// The zeroing must precede step 4 and any later call through a captured
/// entry. After return the table is either entirely the image's or
/// entirely empty.
pub fn install<I: HotImage>(table: &mut ReloadTable, image: &mut I) -> InstallOutcome {
    if !image.header().is_compatible() {
        table.clear();
        return InstallOutcome::Rejected;
    }

    table.set_metadata(image.compile_timestamp(), image.compile_directory());
    for slot in EntrySlot::ALL {
        table.set_entry(slot, image.entry(slot));
    }

    image.scratch_region().fill(0);
    image.uninit_region().fill(0);
    image.run_initializers();

    InstallOutcome::Installed
}
