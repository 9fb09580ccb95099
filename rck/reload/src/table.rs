//! The persistent handoff table and its compatibility header

use core::fmt;

use rck_core::EntryFn;

/// Marker word a hot binary places at the head of its handoff block
pub const RELOAD_MAGIC: u32 = 0x524c_5442;

/// Handoff layout revision this kernel understands.
///
/// Any change to [`EntrySlot`] ordering or to the table layout is a
/// breaking change between the cold and hot binaries and must bump this.
pub const RELOAD_ABI_VERSION: u32 = 1;

/// Compatibility header published by a hot binary.
///
/// Validated before any entry is copied; a mismatch means the image is
/// absent or built against a different kernel and the table is cleared
/// instead of installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ReloadHeader {
    pub magic: u32,
    pub abi_version: u32,
}

impl ReloadHeader {
    /// The header a hot binary built against this kernel carries
    pub const CURRENT: ReloadHeader = ReloadHeader {
        magic: RELOAD_MAGIC,
        abi_version: RELOAD_ABI_VERSION,
    };

    /// Whether this header gates an install through
    pub const fn is_compatible(self) -> bool {
        self.magic == RELOAD_MAGIC && self.abi_version == RELOAD_ABI_VERSION
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReloadHeader {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ReloadHeader {{ magic: {=u32:#x}, abi: {=u32} }}",
            self.magic,
            self.abi_version
        );
    }
}

/// Position of one entry point in the handoff table.
///
/// The discriminants are the table layout. `InitializeAlt` is the
/// alternate-linkage initializer slot; user code built under either
/// linkage convention lands in one of the two initialize slots and the
/// resolution layer picks whichever is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum EntrySlot {
    Initialize = 0,
    InitializeAlt = 1,
    Autonomous = 2,
    Opcontrol = 3,
    Disabled = 4,
    CompetitionInitialize = 5,
}

impl EntrySlot {
    /// Number of slots in the table
    pub const COUNT: usize = 6;

    /// Every slot, in table order
    pub const ALL: [EntrySlot; Self::COUNT] = [
        EntrySlot::Initialize,
        EntrySlot::InitializeAlt,
        EntrySlot::Autonomous,
        EntrySlot::Opcontrol,
        EntrySlot::Disabled,
        EntrySlot::CompetitionInitialize,
    ];

    /// Index of this slot in the entry array
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbol-like name of the entry point this slot carries
    pub const fn name(self) -> &'static str {
        match self {
            EntrySlot::Initialize => "initialize",
            EntrySlot::InitializeAlt => "initialize_alt",
            EntrySlot::Autonomous => "autonomous",
            EntrySlot::Opcontrol => "opcontrol",
            EntrySlot::Disabled => "disabled",
            EntrySlot::CompetitionInitialize => "competition_initialize",
        }
    }
}

impl fmt::Display for EntrySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EntrySlot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// The kernel-owned record of the most recent compatible reload.
///
/// Lives for the whole kernel process. Cold boot leaves it empty; each
/// compatible install overwrites it wholesale; an incompatible install
/// clears it. It is never in a state where some slots come from one
/// image and the rest from another.
pub struct ReloadTable {
    compile_timestamp: Option<&'static str>,
    compile_directory: Option<&'static str>,
    entries: [Option<EntryFn>; EntrySlot::COUNT],
}

impl ReloadTable {
    /// The cold-boot table: no metadata, every slot empty
    pub const fn new() -> Self {
        ReloadTable {
            compile_timestamp: None,
            compile_directory: None,
            entries: [None; EntrySlot::COUNT],
        }
    }

    /// Build timestamp of the installed image, if one is installed
    pub fn compile_timestamp(&self) -> Option<&'static str> {
        self.compile_timestamp
    }

    /// Build directory of the installed image, if one is installed
    pub fn compile_directory(&self) -> Option<&'static str> {
        self.compile_directory
    }

    /// Entry point currently occupying a slot
    pub fn entry(&self, slot: EntrySlot) -> Option<EntryFn> {
        self.entries[slot.index()]
    }

    /// Whether any slot currently holds an override
    pub fn has_overrides(&self) -> bool {
        self.entries.iter().any(Option::is_some)
    }

    pub(crate) fn set_metadata(
        &mut self,
        timestamp: &'static str,
        directory: &'static str,
    ) {
        self.compile_timestamp = Some(timestamp);
        self.compile_directory = Some(directory);
    }

    pub(crate) fn set_entry(&mut self, slot: EntrySlot, entry: Option<EntryFn>) {
        self.entries[slot.index()] = entry;
    }

    /// Empty every slot and drop the metadata, as on cold boot
    pub fn clear(&mut self) {
        *self = ReloadTable::new();
    }
}

impl Default for ReloadTable {
    fn default() -> Self {
        Self::new()
    }
}
