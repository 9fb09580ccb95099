//! One-shot binding of user callbacks to overrides or defaults

use core::fmt;

use rck_core::{EntryFn, UserCallback};

use crate::table::{EntrySlot, ReloadTable};

/// Statically linked fallbacks used when no reload override is present.
///
/// Each does nothing; a robot with no user program for a mode simply
/// idles through it.
pub mod defaults {
    pub fn initialize() {}
    pub fn autonomous() {}
    pub fn opcontrol() {}
    pub fn disabled() {}
    pub fn competition_initialize() {}
}

/// The one compile-time list pairing every user callback with its
/// statically linked default. Resolution walks this list; nothing else
/// enumerates the callbacks.
pub const CALLBACKS: [(UserCallback, EntryFn); 5] = [
    (UserCallback::Initialize, defaults::initialize),
    (UserCallback::Autonomous, defaults::autonomous),
    (UserCallback::Opcontrol, defaults::opcontrol),
    (UserCallback::Disabled, defaults::disabled),
    (
        UserCallback::CompetitionInitialize,
        defaults::competition_initialize,
    ),
];

const fn callback_index(callback: UserCallback) -> usize {
    match callback {
        UserCallback::Initialize => 0,
        UserCallback::Autonomous => 1,
        UserCallback::Opcontrol => 2,
        UserCallback::Disabled => 3,
        UserCallback::CompetitionInitialize => 4,
    }
}

const fn canonical_slot(callback: UserCallback) -> EntrySlot {
    match callback {
        UserCallback::Initialize => EntrySlot::Initialize,
        UserCallback::Autonomous => EntrySlot::Autonomous,
        UserCallback::Opcontrol => EntrySlot::Opcontrol,
        UserCallback::Disabled => EntrySlot::Disabled,
        UserCallback::CompetitionInitialize => EntrySlot::CompetitionInitialize,
    }
}

/// How one callback is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The statically linked default runs
    Default,
    /// A reload-table entry runs instead
    Overridden(EntryFn),
}

impl Dispatch {
    pub const fn is_overridden(self) -> bool {
        matches!(self, Dispatch::Overridden(_))
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dispatch::Default => "default",
            Dispatch::Overridden(_) => "overridden",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Dispatch {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Dispatch::Default => defmt::write!(fmt, "default"),
            Dispatch::Overridden(_) => defmt::write!(fmt, "overridden"),
        }
    }
}

/// The five bindings, computed once against an installed (or cleared)
/// table and never re-evaluated.
///
/// [`entry`] can never yield a null callback: every binding is either a
/// table entry captured at resolution time or the default from
/// [`CALLBACKS`].
///
/// For `initialize` the canonical slot wins over the alternate-linkage
/// slot; either way the daemon only ever calls the resolved canonical
/// entry.
///
/// [`entry`]: ResolvedCallbacks::entry
pub struct ResolvedCallbacks {
    bindings: [Dispatch; 5],
}

impl ResolvedCallbacks {
    /// Bind every callback against the table's current contents
    pub fn resolve(table: &ReloadTable) -> Self {
        let mut bindings = [Dispatch::Default; 5];
        for (callback, _) in CALLBACKS {
            let mut entry = table.entry(canonical_slot(callback));
            if entry.is_none() && callback == UserCallback::Initialize {
                entry = table.entry(EntrySlot::InitializeAlt);
            }
            if let Some(f) = entry {
                bindings[callback_index(callback)] = Dispatch::Overridden(f);
            }
        }
        ResolvedCallbacks { bindings }
    }

    /// The cached binding for a callback
    pub fn dispatch(&self, callback: UserCallback) -> Dispatch {
        self.bindings[callback_index(callback)]
    }

    /// The function the daemon runs for a callback
    pub fn entry(&self, callback: UserCallback) -> EntryFn {
        match self.dispatch(callback) {
            Dispatch::Overridden(f) => f,
            Dispatch::Default => CALLBACKS[callback_index(callback)].1,
        }
    }
}

impl Default for ResolvedCallbacks {
    /// All-default bindings, as resolution over an empty table yields
    fn default() -> Self {
        ResolvedCallbacks {
            bindings: [Dispatch::Default; 5],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_list_is_in_index_order() {
        for (i, (callback, _)) in CALLBACKS.iter().enumerate() {
            assert_eq!(callback_index(*callback), i);
        }
    }

    #[test]
    fn empty_table_resolves_every_callback_to_default() {
        let table = ReloadTable::new();
        let resolved = ResolvedCallbacks::resolve(&table);
        for (callback, default) in CALLBACKS {
            assert_eq!(resolved.dispatch(callback), Dispatch::Default);
            assert_eq!(resolved.entry(callback), default);
        }
    }

    #[test]
    fn table_entry_overrides_its_callback_only() {
        fn hot_opcontrol() {}
        let mut table = ReloadTable::new();
        table.set_entry(EntrySlot::Opcontrol, Some(hot_opcontrol));

        let resolved = ResolvedCallbacks::resolve(&table);
        assert_eq!(
            resolved.entry(UserCallback::Opcontrol),
            hot_opcontrol as EntryFn
        );
        assert!(!resolved.dispatch(UserCallback::Autonomous).is_overridden());
        assert!(!resolved.dispatch(UserCallback::Disabled).is_overridden());
    }

    #[test]
    fn alternate_initializer_fills_an_empty_canonical_slot() {
        fn alt_init() {}
        let mut table = ReloadTable::new();
        table.set_entry(EntrySlot::InitializeAlt, Some(alt_init));

        let resolved = ResolvedCallbacks::resolve(&table);
        assert_eq!(resolved.entry(UserCallback::Initialize), alt_init as EntryFn);
    }

    #[test]
    fn canonical_initializer_wins_over_the_alternate() {
        fn canonical_init() {}
        fn alt_init() {}
        let mut table = ReloadTable::new();
        table.set_entry(EntrySlot::Initialize, Some(canonical_init));
        table.set_entry(EntrySlot::InitializeAlt, Some(alt_init));

        let resolved = ResolvedCallbacks::resolve(&table);
        assert_eq!(
            resolved.entry(UserCallback::Initialize),
            canonical_init as EntryFn
        );
    }

    #[test]
    fn resolution_is_a_snapshot_not_a_live_view() {
        fn late_entry() {}
        let mut table = ReloadTable::new();
        let resolved = ResolvedCallbacks::resolve(&table);

        table.set_entry(EntrySlot::Autonomous, Some(late_entry));
        assert_eq!(resolved.dispatch(UserCallback::Autonomous), Dispatch::Default);
    }
}
