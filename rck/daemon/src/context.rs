//! Process-wide kernel state with an explicit construction lifecycle

use rck_reload::{install, HotImage, InstallOutcome, ReloadTable, ResolvedCallbacks};
use rck_rtos::{RtosApi, SystemServices};

use crate::daemon::CompetitionDaemon;

/// The kernel's long-lived state: the reload table and the callback
/// bindings resolved against it.
///
/// Constructed exactly once at startup, before the daemon task exists.
/// Construction order is the sequencing guarantee the resolution layer
/// relies on: the table is installed or cleared first, bindings are
/// computed second, and neither is touched again for the life of the
/// process.
pub struct KernelContext {
    table: ReloadTable,
    callbacks: ResolvedCallbacks,
}

impl KernelContext {
    /// Cold boot: no hot image, empty table, every callback bound to its
    /// statically linked default.
    pub fn cold_boot() -> Self {
        let table = ReloadTable::new();
        let callbacks = ResolvedCallbacks::resolve(&table);
        KernelContext { table, callbacks }
    }

    /// Boot against a hot image: install it (or clear the table on a
    /// header mismatch), then bind every callback.
    pub fn boot<I: HotImage>(image: &mut I) -> (Self, InstallOutcome) {
        let mut table = ReloadTable::new();
        let outcome = install(&mut table, image);
        let callbacks = ResolvedCallbacks::resolve(&table);
        (KernelContext { table, callbacks }, outcome)
    }

    /// The installed reload table
    pub fn table(&self) -> &ReloadTable {
        &self.table
    }

    /// The one-shot callback bindings
    pub fn callbacks(&self) -> &ResolvedCallbacks {
        &self.callbacks
    }

    /// A daemon borrowing this context's bindings
    pub fn daemon<'a, P>(&'a self, platform: &'a P) -> CompetitionDaemon<'a, P>
    where
        P: RtosApi + SystemServices,
    {
        CompetitionDaemon::new(platform, &self.callbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rck_core::{EntryFn, UserCallback};
    use rck_reload::{defaults, EntrySlot, ReloadHeader};

    struct OneShotImage {
        header: ReloadHeader,
        scratch: [u8; 0],
        uninit: [u8; 16],
    }

    fn hot_autonomous() {}

    impl HotImage for OneShotImage {
        fn header(&self) -> ReloadHeader {
            self.header
        }

        fn compile_timestamp(&self) -> &'static str {
            "2026-08-06 08:00:00"
        }

        fn compile_directory(&self) -> &'static str {
            "/home/dev/robot"
        }

        fn entry(&self, slot: EntrySlot) -> Option<EntryFn> {
            match slot {
                EntrySlot::Autonomous => Some(hot_autonomous),
                _ => None,
            }
        }

        fn scratch_region(&mut self) -> &mut [u8] {
            &mut self.scratch
        }

        fn uninit_region(&mut self) -> &mut [u8] {
            &mut self.uninit
        }

        fn run_initializers(&mut self) {}
    }

    #[test]
    fn cold_boot_binds_every_default() {
        let context = KernelContext::cold_boot();
        assert!(!context.table().has_overrides());
        assert_eq!(
            context.callbacks().entry(UserCallback::Opcontrol),
            defaults::opcontrol as EntryFn
        );
    }

    #[test]
    fn hot_boot_binds_the_image_entries() {
        let mut image = OneShotImage {
            header: ReloadHeader::CURRENT,
            scratch: [],
            uninit: [0xff; 16],
        };
        let (context, outcome) = KernelContext::boot(&mut image);

        assert!(outcome.is_installed());
        assert_eq!(
            context.callbacks().entry(UserCallback::Autonomous),
            hot_autonomous as EntryFn
        );
        assert_eq!(
            context.callbacks().entry(UserCallback::Disabled),
            defaults::disabled as EntryFn
        );
    }

    #[test]
    fn incompatible_image_boots_cold() {
        let mut image = OneShotImage {
            header: ReloadHeader {
                magic: 0,
                abi_version: 0,
            },
            scratch: [],
            uninit: [0xff; 16],
        };
        let (context, outcome) = KernelContext::boot(&mut image);

        assert_eq!(outcome, InstallOutcome::Rejected);
        assert!(!context.table().has_overrides());
        assert_eq!(
            context.callbacks().entry(UserCallback::Autonomous),
            defaults::autonomous as EntryFn
        );
    }
}
