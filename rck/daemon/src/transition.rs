//! The per-tick mode decision

use rck_core::{CompMode, CompStatus};

/// Decide whether a status delta forces a mode change.
///
/// `None` means this tick must not disturb the running mode task. That
/// covers an unchanged status and the held-disabled case: while the
/// disabled bit stays set across both snapshots, no other bit flicker
/// restarts the disabled task.
///
/// Competition-initialize outranks everything else but requires both a
/// connection-bit toggle and a resulting status of disabled-and-connected.
/// Disabled alone turning on, with the connection bit steady, is a plain
/// transition to [`CompMode::Disabled`].
pub fn decide(previous: CompStatus, current: CompStatus) -> Option<CompMode> {
    if current == previous {
        return None;
    }
    if previous.is_disabled() && current.is_disabled() {
        return None;
    }

    let connection_toggled = current.changed_from(previous).is_connected();
    let mode = if connection_toggled && current.is_disabled() && current.is_connected() {
        CompMode::CompInit
    } else if current.is_disabled() {
        CompMode::Disabled
    } else if current.is_autonomous() {
        CompMode::Autonomous
    } else {
        CompMode::Opcontrol
    };
    Some(mode)
}
