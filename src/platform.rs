//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for copy/save shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display
/// Ctrl+S is accepted on every platform
pub const SAVE_SHORTCUT: &str = "^S";

/// Export shortcut display
/// - macOS: "Cmd+E"
/// - Linux/Windows: "^E"
#[cfg(target_os = "macos")]
pub const EXPORT_SHORTCUT: &str = "Cmd+E";

#[cfg(not(target_os = "macos"))]
pub const EXPORT_SHORTCUT: &str = "^E";

/// Whether the key modifiers carry the platform command key (or Ctrl)
pub fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(COMMAND_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}
