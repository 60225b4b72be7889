//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate modifier for the save shortcut
/// - macOS: SUPER (Cmd key), Ctrl also accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SAVE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SAVE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for help text
#[cfg(target_os = "macos")]
pub const SAVE_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Whether `key` is the save shortcut
pub fn is_save_shortcut(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
        && (key.modifiers.contains(SAVE_MODIFIER) || key.modifiers.contains(KeyModifiers::CONTROL))
}
