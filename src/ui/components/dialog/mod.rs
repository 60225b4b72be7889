//! Dialog components for TUI

mod base;
mod editor_dialog;
mod message_dialog;

pub use base::centered_rect;
pub use editor_dialog::render_editor_dialog;
pub use message_dialog::{render_error_dialog, render_notice_dialog};
