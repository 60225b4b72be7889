//! Error and confirmation message dialogs

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

fn dismiss_hint() -> Vec<Span<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ]
}

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            title_color: Color::Red,
            border_color: Color::Red,
            message: error_message,
            hint: Some(dismiss_hint()),
            max_width: 60,
        },
    );
}

/// Render a save or quote confirmation
pub fn render_notice_dialog(frame: &mut Frame, title: &str, message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: Color::Green,
            border_color: Color::Green,
            message,
            hint: Some(dismiss_hint()),
            max_width: 50,
        },
    );
}
