//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::FormFocus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

pub fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Get Your Free Quote Today!",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(title, area);
}

/// Key hints for whatever has focus
fn get_focus_hints(app: &App) -> String {
    let form = &app.state.form;
    if app.request_in_flight().is_some() {
        return "waiting for the quote API".to_string();
    }
    if app.state.has_errors() || app.state.has_notices() {
        return "Enter/Esc: dismiss".to_string();
    }
    if app.state.dialog_open() {
        return format!("Tab: next field | ←/→: choose | {SAVE_SHORTCUT}: save | Esc: close");
    }
    let focus_hint = match form.focus() {
        FormFocus::Field(index) if form.fields()[index].is_choice() => "←/→: choose",
        FormFocus::Field(_) => "type to edit",
        FormFocus::Vehicles | FormFocus::Dependents => "↑/↓: select | a: add | e: edit | d: delete",
        FormFocus::Actions => "←/→: Save or Submit | Enter: activate",
    };
    format!("Tab/Shift+Tab: move | {focus_hint} | {SAVE_SHORTCUT}: save")
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Unsaved changes marker
    let dirty = if app.state.form.is_dirty() {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Green))
    };
    spans.push(dirty);

    if let Some(request) = app.request_in_flight() {
        spans.push(Span::styled(
            format!("{} ", request.label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        get_focus_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let hint_width = quit_hint.len() as u16;
    if area.width > hint_width {
        let hint_area = Rect {
            x: area.x + area.width - hint_width,
            y: area.y,
            width: hint_width,
            height: 1,
        };
        let hint = Paragraph::new(quit_hint)
            .style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(hint, hint_area);
    }
}
