//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus an error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its validation error beneath it
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let error = field.visible_error();

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let value_span = if display_value.is_empty() && !is_active {
        Span::styled("(empty)", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(display_value, style)
    };

    // Choice fields show arrows instead of a cursor
    let cursor = if is_active && !field.is_choice() { "▌" } else { "" };

    let title = if field.is_required() {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let input = Paragraph::new(Line::from(vec![
        value_span,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(block);
    frame.render_widget(input, chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}
