//! Vehicle and dependent list panels

use crate::state::{ItemForm, ItemList, ListEntry};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a list panel; `error` is shown under the rows
pub fn draw<F>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &ItemList<F>,
    is_focused: bool,
    error: Option<String>,
) where
    F: ItemForm,
    F::Item: ListEntry,
{
    let count = match list.capacity() {
        Some(max) => format!("{}/{}", list.len(), max),
        None => list.len().to_string(),
    };
    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {title} ({count}) "))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Error
            Constraint::Length(1), // Actions
        ])
        .split(inner);

    let mut lines = Vec::new();
    if list.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing added yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (index, (_, item)) in list.entries().iter().enumerate() {
        let is_selected = is_focused && index == list.selected_index();
        let marker = if is_selected { "▸ " } else { "  " };
        let primary_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(item.primary(), primary_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", item.secondary()),
            Style::default().fg(Color::Gray),
        )));
    }
    // Keep the selection in view
    let visible_rows = chunks[0].height as usize;
    let selected_bottom = (list.selected_index() + 1) * 2;
    let scroll = selected_bottom.saturating_sub(visible_rows) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[0]);

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
            chunks[1],
        );
    }

    let key_style = |enabled: bool| {
        if enabled && is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let has_rows = !list.is_empty();
    let actions = Line::from(vec![
        Span::styled("[a] Add", key_style(list.can_add())),
        Span::raw("  "),
        Span::styled("[e] Edit", key_style(has_rows)),
        Span::raw("  "),
        Span::styled("[d] Delete", key_style(has_rows)),
    ]);
    frame.render_widget(Paragraph::new(actions), chunks[2]);
}
