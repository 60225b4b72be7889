//! Vehicle/dependent editor dialog

use super::base::centered_rect;
use crate::state::{EditorButton, EditorDialog, Form, ItemForm};
use crate::ui::components::button::{render_button, BUTTON_HEIGHT};
use crate::ui::forms::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear},
    Frame,
};

const DIALOG_WIDTH: u16 = 56;

/// Render an open editor dialog over the form
pub fn render_editor_dialog<F: ItemForm>(frame: &mut Frame, dialog: &EditorDialog<F>, editing: bool) {
    let fields = dialog.fields();
    let height = fields.len() as u16 * FIELD_HEIGHT + BUTTON_HEIGHT + 3;
    let area = centered_rect(frame.area(), DIALOG_WIDTH, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(if editing {
            format!(" {} (editing) ", F::TITLE)
        } else {
            format!(" {} ", F::TITLE)
        })
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(block, area);

    let inner = area.inner(Margin::new(2, 1));
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in fields.iter().enumerate() {
        draw_field(frame, rows[index], field, dialog.active_field() == index);
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[fields.len()]);
    let on_buttons = dialog.is_buttons_row_active();
    let selected = dialog.selected_button();
    render_button(
        frame,
        buttons[0],
        "Close",
        on_buttons && selected == EditorButton::Close,
        true,
    );
    render_button(
        frame,
        buttons[1],
        "Save",
        on_buttons && selected == EditorButton::Save,
        dialog.can_confirm(),
    );
}
