//! Quote application form screen

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::{draw_field, FIELD_HEIGHT};
use super::item_list;
use crate::app::App;
use crate::state::{FormAction, FormFocus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Insurer field indices per row
const FIELD_ROWS: [&[usize]; 3] = [&[0, 1, 2], &[3, 4], &[5, 6]];

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let focus = form.focus();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Name and date of birth
            Constraint::Length(FIELD_HEIGHT),  // Street and city
            Constraint::Length(FIELD_HEIGHT),  // State and zip
            Constraint::Min(6),                // Lists
            Constraint::Length(BUTTON_HEIGHT), // Actions
        ])
        .split(area);

    let fields = form.fields();
    for (row, indices) in FIELD_ROWS.iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, indices.len() as u32); indices.len()])
            .split(chunks[row]);
        for (column, &index) in indices.iter().enumerate() {
            draw_field(
                frame,
                columns[column],
                fields[index],
                focus == FormFocus::Field(index),
            );
        }
    }

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    item_list::draw(
        frame,
        lists[0],
        "Vehicles",
        &form.vehicles,
        focus == FormFocus::Vehicles,
        form.visible_vehicles_error(),
    );
    item_list::draw(
        frame,
        lists[1],
        "Dependents",
        &form.dependents,
        focus == FormFocus::Dependents,
        None,
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Length(14),
        ])
        .split(chunks[4]);
    let on_actions = focus == FormFocus::Actions;
    let selected = form.selected_action();
    render_button(
        frame,
        buttons[1],
        "Save",
        on_actions && selected == FormAction::Save,
        form.can_save(),
    );
    render_button(
        frame,
        buttons[2],
        "Submit",
        on_actions && selected == FormAction::Submit,
        form.can_submit(),
    );
}
