//! UI module for rendering the TUI

mod application_form;
mod components;
mod forms;
mod item_list;
mod layout;
mod loading;

use crate::app::App;
use crate::state::LoadingState;
use components::{render_editor_dialog, render_error_dialog, render_notice_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);
    application_form::draw(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Modal overlays, topmost last
    let form = &app.state.form;
    if form.vehicles.dialog().is_open() {
        render_editor_dialog(frame, form.vehicles.dialog(), form.vehicles.is_editing());
    }
    if form.dependents.dialog().is_open() {
        render_editor_dialog(frame, form.dependents.dialog(), form.dependents.is_editing());
    }
    if let Some(notice) = app.state.current_notice() {
        render_notice_dialog(frame, &notice.title, &notice.message);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}

/// Draw the start-up loading screen
pub fn draw_loading(frame: &mut Frame, loading: &LoadingState) {
    let (header_area, main_area, _) = layout::create_layout(frame.area());
    layout::draw_header(frame, header_area);
    loading::draw(frame, main_area, loading);
}
