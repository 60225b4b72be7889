//! Application state and core logic

use crate::api::{ApiError, SaveResponse, SubmitResponse};
use crate::platform::is_save_shortcut;
use crate::state::{
    AppState, Application, ApplicationContext, EditorButton, Form, FormAction, FormFocus,
    ItemForm, ItemList, ListChange, ListEntry, MAX_VEHICLES,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

/// A save or submit running off the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Save,
    Submit,
}

impl Request {
    pub fn label(self) -> &'static str {
        match self {
            Request::Save => "Saving...",
            Request::Submit => "Submitting...",
        }
    }
}

/// Response of a background request, delivered to the event loop
#[derive(Debug)]
enum RequestOutcome {
    Saved(Result<SaveResponse, ApiError>),
    Submitted(Result<SubmitResponse, ApiError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Current application plus the API and token store behind it
    pub context: ApplicationContext,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    in_flight: Option<Request>,
    outcome_tx: mpsc::UnboundedSender<RequestOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<RequestOutcome>,
}

/// Which list a key event is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListTarget {
    Vehicles,
    Dependents,
}

impl App {
    /// Create the app, loading the context's application into the form
    pub fn new(context: ApplicationContext) -> Self {
        let mut state = AppState::default();
        if let Some(application) = context.application() {
            state.form.adopt(application);
        }
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state,
            context,
            quit: false,
            status_message: None,
            in_flight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// The save or submit currently waiting for a response
    pub fn request_in_flight(&self) -> Option<Request> {
        self.in_flight
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The form is frozen until the pending response is applied
        if self.in_flight.is_some() {
            return Ok(());
        }

        // Error and notice dialogs are modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }
        if self.state.has_notices() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }

        self.status_message = None;

        if self.state.form.vehicles.dialog().is_open() {
            if let Some(change) = handle_editor_key(&mut self.state.form.vehicles, key) {
                self.state.form.on_vehicle_change(&change);
            }
            return Ok(());
        }
        if self.state.form.dependents.dialog().is_open() {
            if let Some(change) = handle_editor_key(&mut self.state.form.dependents, key) {
                self.state.form.on_dependent_change(&change);
            }
            return Ok(());
        }

        self.handle_form_key(key);
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if is_save_shortcut(&key) {
            self.save_application();
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.state.form.next_field();
                return;
            }
            KeyCode::BackTab => {
                self.state.form.prev_field();
                return;
            }
            _ => {}
        }

        match self.state.form.focus() {
            FormFocus::Field(index) => self.handle_field_key(index, key),
            FormFocus::Vehicles => self.handle_list_key(ListTarget::Vehicles, key),
            FormFocus::Dependents => self.handle_list_key(ListTarget::Dependents, key),
            FormFocus::Actions => self.handle_actions_key(key),
        }
    }

    fn handle_field_key(&mut self, index: usize, key: KeyEvent) {
        let form = &mut self.state.form;
        let is_choice = form.fields()[index].is_choice();
        match key.code {
            KeyCode::Enter | KeyCode::Down => form.next_field(),
            KeyCode::Up => form.prev_field(),
            KeyCode::Left if is_choice => form.prev_choice(),
            KeyCode::Right if is_choice => form.next_choice(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input_char(c)
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, target: ListTarget, key: KeyEvent) {
        let result = match target {
            ListTarget::Vehicles => {
                list_key(&mut self.state.form.vehicles, key).map(|change| {
                    if let Some(change) = change {
                        self.state.form.on_vehicle_change(&change);
                    }
                })
            }
            ListTarget::Dependents => {
                list_key(&mut self.state.form.dependents, key).map(|change| {
                    if let Some(change) = change {
                        self.state.form.on_dependent_change(&change);
                    }
                })
            }
        };
        if let Err(message) = result {
            self.status_message = Some(message);
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right => self.state.form.toggle_action(),
            KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter => match self.state.form.selected_action() {
                FormAction::Save => self.save_application(),
                FormAction::Submit => self.submit_application(),
            },
            _ => {}
        }
    }

    /// Send the current values to the save endpoint
    ///
    /// Validity is not required, but there must be unsaved changes.
    pub fn save_application(&mut self) {
        if !self.state.form.can_save() {
            self.status_message = Some("No changes to save".to_string());
            return;
        }
        match self.state.form.build_application(self.context.application()) {
            Ok(payload) => self.spawn_request(Request::Save, payload),
            Err(errors) => {
                self.state.form.touch_all();
                if let Some((_, message)) = errors.iter().next() {
                    self.status_message = Some(message.to_string());
                }
            }
        }
    }

    /// Finalize the application; the form resets on success
    pub fn submit_application(&mut self) {
        if !self.state.form.can_submit() {
            self.state.form.touch_all();
            self.status_message = Some("Complete the highlighted fields before submitting".to_string());
            return;
        }
        match self.state.form.build_application(self.context.application()) {
            Ok(payload) => self.spawn_request(Request::Submit, payload),
            Err(_) => self.state.form.touch_all(),
        }
    }

    fn spawn_request(&mut self, request: Request, payload: Application) {
        let api = self.context.api();
        let outcome_tx = self.outcome_tx.clone();
        self.in_flight = Some(request);
        tracing::debug!(?request, "Sending request");
        tokio::spawn(async move {
            let outcome = match request {
                Request::Save => RequestOutcome::Saved(api.save(&payload).await),
                Request::Submit => RequestOutcome::Submitted(api.submit(&payload).await),
            };
            // The receiver only goes away once the app has quit
            let _ = outcome_tx.send(outcome);
        });
    }

    /// Apply the responses of finished requests without waiting
    pub fn poll_requests(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: RequestOutcome) {
        self.in_flight = None;
        match outcome {
            RequestOutcome::Saved(result) => self.finish_save(result),
            RequestOutcome::Submitted(result) => self.finish_submit(result),
        }
    }

    fn finish_save(&mut self, result: Result<SaveResponse, ApiError>) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Save failed: {e}");
                self.push_error(format!("Failed to save application: {e}"));
                return;
            }
        };
        let result = self.context.finish_save(response);
        // Ids assigned by the API are kept even when the token write failed
        if let Some(application) = self.context.application() {
            self.state.form.adopt(application);
        }
        match result {
            Ok(notice) => self.state.push_notice(notice),
            Err(e) => {
                tracing::error!("Save failed: {e}");
                self.push_error(format!("Failed to save application: {e}"));
            }
        }
    }

    fn finish_submit(&mut self, result: Result<SubmitResponse, ApiError>) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Submit failed: {e}");
                self.push_error(format!("Failed to submit application: {e}"));
                return;
            }
        };
        let result = self.context.finish_submit(response);
        self.state.form.reset();
        match result {
            Ok(notice) => self.state.push_notice(notice),
            Err(e) => {
                tracing::error!("Submit failed: {e}");
                self.push_error(format!("Failed to submit application: {e}"));
            }
        }
    }
}

/// Keys while a list has focus; `Err` carries a status message
fn list_key<F>(list: &mut ItemList<F>, key: KeyEvent) -> Result<Option<ListChange<F::Item>>, String>
where
    F: ItemForm,
    F::Item: ListEntry,
{
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => list.move_selection_down(),
        KeyCode::Up | KeyCode::Char('k') => list.move_selection_up(),
        KeyCode::Char('a') => {
            if !list.begin_add() {
                return Err(format!("No more than {MAX_VEHICLES} vehicles available"));
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            list.begin_edit_selected();
        }
        KeyCode::Char('d') | KeyCode::Delete => return Ok(list.delete_selected()),
        _ => {}
    }
    Ok(None)
}

/// Keys while an editor dialog is open; returns the saved change, if any
fn handle_editor_key<F>(list: &mut ItemList<F>, key: KeyEvent) -> Option<ListChange<F::Item>>
where
    F: ItemForm,
    F::Item: ListEntry,
{
    if is_save_shortcut(&key) {
        return list.save_dialog();
    }
    let on_buttons = list.dialog().is_buttons_row_active();
    match key.code {
        KeyCode::Esc => list.cancel_dialog(),
        KeyCode::Tab | KeyCode::Down => list.dialog_mut().next_field(),
        KeyCode::BackTab | KeyCode::Up => list.dialog_mut().prev_field(),
        KeyCode::Enter if on_buttons => match list.dialog().selected_button() {
            EditorButton::Close => list.cancel_dialog(),
            EditorButton::Save => return list.save_dialog(),
        },
        KeyCode::Enter => list.dialog_mut().next_field(),
        KeyCode::Left | KeyCode::Right if on_buttons => list.dialog_mut().toggle_button(),
        KeyCode::Left => list.dialog_mut().prev_choice(),
        KeyCode::Right => list.dialog_mut().next_choice(),
        KeyCode::Backspace => list.dialog_mut().backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            list.dialog_mut().input_char(c)
        }
        _ => {}
    }
    None
}
