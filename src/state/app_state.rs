//! Application state types

use super::application_form::ApplicationForm;
use super::context::Notice;
use std::collections::VecDeque;

/// Main application state
#[derive(Default)]
pub struct AppState {
    /// The quote form, including both item lists and their dialogs
    pub form: ApplicationForm,
    /// Errors waiting to be acknowledged, oldest first
    errors: VecDeque<String>,
    /// Confirmations waiting to be acknowledged, oldest first
    notices: VecDeque<Notice>,
}

impl AppState {
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Queued error");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Whether a vehicle or dependent dialog is open
    pub fn dialog_open(&self) -> bool {
        self.form.vehicles.dialog().is_open() || self.form.dependents.dialog().is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod errors {
        use super::*;

        #[test]
        fn test_default_has_no_errors() {
            let state = AppState::default();
            assert!(!state.has_errors());
            assert_eq!(state.current_error(), None);
        }

        #[test]
        fn test_errors_shown_oldest_first() {
            let mut state = AppState::default();
            state.push_error("first");
            state.push_error("second");
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod notices {
        use super::*;

        #[test]
        fn test_notice_queue() {
            let mut state = AppState::default();
            state.push_notice(Notice::new("Saved", "Application saved!"));
            assert!(state.has_notices());
            assert_eq!(
                state.current_notice().map(|n| n.message.as_str()),
                Some("Application saved!")
            );
            state.dismiss_notice();
            assert!(!state.has_notices());
        }
    }

    #[test]
    fn test_dialog_open_tracks_both_lists() {
        let mut state = AppState::default();
        assert!(!state.dialog_open());
        state.form.dependents.begin_add();
        assert!(state.dialog_open());
        state.form.dependents.cancel_dialog();
        state.form.vehicles.begin_add();
        assert!(state.dialog_open());
    }
}
