//! Modal create/edit dialog state for a single list item

use super::field::FormField;
use super::form_state::{Form, ItemForm};
use super::validation::FieldErrors;
use crate::state::entities::Identified;

/// Buttons on the dialog's last row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorButton {
    Close,
    Save,
}

/// Editor dialog wrapping an [`ItemForm`]
///
/// Opening with `None` creates, opening with an item edits it. Confirming
/// hands back the item merged with the identifier it was opened with.
#[derive(Debug, Clone)]
pub struct EditorDialog<F: ItemForm> {
    form: F,
    /// Values the dialog was opened with
    initial: Vec<String>,
    id: Option<String>,
    open: bool,
    /// Fields first, then the button row
    active_field_index: usize,
    selected_button: EditorButton,
}

impl<F: ItemForm> Default for EditorDialog<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ItemForm> EditorDialog<F> {
    pub fn new() -> Self {
        let form = F::blank();
        Self {
            initial: form.values(),
            form,
            id: None,
            open: false,
            active_field_index: 0,
            selected_button: EditorButton::Save,
        }
    }

    /// Open for `item`, replacing every field value
    pub fn open(&mut self, item: Option<&F::Item>) {
        self.form = item.map(F::from_item).unwrap_or_else(F::blank);
        self.initial = self.form.values();
        self.id = item.and_then(|i| i.id().map(str::to_string));
        self.open = true;
        self.active_field_index = 0;
        self.selected_button = EditorButton::Save;
    }

    /// Discard edits and close
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validate and, when allowed, yield the edited item and reset
    pub fn confirm(&mut self) -> Option<F::Item> {
        for field in self.form.fields_mut() {
            field.touch();
        }
        if !self.can_confirm() {
            return None;
        }
        let item = self.form.build(self.id.clone())?;
        self.reset();
        Some(item)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    #[allow(dead_code)]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn errors(&self) -> FieldErrors {
        self.form.errors()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Whether any value differs from what the dialog opened with
    pub fn is_dirty(&self) -> bool {
        self.form.values() != self.initial
    }

    pub fn can_confirm(&self) -> bool {
        self.is_valid() && self.is_dirty()
    }

    pub fn fields(&self) -> Vec<&FormField> {
        self.form.fields()
    }

    fn active_form_field(&mut self) -> Option<&mut FormField> {
        self.form.field_mut(self.active_field_index)
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.form.fields().len()
    }

    pub fn selected_button(&self) -> EditorButton {
        self.selected_button
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = match self.selected_button {
            EditorButton::Close => EditorButton::Save,
            EditorButton::Save => EditorButton::Close,
        };
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active_form_field() {
            field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active_form_field() {
            field.pop_char();
        }
    }

    pub fn next_choice(&mut self) {
        if let Some(field) = self.active_form_field() {
            field.next_choice();
        }
    }

    pub fn prev_choice(&mut self) {
        if let Some(field) = self.active_form_field() {
            field.prev_choice();
        }
    }
}

impl<F: ItemForm> Form for EditorDialog<F> {
    fn field_count(&self) -> usize {
        self.form.fields().len() + 1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        // Leaving a field marks it touched
        if let Some(field) = self.active_form_field() {
            field.touch();
        }
        self.active_field_index = index.min(self.field_count() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::entities::{Dependent, Vehicle};
    use crate::state::forms::{DependentForm, VehicleForm};

    fn civic() -> Vehicle {
        Vehicle {
            id: Some("veh-1".to_string()),
            vin: "1HGCM82633A004352".to_string(),
            year: 2003,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
        }
    }

    fn type_text(dialog: &mut EditorDialog<VehicleForm>, text: &str) {
        for c in text.chars() {
            dialog.input_char(c);
        }
    }

    fn fill_civic(dialog: &mut EditorDialog<VehicleForm>) {
        type_text(dialog, "1HGCM82633A004352");
        dialog.next_field();
        type_text(dialog, "Civic");
        dialog.next_field();
        type_text(dialog, "Honda");
    }

    #[test]
    fn test_new_is_closed() {
        let dialog = EditorDialog::<VehicleForm>::new();
        assert!(!dialog.is_open());
        assert_eq!(dialog.field_count(), 5);
    }

    #[test]
    fn test_create_confirm_yields_item_without_id() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(None);
        fill_civic(&mut dialog);
        let vehicle = dialog.confirm().expect("valid vehicle");
        assert_eq!(vehicle.id, None);
        assert_eq!(vehicle.vin, "1HGCM82633A004352");
        assert_eq!(vehicle.model, "Civic");
        assert_eq!(vehicle.make, "Honda");
        assert!(!dialog.is_open());
        assert_eq!(dialog.form().vin.as_text(), "");
    }

    #[test]
    fn test_confirm_disabled_while_invalid() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(None);
        type_text(&mut dialog, "SHORTVIN");
        assert!(!dialog.can_confirm());
        assert!(dialog.confirm().is_none());
        assert!(dialog.is_open());
        // every field now shows its error
        assert!(dialog.form().make.visible_error().is_some());
        assert_eq!(
            dialog.form().vin.visible_error(),
            Some("VIN must be exactly 17 characters".to_string())
        );
    }

    #[test]
    fn test_confirm_disabled_until_dirty() {
        let mut dialog = EditorDialog::<DependentForm>::new();
        dialog.open(None);
        assert!(!dialog.is_dirty());
        assert!(!dialog.can_confirm());
    }

    #[test]
    fn test_edit_preserves_id() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(Some(&civic()));
        assert_eq!(dialog.id(), Some("veh-1"));
        dialog.next_field();
        for _ in 0.."Civic".len() {
            dialog.backspace();
        }
        type_text(&mut dialog, "Accord");
        let vehicle = dialog.confirm().expect("valid vehicle");
        assert_eq!(vehicle.id.as_deref(), Some("veh-1"));
        assert_eq!(vehicle.model, "Accord");
    }

    #[test]
    fn test_edit_requires_a_change_before_confirm() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(Some(&civic()));
        assert!(dialog.is_valid());
        assert!(!dialog.is_dirty());
        assert!(!dialog.can_confirm());
        assert!(dialog.confirm().is_none());
        assert!(dialog.is_open());

        dialog.set_active_field(3);
        dialog.next_choice();
        assert!(dialog.can_confirm());
        dialog.prev_choice();
        assert!(!dialog.is_dirty());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(Some(&civic()));
        type_text(&mut dialog, "XYZ");
        dialog.cancel();
        assert!(!dialog.is_open());
        assert_eq!(dialog.id(), None);
        assert_eq!(dialog.form().vin.as_text(), "");
    }

    #[test]
    fn test_reopen_with_other_item_replaces_values() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(Some(&civic()));
        let mut other = civic();
        other.id = Some("veh-2".to_string());
        other.model = "Fit".to_string();
        dialog.open(Some(&other));
        assert_eq!(dialog.id(), Some("veh-2"));
        assert_eq!(dialog.form().model.as_text(), "Fit");
        dialog.open(None);
        assert_eq!(dialog.id(), None);
        assert_eq!(dialog.form().model.as_text(), "");
    }

    #[test]
    fn test_navigation_reaches_button_row() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(None);
        dialog.prev_field();
        assert!(dialog.is_buttons_row_active());
        assert_eq!(dialog.selected_button(), EditorButton::Save);
        dialog.toggle_button();
        assert_eq!(dialog.selected_button(), EditorButton::Close);
        dialog.next_field();
        assert_eq!(dialog.active_field(), 0);
    }

    #[test]
    fn test_leaving_field_touches_it() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(None);
        assert!(dialog.form().vin.visible_error().is_none());
        dialog.next_field();
        assert_eq!(
            dialog.form().vin.visible_error(),
            Some("VIN is required".to_string())
        );
    }

    #[test]
    fn test_choice_keys_on_year() {
        let mut dialog = EditorDialog::<VehicleForm>::new();
        dialog.open(Some(&civic()));
        dialog.set_active_field(3);
        dialog.next_choice();
        assert_eq!(dialog.form().year.as_text(), "2004");
        dialog.prev_choice();
        dialog.prev_choice();
        assert_eq!(dialog.form().year.as_text(), "2002");
    }

    #[test]
    fn test_dependent_edit_round_trip() {
        let mut dialog = EditorDialog::<DependentForm>::new();
        dialog.open(None);
        for c in "Ada".chars() {
            dialog.input_char(c);
        }
        dialog.next_field();
        for c in "King".chars() {
            dialog.input_char(c);
        }
        let dependent: Dependent = dialog.confirm().expect("valid dependent");
        assert_eq!(dependent.person.full_name(), "Ada King");
        assert_eq!(dependent.person.id, None);
    }
}
