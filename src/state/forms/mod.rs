//! Form domain layer
//!
//! Field value objects, validation rules, the vehicle/dependent item forms
//! and the generic editor dialog that edits them.

mod editor;
mod field;
mod form_state;
mod validation;

pub use editor::{EditorButton, EditorDialog};
pub use field::{FieldValue, FormField};
pub use form_state::{
    default_birth_date, vehicle_years, DependentForm, Form, ItemForm, VehicleForm,
};
pub use validation::{CountRule, FieldErrors, Rule};
