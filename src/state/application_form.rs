//! Top-level quote application form
//!
//! Holds the insurer's fields plus the vehicle and dependent lists, decides
//! when Save and Submit are available, and converts between the form and the
//! `Application` payload.

use super::entities::{format_date, Application, Insurer, Person, UsState};
use super::forms::{default_birth_date, CountRule, FieldErrors, Form, FormField, Rule};
use super::item_list::{DependentList, ListChange, VehicleList, MAX_VEHICLES};

/// Number of insurer input fields
pub const INSURER_FIELD_COUNT: usize = 7;

const VEHICLE_RULES: [CountRule; 2] = [
    CountRule::AtLeast(1, "At least 1 vehicle is required"),
    CountRule::AtMost(MAX_VEHICLES, "No more than 3 vehicles available"),
];

/// What currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Vehicles,
    Dependents,
    Actions,
}

/// Buttons on the action row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    Save,
    #[default]
    Submit,
}

impl FormAction {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Save => Self::Submit,
            Self::Submit => Self::Save,
        };
    }
}

fn state_options() -> Vec<String> {
    UsState::ALL.iter().map(UsState::label).collect()
}

/// Comparable snapshot of every value in the form
#[derive(Debug, PartialEq)]
struct FormValues {
    fields: Vec<String>,
    vehicles: Vec<super::entities::Vehicle>,
    dependents: Vec<super::entities::Dependent>,
}

pub struct ApplicationForm {
    pub first_name: FormField,
    pub last_name: FormField,
    pub date_of_birth: FormField,
    pub street: FormField,
    pub city: FormField,
    pub state: FormField,
    pub zip_code: FormField,
    pub vehicles: VehicleList,
    pub dependents: DependentList,
    /// Insurer fields, then vehicles, dependents and the action row
    active_field_index: usize,
    selected_action: FormAction,
    vehicles_touched: bool,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self {
            first_name: FormField::text("first_name", "First name")
                .with_rules(vec![Rule::Required("First name is required")]),
            last_name: FormField::text("last_name", "Last name")
                .with_rules(vec![Rule::Required("Last name is required")]),
            date_of_birth: FormField::date(
                "date_of_birth",
                "Date of birth",
                default_birth_date(),
                "Date of birth is required",
            ),
            street: FormField::text("street", "Street")
                .with_rules(vec![Rule::Required("Street is required")]),
            city: FormField::text("city", "City").with_rules(vec![Rule::Required("City is required")]),
            state: FormField::choice("state", "State", state_options(), 0)
                .with_rules(vec![Rule::Required("State is required")]),
            zip_code: FormField::text("zip_code", "Zip Code")
                .with_rules(vec![Rule::Required("Zip code is required"), Rule::ExactLength(5)]),
            vehicles: VehicleList::vehicles(),
            dependents: DependentList::dependents(),
            active_field_index: 0,
            selected_action: FormAction::default(),
            vehicles_touched: false,
        }
    }

    /// Insurer fields in focus order
    pub fn fields(&self) -> [&FormField; INSURER_FIELD_COUNT] {
        [
            &self.first_name,
            &self.last_name,
            &self.date_of_birth,
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
        ]
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            0 => Some(&mut self.first_name),
            1 => Some(&mut self.last_name),
            2 => Some(&mut self.date_of_birth),
            3 => Some(&mut self.street),
            4 => Some(&mut self.city),
            5 => Some(&mut self.state),
            6 => Some(&mut self.zip_code),
            _ => None,
        }
    }

    pub fn focus(&self) -> FormFocus {
        match self.active_field_index {
            i if i < INSURER_FIELD_COUNT => FormFocus::Field(i),
            i if i == INSURER_FIELD_COUNT => FormFocus::Vehicles,
            i if i == INSURER_FIELD_COUNT + 1 => FormFocus::Dependents,
            _ => FormFocus::Actions,
        }
    }

    pub fn selected_action(&self) -> FormAction {
        self.selected_action
    }

    pub fn toggle_action(&mut self) {
        self.selected_action.toggle();
    }

    /// The selected state, falling back to the default for an unknown label
    pub fn selected_state(&self) -> UsState {
        self.state
            .as_text()
            .split(" - ")
            .next()
            .and_then(UsState::from_code)
            .unwrap_or_default()
    }

    /// Error text for the vehicle list, ignoring whether it was touched
    pub fn vehicles_error(&self) -> Option<String> {
        VEHICLE_RULES
            .iter()
            .find_map(|rule| rule.check(self.vehicles.len()))
    }

    pub fn visible_vehicles_error(&self) -> Option<String> {
        if self.vehicles_touched {
            self.vehicles_error()
        } else {
            None
        }
    }

    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in self.fields() {
            if let Some(message) = field.error() {
                errors.insert(field.name.clone(), message);
            }
        }
        if let Some(message) = self.vehicles_error() {
            errors.insert("vehicles", message);
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    fn values(&self) -> FormValues {
        FormValues {
            fields: self
                .fields()
                .iter()
                .map(|f| f.as_text().to_string())
                .collect(),
            vehicles: self.vehicles.items(),
            dependents: self.dependents.items(),
        }
    }

    /// Whether anything differs from the form's initial values
    pub fn is_dirty(&self) -> bool {
        self.values() != Self::new().values()
    }

    pub fn can_save(&self) -> bool {
        self.is_dirty()
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.is_dirty()
    }

    /// Show every error, e.g. after a blocked submit
    pub fn touch_all(&mut self) {
        for index in 0..INSURER_FIELD_COUNT {
            if let Some(field) = self.field_mut(index) {
                field.touch();
            }
        }
        self.vehicles_touched = true;
    }

    /// Record a change coming back from the vehicle list
    pub fn on_vehicle_change(&mut self, change: &ListChange<super::entities::Vehicle>) {
        self.vehicles_touched = true;
        match &change.entity {
            Some(vehicle) => tracing::debug!(key = %change.key, vin = %vehicle.vin, "Vehicle saved"),
            None => tracing::debug!(key = %change.key, "Vehicle removed"),
        }
    }

    /// Record a change coming back from the dependent list
    pub fn on_dependent_change(&mut self, change: &ListChange<super::entities::Dependent>) {
        match &change.entity {
            Some(dependent) => {
                tracing::debug!(key = %change.key, name = %dependent.person.full_name(), "Dependent saved")
            }
            None => tracing::debug!(key = %change.key, "Dependent removed"),
        }
    }

    /// Assemble the payload, carrying over ids from the current application
    ///
    /// Saving does not require a valid form, but the date of birth must parse.
    pub fn build_application(&self, current: Option<&Application>) -> Result<Application, FieldErrors> {
        let Some(date_of_birth) = self.date_of_birth.as_date() else {
            let mut errors = FieldErrors::new();
            errors.insert(
                self.date_of_birth.name.clone(),
                self.date_of_birth
                    .error()
                    .unwrap_or_else(|| "Date of birth is required".to_string()),
            );
            return Err(errors);
        };

        let application_id = current.and_then(|a| a.id.clone());
        let insurer_id = current
            .and_then(|a| a.insurer.as_ref())
            .and_then(|i| i.person.id.clone());

        Ok(Application {
            id: application_id,
            insurer: Some(Insurer {
                person: Person {
                    id: insurer_id,
                    first_name: self.first_name.as_text().to_string(),
                    last_name: self.last_name.as_text().to_string(),
                    date_of_birth,
                },
                street: self.street.as_text().to_string(),
                city: self.city.as_text().to_string(),
                state: self.selected_state(),
                zip_code: self.zip_code.as_text().to_string(),
                vehicles: self.vehicles.items(),
                dependents: self.dependents.items(),
            }),
        })
    }

    /// Load an application's insurer into the form
    ///
    /// An application without an insurer leaves the form as it is.
    pub fn adopt(&mut self, application: &Application) {
        let Some(insurer) = &application.insurer else {
            return;
        };
        self.first_name.set_text(insurer.person.first_name.clone());
        self.last_name.set_text(insurer.person.last_name.clone());
        self.date_of_birth
            .set_text(format_date(insurer.person.date_of_birth));
        self.street.set_text(insurer.street.clone());
        self.city.set_text(insurer.city.clone());
        let state_index = UsState::ALL
            .iter()
            .position(|s| *s == insurer.state)
            .unwrap_or(0);
        self.state.select(state_index);
        self.zip_code.set_text(insurer.zip_code.clone());
        self.vehicles.replace_all(insurer.vehicles.clone());
        self.dependents.replace_all(insurer.dependents.clone());
        tracing::info!(
            vehicles = self.vehicles.len(),
            dependents = self.dependents.len(),
            "Loaded application into form"
        );
    }

    /// Back to initial values with empty lists
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.field_mut(self.active_field_index) {
            field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.field_mut(self.active_field_index) {
            field.pop_char();
        }
    }

    pub fn next_choice(&mut self) {
        if let Some(field) = self.field_mut(self.active_field_index) {
            field.next_choice();
        }
    }

    pub fn prev_choice(&mut self) {
        if let Some(field) = self.field_mut(self.active_field_index) {
            field.prev_choice();
        }
    }
}

impl Form for ApplicationForm {
    fn field_count(&self) -> usize {
        INSURER_FIELD_COUNT + 3
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        if let Some(field) = self.field_mut(self.active_field_index) {
            field.touch();
        }
        if self.focus() == FormFocus::Vehicles {
            self.vehicles_touched = true;
        }
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
