//! Form navigation and the vehicle/dependent item forms

use super::field::FormField;
use super::validation::{FieldErrors, Rule};
use crate::state::entities::{Dependent, Identified, Person, Relationship, Vehicle};
use chrono::{Datelike, Local, NaiveDate};

/// First selectable vehicle model year
pub const FIRST_VEHICLE_YEAR: i32 = 1985;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Field set edited inside an item editor dialog
pub trait ItemForm: Sized {
    type Item: Identified + Clone;

    /// Dialog title
    const TITLE: &'static str;

    /// Form with every field at its initial value
    fn blank() -> Self;

    /// Form pre-populated from an existing item
    fn from_item(item: &Self::Item) -> Self;

    fn fields(&self) -> Vec<&FormField>;

    fn fields_mut(&mut self) -> Vec<&mut FormField>;

    /// Assemble the item; `None` when a value cannot be converted
    fn build(&self, id: Option<String>) -> Option<Self::Item>;

    fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields_mut().into_iter().nth(index)
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in self.fields() {
            if let Some(message) = field.error() {
                errors.insert(field.name.clone(), message);
            }
        }
        errors
    }

    /// Current values, used to detect edits
    fn values(&self) -> Vec<String> {
        self.fields()
            .iter()
            .map(|f| f.as_text().to_string())
            .collect()
    }
}

/// Model years offered by the vehicle editor, newest last
pub fn vehicle_years() -> Vec<String> {
    let last = Local::now().year() + 1;
    (FIRST_VEHICLE_YEAR..=last).map(|y| y.to_string()).collect()
}

/// Vehicle editor fields
#[derive(Debug, Clone)]
pub struct VehicleForm {
    pub vin: FormField,
    pub model: FormField,
    pub make: FormField,
    pub year: FormField,
}

impl ItemForm for VehicleForm {
    type Item = Vehicle;

    const TITLE: &'static str = "Your Vehicle Information";

    fn blank() -> Self {
        let current_year = Local::now().year().to_string();
        Self {
            vin: FormField::text("vin", "VIN")
                .with_rules(vec![Rule::Required("VIN is required"), Rule::ExactLength(17)]),
            model: FormField::text("model", "Model")
                .with_rules(vec![Rule::Required("Model is required")]),
            make: FormField::text("make", "Make").with_rules(vec![Rule::Required("Make is required")]),
            year: FormField::choice_with_value("year", "Year", vehicle_years(), &current_year)
                .with_rules(vec![Rule::Required("Year is required")]),
        }
    }

    fn from_item(item: &Vehicle) -> Self {
        let mut form = Self::blank();
        form.vin.set_text(item.vin.clone());
        form.model.set_text(item.model.clone());
        form.make.set_text(item.make.clone());
        form.year = FormField::choice_with_value("year", "Year", vehicle_years(), &item.year.to_string())
            .with_rules(vec![Rule::Required("Year is required")]);
        form
    }

    fn fields(&self) -> Vec<&FormField> {
        vec![&self.vin, &self.model, &self.make, &self.year]
    }

    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        vec![&mut self.vin, &mut self.model, &mut self.make, &mut self.year]
    }

    fn build(&self, id: Option<String>) -> Option<Vehicle> {
        Some(Vehicle {
            id,
            vin: self.vin.as_text().to_string(),
            year: self.year.as_text().parse().ok()?,
            make: self.make.as_text().to_string(),
            model: self.model.as_text().to_string(),
        })
    }
}

/// Default date of birth offered for new people
pub fn default_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

fn relationship_options() -> Vec<String> {
    Relationship::SELECTABLE
        .iter()
        .map(|r| r.label().to_string())
        .collect()
}

/// Dependent editor fields
#[derive(Debug, Clone)]
pub struct DependentForm {
    pub first_name: FormField,
    pub last_name: FormField,
    pub date_of_birth: FormField,
    pub relationship: FormField,
}

impl ItemForm for DependentForm {
    type Item = Dependent;

    const TITLE: &'static str = "Your Dependent Information";

    fn blank() -> Self {
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
            relationship: FormField::choice_with_value(
                "relationship",
                "Relationship",
                relationship_options(),
                Relationship::default().label(),
            )
            .with_rules(vec![Rule::Required("Relationship is required")]),
        }
    }

    fn from_item(item: &Dependent) -> Self {
        let mut form = Self::blank();
        form.first_name.set_text(item.person.first_name.clone());
        form.last_name.set_text(item.person.last_name.clone());
        form.date_of_birth
            .set_text(crate::state::entities::format_date(item.person.date_of_birth));
        form.relationship = FormField::choice_with_value(
            "relationship",
            "Relationship",
            relationship_options(),
            item.relationship.label(),
        )
        .with_rules(vec![Rule::Required("Relationship is required")]);
        form
    }

    fn fields(&self) -> Vec<&FormField> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.date_of_birth,
            &self.relationship,
        ]
    }

    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        vec![
            &mut self.first_name,
            &mut self.last_name,
            &mut self.date_of_birth,
            &mut self.relationship,
        ]
    }

    fn build(&self, id: Option<String>) -> Option<Dependent> {
        Some(Dependent {
            person: Person {
                id,
                first_name: self.first_name.as_text().to_string(),
                last_name: self.last_name.as_text().to_string(),
                date_of_birth: self.date_of_birth.as_date()?,
            },
            relationship: Relationship::from_label(self.relationship.as_text())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civic() -> Vehicle {
        Vehicle {
            id: Some("veh-1".to_string()),
            vin: "1HGCM82633A004352".to_string(),
            year: 2003,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
        }
    }

    fn type_into(field: &mut FormField, text: &str) {
        for c in text.chars() {
            field.push_char(c);
        }
    }

    mod vehicle_form {
        use super::*;

        #[test]
        fn test_blank_defaults_to_current_year() {
            let form = VehicleForm::blank();
            assert_eq!(form.year.as_text(), Local::now().year().to_string());
            assert_eq!(form.vin.as_text(), "");
        }

        #[test]
        fn test_years_span_from_1985_to_next_year() {
            let years = vehicle_years();
            assert_eq!(years.first().map(String::as_str), Some("1985"));
            assert_eq!(years.last(), Some(&(Local::now().year() + 1).to_string()));
        }

        #[test]
        fn test_blank_reports_required_fields() {
            let errors = VehicleForm::blank().errors();
            assert_eq!(errors.get("vin"), Some("VIN is required"));
            assert_eq!(errors.get("model"), Some("Model is required"));
            assert_eq!(errors.get("make"), Some("Make is required"));
            assert!(!errors.contains("year"));
        }

        #[test]
        fn test_vin_must_be_exactly_17_chars() {
            for (vin, ok) in [
                ("1HGCM82633A00435", false),
                ("1HGCM82633A004352", true),
                ("1HGCM82633A0043521", false),
            ] {
                let mut form = VehicleForm::blank();
                type_into(&mut form.vin, vin);
                type_into(&mut form.make, "Honda");
                type_into(&mut form.model, "Civic");
                assert_eq!(form.errors().is_empty(), ok, "VIN {vin}");
            }
        }

        #[test]
        fn test_from_item_and_build_keep_values() {
            let form = VehicleForm::from_item(&civic());
            assert_eq!(form.vin.as_text(), "1HGCM82633A004352");
            assert_eq!(form.year.as_text(), "2003");
            assert_eq!(form.build(Some("veh-1".to_string())), Some(civic()));
        }

        #[test]
        fn test_from_item_with_unlisted_year() {
            let mut vehicle = civic();
            vehicle.year = 1972;
            let form = VehicleForm::from_item(&vehicle);
            assert_eq!(form.year.as_text(), "1972");
            assert_eq!(form.build(None).map(|v| v.year), Some(1972));
        }

        #[test]
        fn test_field_order() {
            let form = VehicleForm::blank();
            let names: Vec<_> = form.fields().iter().map(|f| f.name.clone()).collect();
            assert_eq!(names, ["vin", "model", "make", "year"]);
        }
    }

    mod dependent_form {
        use super::*;

        #[test]
        fn test_blank_defaults() {
            let form = DependentForm::blank();
            assert_eq!(form.date_of_birth.as_text(), "2000-01-01");
            assert_eq!(form.relationship.as_text(), "spouse");
        }

        #[test]
        fn test_build_requires_valid_date() {
            let mut form = DependentForm::blank();
            type_into(&mut form.first_name, "Grace");
            type_into(&mut form.last_name, "Hopper");
            assert!(form.build(None).is_some());
            form.date_of_birth.set_text("not a date".to_string());
            assert!(form.build(None).is_none());
            assert!(form.errors().contains("date_of_birth"));
        }

        #[test]
        fn test_round_trip_self_relationship() {
            let dependent = Dependent {
                person: Person {
                    id: Some("dep-9".to_string()),
                    first_name: "Grace".to_string(),
                    last_name: "Hopper".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
                },
                relationship: Relationship::Applicant,
            };
            let form = DependentForm::from_item(&dependent);
            assert_eq!(form.relationship.as_text(), "self");
            assert_eq!(form.build(Some("dep-9".to_string())), Some(dependent));
        }
    }
}
