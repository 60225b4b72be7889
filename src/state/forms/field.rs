//! Form field value objects

use super::validation::{first_error, Rule};
use crate::state::entities::{format_date, parse_date};
use chrono::NaiveDate;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// One of a fixed list of options (state, year, relationship)
    Choice { options: Vec<String>, selected: usize },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub rules: Vec<Rule>,
    /// Set once the user has edited or left the field; errors show only then
    pub touched: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::text_with_value(name, label, String::new())
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            rules: Vec::new(),
            touched: false,
        }
    }

    /// Create a required `YYYY-MM-DD` date field
    pub fn date(name: &str, label: &str, value: NaiveDate, required_message: &'static str) -> Self {
        Self::text_with_value(name, label, format_date(value))
            .with_rules(vec![Rule::Required(required_message), Rule::Date])
    }

    /// Create a choice field. An out-of-range `selected` falls back to the first option.
    pub fn choice(name: &str, label: &str, options: Vec<String>, selected: usize) -> Self {
        let selected = if selected < options.len() { selected } else { 0 };
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice { options, selected },
            rules: Vec::new(),
            touched: false,
        }
    }

    /// Create a choice field selecting `value`, appending it when it is not an option
    pub fn choice_with_value(name: &str, label: &str, mut options: Vec<String>, value: &str) -> Self {
        let selected = match options.iter().position(|o| o == value) {
            Some(index) => index,
            None => {
                options.push(value.to_string());
                options.len() - 1
            }
        };
        Self::choice(name, label, options, selected)
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Get the text value (the selected option for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => {
                options.get(*selected).map(String::as_str).unwrap_or("")
            }
        }
    }

    /// Parse the value as a calendar date
    pub fn as_date(&self) -> Option<NaiveDate> {
        parse_date(self.as_text())
    }

    /// Index of the selected option (0 for text fields)
    pub fn selected_index(&self) -> usize {
        match &self.value {
            FieldValue::Choice { selected, .. } => *selected,
            FieldValue::Text(_) => 0,
        }
    }

    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        match &mut self.value {
            FieldValue::Text(s) => *s = value,
            FieldValue::Choice { options, selected } => {
                if let Some(index) = options.iter().position(|o| *o == value) {
                    *selected = index;
                }
            }
        }
    }

    /// Select an option by index; ignored for text fields and out-of-range indices
    pub fn select(&mut self, index: usize) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if index < options.len() {
                *selected = index;
            }
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
            self.touched = true;
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
            self.touched = true;
        }
    }

    /// Move to the next option, wrapping around
    pub fn next_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if !options.is_empty() {
                *selected = (*selected + 1) % options.len();
                self.touched = true;
            }
        }
    }

    /// Move to the previous option, wrapping around
    pub fn prev_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if !options.is_empty() {
                *selected = if *selected == 0 {
                    options.len() - 1
                } else {
                    *selected - 1
                };
                self.touched = true;
            }
        }
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// First failing rule, regardless of whether the field was touched
    pub fn error(&self) -> Option<String> {
        first_error(&self.label, self.as_text(), &self.rules)
    }

    /// The error to render beneath the input
    pub fn visible_error(&self) -> Option<String> {
        if self.touched {
            self.error()
        } else {
            None
        }
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required(_)))
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { .. } => format!("◂ {} ▸", self.as_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["spouse".to_string(), "sibling".to_string(), "parent".to_string()]
    }

    mod text_field {
        use super::*;

        #[test]
        fn test_push_and_pop_mark_touched() {
            let mut field = FormField::text("make", "Make");
            assert!(!field.touched);
            field.push_char('V');
            field.push_char('W');
            assert_eq!(field.as_text(), "VW");
            assert!(field.touched);
            field.pop_char();
            assert_eq!(field.as_text(), "V");
        }

        #[test]
        fn test_choice_navigation_ignored() {
            let mut field = FormField::text_with_value("city", "City", "Reno".to_string());
            field.next_choice();
            field.prev_choice();
            field.select(2);
            assert_eq!(field.as_text(), "Reno");
            assert!(!field.touched);
        }

        #[test]
        fn test_visible_error_requires_touch() {
            let mut field =
                FormField::text("city", "City").with_rules(vec![Rule::Required("City is required")]);
            assert_eq!(field.error(), Some("City is required".to_string()));
            assert_eq!(field.visible_error(), None);
            field.touch();
            assert_eq!(field.visible_error(), Some("City is required".to_string()));
            assert!(field.is_required());
        }
    }

    mod date_field {
        use super::*;

        #[test]
        fn test_date_field_round_trips() {
            let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
            let field = FormField::date("date_of_birth", "Date of birth", date, "Date of birth is required");
            assert_eq!(field.as_text(), "2000-01-01");
            assert_eq!(field.as_date(), Some(date));
            assert_eq!(field.error(), None);
        }

        #[test]
        fn test_garbled_date_reports_error() {
            let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
            let mut field = FormField::date("date_of_birth", "Date of birth", date, "Date of birth is required");
            field.pop_char();
            assert_eq!(field.as_date(), None);
            assert!(field.visible_error().unwrap().contains("YYYY-MM-DD"));
            field.set_text(String::new());
            assert_eq!(field.error(), Some("Date of birth is required".to_string()));
        }
    }

    mod choice_field {
        use super::*;

        #[test]
        fn test_next_wraps() {
            let mut field = FormField::choice("relationship", "Relationship", options(), 2);
            field.next_choice();
            assert_eq!(field.as_text(), "spouse");
            assert!(field.touched);
        }

        #[test]
        fn test_prev_wraps() {
            let mut field = FormField::choice("relationship", "Relationship", options(), 0);
            field.prev_choice();
            assert_eq!(field.as_text(), "parent");
        }

        #[test]
        fn test_out_of_range_selection_falls_back() {
            let field = FormField::choice("relationship", "Relationship", options(), 10);
            assert_eq!(field.selected_index(), 0);
        }

        #[test]
        fn test_choice_with_value_appends_unknown() {
            let field = FormField::choice_with_value("relationship", "Relationship", options(), "self");
            assert_eq!(field.as_text(), "self");
            assert_eq!(field.selected_index(), 3);
        }

        #[test]
        fn test_set_text_selects_matching_option() {
            let mut field = FormField::choice("relationship", "Relationship", options(), 0);
            field.set_text("parent".to_string());
            assert_eq!(field.selected_index(), 2);
            field.set_text("cousin".to_string());
            assert_eq!(field.selected_index(), 2);
        }

        #[test]
        fn test_push_char_ignored() {
            let mut field = FormField::choice("relationship", "Relationship", options(), 0);
            field.push_char('x');
            assert_eq!(field.as_text(), "spouse");
        }

        #[test]
        fn test_display_value_shows_arrows() {
            let field = FormField::choice("relationship", "Relationship", options(), 1);
            assert_eq!(field.display_value(), "◂ sibling ▸");
        }
    }
}
