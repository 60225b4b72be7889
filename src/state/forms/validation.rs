//! Field validation rules
//!
//! Rules are attached to individual `FormField`s; collection rules apply to
//! the vehicle and dependent lists of the application form.

use crate::state::entities::parse_date;
use std::collections::BTreeMap;

/// A rule checked against the text of a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-blank; carries the message shown when it is
    Required(&'static str),
    /// Value must have exactly this many characters
    ExactLength(usize),
    /// Value must parse as a `YYYY-MM-DD` calendar date
    Date,
}

impl Rule {
    /// Check `value`, returning the error text when the rule fails
    pub fn check(&self, label: &str, value: &str) -> Option<String> {
        match self {
            Rule::Required(message) => value.trim().is_empty().then(|| message.to_string()),
            Rule::ExactLength(len) => (value.chars().count() != *len)
                .then(|| format!("{label} must be exactly {len} characters")),
            Rule::Date => {
                parse_date(value).is_none().then(|| format!("{label} must be a date (YYYY-MM-DD)"))
            }
        }
    }
}

/// Run rules in order and report the first failure
pub fn first_error(label: &str, value: &str, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| rule.check(label, value))
}

/// A rule checked against the number of entries in a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountRule {
    AtLeast(usize, &'static str),
    AtMost(usize, &'static str),
}

impl CountRule {
    pub fn check(&self, count: usize) -> Option<String> {
        match self {
            CountRule::AtLeast(min, message) => (count < *min).then(|| message.to_string()),
            CountRule::AtMost(max, message) => (count > *max).then(|| message.to_string()),
        }
    }
}

/// Per-field error messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let rule = Rule::Required("Make is required");
        assert_eq!(rule.check("Make", ""), Some("Make is required".to_string()));
        assert_eq!(rule.check("Make", "   "), Some("Make is required".to_string()));
        assert_eq!(rule.check("Make", "Honda"), None);
    }

    #[test]
    fn test_exact_length_counts_chars() {
        let rule = Rule::ExactLength(5);
        assert!(rule.check("Zip Code", "1234").is_some());
        assert!(rule.check("Zip Code", "123456").is_some());
        assert_eq!(rule.check("Zip Code", "12345"), None);
        assert_eq!(rule.check("Zip Code", "ÄÖÜßé"), None);
        assert_eq!(
            rule.check("Zip Code", "1"),
            Some("Zip Code must be exactly 5 characters".to_string())
        );
    }

    #[test]
    fn test_date_rule() {
        assert_eq!(Rule::Date.check("Date of birth", "1990-02-28"), None);
        assert!(Rule::Date.check("Date of birth", "1990-02-30").is_some());
        assert!(Rule::Date.check("Date of birth", "02/28/1990").is_some());
    }

    #[test]
    fn test_first_error_stops_at_first_failure() {
        let rules = [Rule::Required("VIN is required"), Rule::ExactLength(17)];
        assert_eq!(first_error("VIN", "", &rules), Some("VIN is required".to_string()));
        assert_eq!(
            first_error("VIN", "ABC", &rules),
            Some("VIN must be exactly 17 characters".to_string())
        );
        assert_eq!(first_error("VIN", "1HGCM82633A004352", &rules), None);
    }

    #[test]
    fn test_count_rules() {
        let at_least = CountRule::AtLeast(1, "At least 1 vehicle is required");
        let at_most = CountRule::AtMost(3, "No more than 3 vehicles available");
        assert!(at_least.check(0).is_some());
        assert!(at_least.check(1).is_none());
        assert!(at_most.check(3).is_none());
        assert_eq!(
            at_most.check(4),
            Some("No more than 3 vehicles available".to_string())
        );
    }

    #[test]
    fn test_field_errors() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        errors.insert("zip_code", "Zip code is required");
        assert_eq!(errors.iter().count(), 1);
        assert!(errors.contains("zip_code"));
        assert_eq!(errors.get("zip_code"), Some("Zip code is required"));
        assert_eq!(errors.get("city"), None);
    }
}
