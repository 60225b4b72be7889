//! Quote application entities and their JSON wire format
//!
//! The backend speaks camelCase JSON (`firstName`, `zipCode`, `VIN`). Dates are
//! written as `YYYY-MM-DD` but older saves carry full RFC 3339 timestamps, so
//! both are accepted on the way in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entities that may carry a backend-assigned identifier
pub trait Identified {
    fn id(&self) -> Option<&str>;
}

/// Relationship of a dependent to the insurer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// The insurer themselves
    #[serde(rename = "self")]
    Applicant,
    #[default]
    Spouse,
    Sibling,
    Parent,
    Friend,
    Other,
}

impl Relationship {
    pub const ALL: [Relationship; 6] = [
        Self::Applicant,
        Self::Spouse,
        Self::Sibling,
        Self::Parent,
        Self::Friend,
        Self::Other,
    ];

    /// Relationships offered when adding a dependent
    pub const SELECTABLE: [Relationship; 5] = [
        Self::Spouse,
        Self::Sibling,
        Self::Parent,
        Self::Friend,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Applicant => "self",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
            Self::Parent => "parent",
            Self::Friend => "friend",
            Self::Other => "other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! us_states {
    ($($variant:ident => $code:literal, $name:literal;)+) => {
        /// US state, district or territory postal code
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum UsState {
            $(
                #[doc = $name]
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl UsState {
            /// Every accepted code, in the order the picker shows them
            pub const ALL: &'static [UsState] = &[$(UsState::$variant),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(UsState::$variant => $code,)+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(UsState::$variant => $name,)+
                }
            }
        }
    };
}

us_states! {
    Ak => "AK", "Alaska";
    Al => "AL", "Alabama";
    Ar => "AR", "Arkansas";
    As => "AS", "American Samoa";
    Az => "AZ", "Arizona";
    Ca => "CA", "California";
    Co => "CO", "Colorado";
    Ct => "CT", "Connecticut";
    Dc => "DC", "District Of Columbia";
    De => "DE", "Delaware";
    Fl => "FL", "Florida";
    Fm => "FM", "Federated States Of Micronesia";
    Ga => "GA", "Georgia";
    Gu => "GU", "Guam";
    Hi => "HI", "Hawaii";
    Ia => "IA", "Iowa";
    Id => "ID", "Idaho";
    Il => "IL", "Illinois";
    In => "IN", "Indiana";
    Ks => "KS", "Kansas";
    Ky => "KY", "Kentucky";
    La => "LA", "Louisiana";
    Ma => "MA", "Massachusetts";
    Md => "MD", "Maryland";
    Me => "ME", "Maine";
    Mh => "MH", "Marshall Islands";
    Mi => "MI", "Michigan";
    Mn => "MN", "Minnesota";
    Mo => "MO", "Missouri";
    Mp => "MP", "Northern Mariana Islands";
    Ms => "MS", "Mississippi";
    Mt => "MT", "Montana";
    Nc => "NC", "North Carolina";
    Nd => "ND", "North Dakota";
    Ne => "NE", "Nebraska";
    Nh => "NH", "New Hampshire";
    Nj => "NJ", "New Jersey";
    Nm => "NM", "New Mexico";
    Nv => "NV", "Nevada";
    Ny => "NY", "New York";
    Oh => "OH", "Ohio";
    Ok => "OK", "Oklahoma";
    Or => "OR", "Oregon";
    Pa => "PA", "Pennsylvania";
    Pr => "PR", "Puerto Rico";
    Pw => "PW", "Palau";
    Ri => "RI", "Rhode Island";
    Sc => "SC", "South Carolina";
    Sd => "SD", "South Dakota";
    Tn => "TN", "Tennessee";
    Tx => "TX", "Texas";
    Ut => "UT", "Utah";
    Va => "VA", "Virginia";
    Vi => "VI", "Virgin Islands";
    Vt => "VT", "Vermont";
    Wa => "WA", "Washington";
    Wi => "WI", "Wisconsin";
    Wv => "WV", "West Virginia";
    Wy => "WY", "Wyoming";
}

impl Default for UsState {
    fn default() -> Self {
        UsState::Ak
    }
}

impl UsState {
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Picker label, e.g. "CA - California"
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name())
    }
}

/// Fields shared by the insurer and every dependent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "calendar_date")]
    pub date_of_birth: NaiveDate,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    #[serde(flatten)]
    pub person: Person,
    pub relationship: Relationship,
}

impl Identified for Dependent {
    fn id(&self) -> Option<&str> {
        self.person.id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "VIN")]
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
}

impl Identified for Vehicle {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// The primary applicant with address, vehicles and dependents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurer {
    #[serde(flatten)]
    pub person: Person,
    pub street: String,
    pub city: String,
    pub state: UsState,
    pub zip_code: String,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub insurer: Option<Insurer>,
}

/// Serde adapter for calendar dates
///
/// Writes `YYYY-MM-DD`; reads that or any RFC 3339 timestamp (keeping its date part).
mod calendar_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

pub use calendar_date::parse as parse_date;

/// Format a date the way the form fields and the wire format show it
pub fn format_date(date: NaiveDate) -> String {
    date.format(calendar_date::FORMAT).to_string()
}
