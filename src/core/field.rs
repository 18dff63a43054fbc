use serde::{Serialize, Serializer};
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Field Sentinels
-------------------------------------------------------------------------------------------------*/

/// Rendered for a data field whose value is `null` in the BGPView payload.
pub const MISSING: &str = "None";

/// Rendered for a field that does not apply to a record (e.g. the allocation date of a private
/// AS number).
pub const NOT_APPLICABLE: &str = "N/A";

/// Rendered for every field of an AS number the classification table cannot place.
pub const UNVERIFIED: &str = "NEED VALIDATION FROM HUMAN";

/*-------------------------------------------------------------------------------------------------
  Field
-------------------------------------------------------------------------------------------------*/

/// A single value extracted from a BGPView payload.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Field<T> {
    Value(T),
    Missing,
    NotApplicable,
    Unverified,
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Field::Value(_))
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Missing, Field::Value)
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(value) => value.fmt(f),
            Field::Missing => f.write_str(MISSING),
            Field::NotApplicable => f.write_str(NOT_APPLICABLE),
            Field::Unverified => f.write_str(UNVERIFIED),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Value(value) => value.serialize(serializer),
            Field::Missing => serializer.serialize_none(),
            Field::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
            Field::Unverified => serializer.serialize_str(UNVERIFIED),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Render a `City, CC` location, dropping whichever part is absent.
pub(crate) fn location(city: &Field<String>, country: &Field<String>) -> String {
    match (city.value(), country.value()) {
        (Some(city), Some(country)) => format!("{city}, {country}"),
        (Some(city), None) => city.clone(),
        (None, Some(country)) => country.clone(),
        (None, None) => country.to_string(),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
