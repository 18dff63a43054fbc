use crate::core::endpoint::EndpointKind;
use crate::core::errors::{Error, Result};
use crate::core::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

/// Parse a BGPView response body. Bodies without a recognized `status` are rejected.
pub fn parse(json: &str) -> serde_json::Result<JsonResponse> {
    serde_json::from_str(json)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON Response Envelope
--------------------------------------------------------------------------------------*/

/// The `status` reported by the BGPView API.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Ok,
    Error,
}

/// The envelope wrapping every BGPView response. The shape of `data` depends on the endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct JsonResponse {
    pub status: RemoteStatus,

    #[serde(default)]
    pub status_message: String,

    #[serde(default)]
    pub data: Value,
}

/*--------------------------------------------------------------------------------------
  JSON Fields
--------------------------------------------------------------------------------------*/

static NULL: Value = Value::Null;

/// A cursor into a BGPView `data` payload that reports the dotted path of any field that is
/// absent or has an unexpected type as [Error::SchemaMismatch].
///
/// A key that is present with a `null` value is not an error; it reads as [Field::Missing].
/// Reading through a `null` object yields [Field::Missing] for every nested key.
#[derive(Clone, Debug)]
pub struct Fields<'v> {
    endpoint: EndpointKind,
    path: String,
    value: &'v Value,
}

impl<'v> Fields<'v> {
    /// Cursor over the `data` member of a response.
    pub fn data(endpoint: EndpointKind, data: &'v Value) -> Self {
        Self {
            endpoint,
            path: "data".to_string(),
            value: data,
        }
    }

    /// A nested object; `null` reads as an object whose fields are all missing.
    pub fn object(&self, key: &str) -> Result<Fields<'v>> {
        let value = self.get(key)?;
        let child = self.child(key, value);
        match value {
            Value::Null | Value::Object(_) => Ok(child),
            _ => Err(child.mismatch("is not an object")),
        }
    }

    /// The items of a nested array; `null` reads as an empty array.
    pub fn array(&self, key: &str) -> Result<Vec<Fields<'v>>> {
        let value = self.get(key)?;
        self.child(key, value).items()
    }

    /// The items of this value, which must be an array (or `null`).
    pub fn items(&self) -> Result<Vec<Fields<'v>>> {
        match self.value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(index, item)| Fields {
                    endpoint: self.endpoint,
                    path: format!("{}[{}]", self.path, index),
                    value: item,
                })
                .collect()),
            _ => Err(self.mismatch("is not an array")),
        }
    }

    /// A scalar rendered as text. Numbers and booleans are converted to their JSON text.
    pub fn text(&self, key: &str) -> Result<Field<String>> {
        let value = self.get(key)?;
        match value {
            Value::Null => Ok(Field::Missing),
            Value::String(text) => Ok(Field::Value(text.clone())),
            Value::Number(number) => Ok(Field::Value(number.to_string())),
            Value::Bool(flag) => Ok(Field::Value(flag.to_string())),
            _ => Err(self.child(key, value).mismatch("is not a scalar value")),
        }
    }

    /// A scalar parsed into `T`; `expected` names the type in the mismatch error.
    pub fn parsed<T: FromStr>(&self, key: &str, expected: &str) -> Result<Field<T>> {
        match self.text(key)? {
            Field::Value(text) => text.trim().parse().map(Field::Value).map_err(|_| {
                self.child(key, &NULL)
                    .mismatch(format!("is not {expected}: `{text}`"))
            }),
            _ => Ok(Field::Missing),
        }
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn get(&self, key: &str) -> Result<&'v Value> {
        match self.value {
            Value::Null => Ok(&NULL),
            Value::Object(map) => map
                .get(key)
                .ok_or_else(|| self.child(key, &NULL).mismatch("is missing")),
            _ => Err(self.mismatch("is not an object")),
        }
    }

    fn child(&self, key: &str, value: &'v Value) -> Fields<'v> {
        Fields {
            endpoint: self.endpoint,
            path: format!("{}.{}", self.path, key),
            value,
        }
    }

    fn mismatch(&self, reason: impl Into<String>) -> Error {
        Error::SchemaMismatch {
            endpoint: self.endpoint,
            field: self.path.clone(),
            reason: reason.into(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
