use crate::error::StashError;
use log::debug;
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Performer {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Raw value as stored by the backend; parsed only when computing a D-day.
    #[serde(default)]
    pub birthdate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomField {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedCustomField {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatedPerformer {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldType {
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldEntity {
    Performer,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomFieldCreateInput<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    pub entity: CustomFieldEntity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerUpdateInput<'a> {
    pub id: &'a str,
    pub custom_fields: serde_json::Map<String, Value>,
}

impl<'a> PerformerUpdateInput<'a> {
    /// Input that sets exactly one custom field and leaves the others alone.
    pub fn single_field(id: &'a str, field_name: &str, value: &str) -> Self {
        let mut custom_fields = serde_json::Map::new();
        custom_fields.insert(field_name.to_string(), Value::String(value.to_string()));
        Self { id, custom_fields }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllPerformers {
    #[serde(rename = "allPerformers")]
    pub all_performers: Vec<Performer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllCustomFields {
    #[serde(rename = "allCustomFields")]
    pub all_custom_fields: Vec<CustomField>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomFieldCreated {
    #[serde(rename = "customFieldCreate")]
    pub custom_field_create: CreatedCustomField,
}

#[derive(Debug, Deserialize)]
pub struct PerformerUpdated {
    #[serde(rename = "performerUpdate")]
    pub performer_update: Option<UpdatedPerformer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_empty() => {
                let joined: Vec<String> = path.iter().filter_map(json_value_to_string).collect();
                write!(f, "{} (at {})", self.message, joined.join("."))
            }
            _ => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// Response envelope: `data` and `errors` may each be present or absent.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "deserialize_errors")]
    pub errors: Vec<GraphQlError>,
}

/// What a GraphQL response actually carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphQlOutcome<T> {
    /// No errors reported.
    Data(T),
    /// Errors reported alongside usable data.
    Partial { data: T, errors: Vec<GraphQlError> },
    /// Errors reported and no data returned.
    Failed(Vec<GraphQlError>),
}

impl<T> GraphQlResponse<T> {
    pub fn into_outcome(self) -> GraphQlOutcome<T> {
        match (self.data, self.errors.is_empty()) {
            (Some(data), true) => GraphQlOutcome::Data(data),
            (Some(data), false) => GraphQlOutcome::Partial {
                data,
                errors: self.errors,
            },
            (None, _) => GraphQlOutcome::Failed(self.errors),
        }
    }
}

impl<T> GraphQlOutcome<T> {
    pub fn errors(&self) -> &[GraphQlError] {
        match self {
            GraphQlOutcome::Data(_) => &[],
            GraphQlOutcome::Partial { errors, .. } | GraphQlOutcome::Failed(errors) => errors,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            GraphQlOutcome::Data(data) | GraphQlOutcome::Partial { data, .. } => Some(data),
            GraphQlOutcome::Failed(_) => None,
        }
    }

    /// Keep whatever data arrived; fail only when there is none.
    pub fn require_data(self, operation: &'static str) -> Result<T, StashError> {
        match self {
            GraphQlOutcome::Data(data) | GraphQlOutcome::Partial { data, .. } => Ok(data),
            GraphQlOutcome::Failed(errors) => Err(StashError::MissingData { operation, errors }),
        }
    }
}

pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<GraphQlOutcome<T>, StashError> {
    let parsed: GraphQlResponse<T> = serde_json::from_str(body)?;
    debug!(
        "Parsed GraphQL response (data: {}, errors: {})",
        parsed.data.is_some(),
        parsed.errors.len()
    );
    Ok(parsed.into_outcome())
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    json_value_to_string(&raw).ok_or_else(|| D::Error::custom("id must be a string or number"))
}

fn deserialize_errors<'de, D>(deserializer: D) -> Result<Vec<GraphQlError>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<GraphQlError>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
