//! Request schemas
//!
//! Inbound bodies are parsed from raw bytes so that every problem, including
//! malformed JSON, ends up in one [`ValidationErrors`] map keyed by field.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use weft_core::domain::cycle::{Cycle, Frequency};
use weft_core::domain::filter::{Condition, Filter, JoinOperator, Operator};
use weft_core::domain::new_id;

pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Field name to messages, serialized as a bare JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    fn schema(message: &str) -> Self {
        let mut errors = Self::new();
        errors.add("_schema", message);
        errors
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationErrors> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationErrors::schema(INVALID_INPUT)),
        Err(e) => Err(ValidationErrors::schema(&format!("Invalid JSON body: {}", e))),
    }
}

/// Parse an arbitrary JSON body, such as data written to a data node
pub fn parse_value(body: &[u8]) -> Result<Value, ValidationErrors> {
    serde_json::from_slice(body)
        .map_err(|e| ValidationErrors::schema(&format!("Invalid JSON body: {}", e)))
}

fn reject_unknown(
    map: &Map<String, Value>,
    known: &[&str],
    prefix: &str,
    errors: &mut ValidationErrors,
) {
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            errors.add(format!("{}{}", prefix, key), UNKNOWN_FIELD);
        }
    }
}

type FieldParser<T> = fn(&Value) -> Result<T, String>;

fn required<T>(
    map: &Map<String, Value>,
    field: &str,
    prefix: &str,
    parse: FieldParser<T>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.add(format!("{}{}", prefix, field), MISSING_FIELD);
            None
        }
        Some(value) => parse_field(value, field, prefix, parse, errors),
    }
}

fn optional<T>(
    map: &Map<String, Value>,
    field: &str,
    prefix: &str,
    parse: FieldParser<T>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => parse_field(value, field, prefix, parse, errors),
    }
}

fn parse_field<T>(
    value: &Value,
    field: &str,
    prefix: &str,
    parse: FieldParser<T>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match parse(value) {
        Ok(v) => Some(v),
        Err(msg) => {
            errors.add(format!("{}{}", prefix, field), msg);
            None
        }
    }
}

fn string(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "Not a valid string.".to_string())
}

fn any(value: &Value) -> Result<Value, String> {
    Ok(value.clone())
}

fn mapping(value: &Value) -> Result<HashMap<String, Value>, String> {
    match value {
        Value::Object(map) => Ok(map.clone().into_iter().collect()),
        _ => Err("Not a valid mapping type.".to_string()),
    }
}

/// ISO-8601 datetime; an explicit offset is normalized to UTC
fn datetime(value: &Value) -> Result<NaiveDateTime, String> {
    let invalid = || "Not a valid datetime.".to_string();
    let s = value.as_str().ok_or_else(invalid)?;
    NaiveDateTime::from_str(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_utc()))
        .map_err(|_| invalid())
}

fn frequency_value(value: &Value) -> Result<Frequency, String> {
    let invalid = || {
        let names: Vec<&str> = Frequency::ALL.iter().map(|f| f.as_str()).collect();
        format!("Must be one of: {}.", names.join(", "))
    };
    value
        .as_str()
        .ok_or_else(invalid)?
        .parse::<Frequency>()
        .map_err(|_| invalid())
}

fn operator_value(value: &Value) -> Result<Operator, String> {
    value
        .as_str()
        .ok_or_else(|| "Not a valid string.".to_string())?
        .parse()
}

fn join_value(value: &Value) -> Result<JoinOperator, String> {
    value
        .as_str()
        .ok_or_else(|| "Not a valid string.".to_string())?
        .parse()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cycle
// ─────────────────────────────────────────────────────────────────────────────

const CYCLE_FIELDS: &[&str] = &[
    "id",
    "name",
    "frequency",
    "properties",
    "creation_date",
    "start_date",
    "end_date",
];

/// Validated body of `POST /cycles`
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub frequency: Frequency,
    pub properties: HashMap<String, Value>,
    pub creation_date: NaiveDateTime,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl CycleRequest {
    pub fn parse(body: &[u8]) -> Result<Self, ValidationErrors> {
        let map = parse_object(body)?;
        let mut errors = ValidationErrors::new();
        reject_unknown(&map, CYCLE_FIELDS, "", &mut errors);

        let id = optional(&map, "id", "", string, &mut errors);
        let name = optional(&map, "name", "", string, &mut errors);
        let properties = optional(&map, "properties", "", mapping, &mut errors);
        let frequency = required(&map, "frequency", "", frequency_value, &mut errors);
        let creation_date = required(&map, "creation_date", "", datetime, &mut errors);
        let start_date = required(&map, "start_date", "", datetime, &mut errors);
        let end_date = required(&map, "end_date", "", datetime, &mut errors);

        match (frequency, creation_date, start_date, end_date) {
            (Some(frequency), Some(creation_date), Some(start_date), Some(end_date))
                if errors.is_empty() =>
            {
                Ok(Self {
                    id,
                    name,
                    frequency,
                    properties: properties.unwrap_or_default(),
                    creation_date,
                    start_date,
                    end_date,
                })
            }
            _ => Err(errors),
        }
    }

    /// Build the entity, generating the id and name when absent
    pub fn into_cycle(self) -> Cycle {
        let id = self
            .id
            .unwrap_or_else(|| new_id("CYCLE", self.frequency.as_str()));
        let name = self.name.unwrap_or_else(|| {
            format!(
                "{}_{}",
                self.frequency,
                self.creation_date.format("%Y-%m-%dT%H:%M:%S")
            )
        });
        Cycle {
            id,
            name,
            frequency: self.frequency,
            properties: self.properties,
            creation_date: self.creation_date,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data node filter
// ─────────────────────────────────────────────────────────────────────────────

const FILTER_FIELDS: &[&str] = &["operators", "join_operator"];
const CONDITION_FIELDS: &[&str] = &["key", "value", "operator"];

/// Parse the optional body of `GET /datanodes/{id}/read`.
///
/// An empty body means no filter.
pub fn parse_filter(body: &[u8]) -> Result<Option<Filter>, ValidationErrors> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let map = parse_object(body)?;
    let mut errors = ValidationErrors::new();
    reject_unknown(&map, FILTER_FIELDS, "", &mut errors);

    let join = optional(&map, "join_operator", "", join_value, &mut errors).unwrap_or_default();

    let mut conditions = Vec::new();
    match map.get("operators") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let prefix = format!("operators.{}.", i);
                let Value::Object(item) = item else {
                    errors.add(format!("operators.{}", i), INVALID_INPUT);
                    continue;
                };
                reject_unknown(item, CONDITION_FIELDS, &prefix, &mut errors);
                let key = required(item, "key", &prefix, string, &mut errors);
                let value = required(item, "value", &prefix, any, &mut errors);
                let operator = required(item, "operator", &prefix, operator_value, &mut errors);
                if let (Some(key), Some(value), Some(operator)) = (key, value, operator) {
                    conditions.push(Condition {
                        key,
                        value,
                        operator,
                    });
                }
            }
        }
        Some(_) => errors.add("operators", "Not a valid list."),
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Some(Filter { conditions, join }).filter(|f| !f.is_empty()))
}
