//! Data node filters
//!
//! A filter is a list of `(key, value, operator)` conditions combined with a
//! join operator. It applies to tabular data, i.e. a JSON array of objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison applied between a record field and a condition value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EQUAL" => Ok(Operator::Equal),
            "NOT_EQUAL" => Ok(Operator::NotEqual),
            "LESS_THAN" => Ok(Operator::LessThan),
            "LESS_OR_EQUAL" => Ok(Operator::LessOrEqual),
            "GREATER_THAN" => Ok(Operator::GreaterThan),
            "GREATER_OR_EQUAL" => Ok(Operator::GreaterOrEqual),
            other => Err(format!("Unknown operator '{}'", other)),
        }
    }
}

/// How conditions combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinOperator {
    #[default]
    And,
    Or,
}

impl FromStr for JoinOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(JoinOperator::And),
            "OR" => Ok(JoinOperator::Or),
            other => Err(format!("Unknown join operator '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    pub value: Value,
    pub operator: Operator,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    pub conditions: Vec<Condition>,
    pub join: JoinOperator,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether a single record satisfies the filter
    pub fn matches(&self, record: &Value) -> bool {
        let mut results = self.conditions.iter().map(|c| c.matches(record));
        match self.join {
            JoinOperator::And => results.all(|r| r),
            JoinOperator::Or => results.any(|r| r),
        }
    }

    /// Keep the records of `data` that satisfy the filter
    ///
    /// Non-array data and empty filters pass through untouched.
    pub fn apply(&self, data: Value) -> Value {
        if self.is_empty() {
            return data;
        }
        match data {
            Value::Array(records) => {
                Value::Array(records.into_iter().filter(|r| self.matches(r)).collect())
            }
            other => other,
        }
    }
}

impl Condition {
    fn matches(&self, record: &Value) -> bool {
        let Some(field) = record.get(self.key.as_str()) else {
            return false;
        };
        match self.operator {
            Operator::Equal => values_equal(field, &self.value),
            Operator::NotEqual => !values_equal(field, &self.value),
            Operator::LessThan => compare(field, &self.value) == Some(Ordering::Less),
            Operator::LessOrEqual => matches!(
                compare(field, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::GreaterThan => compare(field, &self.value) == Some(Ordering::Greater),
            Operator::GreaterOrEqual => matches!(
                compare(field, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Equal => "EQUAL",
            Operator::NotEqual => "NOT_EQUAL",
            Operator::LessThan => "LESS_THAN",
            Operator::LessOrEqual => "LESS_OR_EQUAL",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterOrEqual => "GREATER_OR_EQUAL",
        };
        f.write_str(s)
    }
}

// Numbers compare by value so that 1 and 1.0 are equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
