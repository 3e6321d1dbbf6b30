//! Fluent query-condition builder for metadata-service selects and deletes.
//!
//! # Responsibility
//! - Collect field clauses combined with logical AND.
//! - Render them into the nested document the metadata service consumes.
//!
//! # Invariants
//! - Clause order is preserved in `clauses()` and in the rendered document.
//! - An equality clause renders as `{field: value}` and replaces earlier
//!   clauses on the same field; other operators render as
//!   `{field: {"$op": value}}` and merge per field.

use crate::codec::MapStr;
use serde_json::Value;

/// Comparison operator of one clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    In,
    NotIn,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
}

impl Operator {
    /// Document key for non-equality operators.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Neq => "$ne",
            Self::In => "$in",
            Self::NotIn => "$nin",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Like => "$regex",
        }
    }
}

/// One `field <op> value` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

/// AND-combined clause list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a clause on `name`; finish it with an operator method.
    pub fn field(self, name: impl Into<String>) -> Field {
        Field {
            condition: self,
            name: name.into(),
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns `true` when an equality clause `name == value` is present.
    pub fn has_eq(&self, name: &str, value: &Value) -> bool {
        self.clauses.iter().any(|clause| {
            clause.operator == Operator::Eq && clause.field == name && &clause.value == value
        })
    }

    /// Renders the condition document.
    pub fn to_map_str(&self) -> MapStr {
        let mut document = MapStr::new();
        for clause in &self.clauses {
            if clause.operator == Operator::Eq {
                document.insert(clause.field.clone(), clause.value.clone());
                continue;
            }

            let entry = document
                .entry(clause.field.clone())
                .or_insert_with(|| Value::Object(MapStr::new()));
            if !entry.is_object() {
                *entry = Value::Object(MapStr::new());
            }
            if let Value::Object(operators) = entry {
                operators.insert(clause.operator.as_str().to_string(), clause.value.clone());
            }
        }
        document
    }

    /// Renders the condition document as a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_map_str())
    }

    fn push(mut self, field: String, operator: Operator, value: Value) -> Self {
        self.clauses.push(Clause {
            field,
            operator,
            value,
        });
        self
    }
}

/// Pending clause returned by [`Condition::field`].
#[derive(Debug, Clone)]
pub struct Field {
    condition: Condition,
    name: String,
}

impl Field {
    pub fn eq(self, value: impl Into<Value>) -> Condition {
        self.finish(Operator::Eq, value.into())
    }

    pub fn neq(self, value: impl Into<Value>) -> Condition {
        self.finish(Operator::Neq, value.into())
    }

    pub fn in_values<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Condition {
        let values = values.into_iter().map(Into::into).collect::<Vec<Value>>();
        self.finish(Operator::In, Value::Array(values))
    }

    pub fn not_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Condition {
        let values = values.into_iter().map(Into::into).collect::<Vec<Value>>();
        self.finish(Operator::NotIn, Value::Array(values))
    }

    pub fn lt(self, value: impl Into<Value>) -> Condition {
        self.finish(Operator::Lt, value.into())
    }

    pub fn lte(self, value: impl Into<Value>) -> Condition {
        self.finish(Operator::Lte, value.into())
    }

    pub fn gt(self, value: impl Into<Value>) -> Condition {
        self.finish(Operator::Gt, value.into())
    }

    pub fn gte(self, value: impl Into<Value>) -> Condition {
        self.finish(Operator::Gte, value.into())
    }

    /// Pattern match; the pattern is passed through to the service verbatim.
    pub fn like(self, pattern: impl Into<String>) -> Condition {
        self.finish(Operator::Like, Value::String(pattern.into()))
    }

    fn finish(self, operator: Operator, value: Value) -> Condition {
        self.condition.push(self.name, operator, value)
    }
}
