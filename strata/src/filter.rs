//! Column predicates for read operations.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// A scalar value bindable into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Append this value to the statement under construction. `Null` is the
    /// SQL literal; everything else goes through a bind parameter.
    pub(crate) fn push(&self, query: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Value::Null => {
                query.push("NULL");
            }
            Value::Bool(value) => {
                query.push_bind(*value);
            }
            Value::Int(value) => {
                query.push_bind(*value);
            }
            Value::Float(value) => {
                query.push_bind(*value);
            }
            Value::Text(value) => {
                query.push_bind(value.clone());
            }
            Value::Uuid(value) => {
                query.push_bind(*value);
            }
            Value::Timestamp(value) => {
                query.push_bind(*value);
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Self::Int(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    IsNull,
    IsNotNull,
}

impl Op {
    fn sql(self) -> &'static str {
        match self {
            Op::Eq => " = ",
            Op::Ne => " != ",
            Op::Lt => " < ",
            Op::Lte => " <= ",
            Op::Gt => " > ",
            Op::Gte => " >= ",
            Op::Like => " LIKE ",
            Op::IsNull => " IS NULL",
            Op::IsNotNull => " IS NOT NULL",
        }
    }
}

/// An opaque boolean condition over one entity column.
///
/// Built through the comparison constructors and consumed by the repository,
/// which joins multiple filters with `AND`. Column names come from code, never
/// from user input; values always go through bind parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    column: &'static str,
    op: Op,
    value: Option<Value>,
}

impl Filter {
    fn new(column: &'static str, op: Op, value: Value) -> Self {
        // Comparing against NULL never matches; callers passing a None-ish
        // value mean the null test.
        match (op, value) {
            (Op::Eq, Value::Null) => Self::is_null(column),
            (Op::Ne, Value::Null) => Self::is_not_null(column),
            (op, value) => Self {
                column,
                op,
                value: Some(value),
            },
        }
    }

    /// `column = value`, or `column IS NULL` when given a null value.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Eq, value.into())
    }

    /// `column != value`, or `column IS NOT NULL` when given a null value.
    pub fn ne(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Ne, value.into())
    }

    /// `column < value`
    pub fn lt(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Lt, value.into())
    }

    /// `column <= value`
    pub fn lte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Lte, value.into())
    }

    /// `column > value`
    pub fn gt(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Gt, value.into())
    }

    /// `column >= value`
    pub fn gte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Gte, value.into())
    }

    /// `column LIKE pattern`
    pub fn like(column: &'static str, pattern: impl Into<String>) -> Self {
        Self::new(column, Op::Like, Value::Text(pattern.into()))
    }

    /// `column IS NULL`
    pub fn is_null(column: &'static str) -> Self {
        Self {
            column,
            op: Op::IsNull,
            value: None,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: &'static str) -> Self {
        Self {
            column,
            op: Op::IsNotNull,
            value: None,
        }
    }

    /// Append this condition to the statement under construction.
    pub(crate) fn push(&self, query: &mut QueryBuilder<'static, Postgres>) {
        query.push(self.column);
        query.push(self.op.sql());
        if let Some(value) = &self.value {
            value.push(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(filter: &Filter) -> String {
        let mut query = QueryBuilder::new("");
        filter.push(&mut query);
        query.sql().to_string()
    }

    #[test]
    fn test_comparisons_bind_their_value() {
        assert_eq!(render(&Filter::eq("name", "bolt")), "name = $1");
        assert_eq!(render(&Filter::ne("name", "nut")), "name != $1");
        assert_eq!(render(&Filter::lt("quantity", 5i64)), "quantity < $1");
        assert_eq!(render(&Filter::lte("quantity", 5i64)), "quantity <= $1");
        assert_eq!(render(&Filter::gt("quantity", 5i64)), "quantity > $1");
        assert_eq!(render(&Filter::gte("quantity", 5i64)), "quantity >= $1");
        assert_eq!(render(&Filter::like("name", "bo%")), "name LIKE $1");
    }

    #[test]
    fn test_null_tests_bind_nothing() {
        assert_eq!(render(&Filter::is_null("widget_id")), "widget_id IS NULL");
        assert_eq!(render(&Filter::is_not_null("widget_id")), "widget_id IS NOT NULL");
    }

    #[test]
    fn test_null_comparisons_become_null_tests() {
        assert_eq!(Filter::eq("widget_id", Option::<i64>::None), Filter::is_null("widget_id"));
        assert_eq!(Filter::ne("widget_id", Option::<i64>::None), Filter::is_not_null("widget_id"));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(7i16), Value::Int(7));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from("bolt"), Value::Text("bolt".to_string()));
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
        assert_eq!(Value::from(Option::<bool>::None), Value::Null);
    }
}
