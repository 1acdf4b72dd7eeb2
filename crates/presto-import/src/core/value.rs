//! Typed bind values produced by coercion.
//!
//! The Presto statement protocol carries bound parameters as SQL text in an
//! `EXECUTE ... USING` clause, so every value knows how to render itself as
//! a typed literal the engine will not need to guess at.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use super::identifier::quote_literal;

/// SQL value enum covering the scalar types the importer supports.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Boolean value.
    Bool(bool),

    /// 8-bit signed integer (tinyint).
    TinyInt(i8),

    /// 16-bit signed integer (smallint).
    SmallInt(i16),

    /// 32-bit signed integer (integer, and bigint which is narrowed).
    Integer(i32),

    /// 32-bit floating point (real).
    Real(f32),

    /// 64-bit floating point (double).
    Double(f64),

    /// Exact decimal value of any precision.
    Decimal(BigDecimal),

    /// Character data (varchar, char).
    Varchar(String),

    /// Calendar date.
    Date(NaiveDate),
}

impl SqlValue {
    /// Render as a Presto SQL literal.
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Bool(v) => v.to_string(),
            SqlValue::TinyInt(v) => format!("TINYINT '{}'", v),
            SqlValue::SmallInt(v) => format!("SMALLINT '{}'", v),
            SqlValue::Integer(v) => v.to_string(),
            SqlValue::Real(v) => float_literal("REAL", *v as f64, v.to_string()),
            SqlValue::Double(v) => float_literal("DOUBLE", *v, v.to_string()),
            SqlValue::Decimal(v) => format!("DECIMAL '{}'", v.to_plain_string()),
            SqlValue::Varchar(v) => quote_literal(v),
            SqlValue::Date(v) => format!("DATE '{}'", v.format("%Y-%m-%d")),
        }
    }
}

fn float_literal(type_name: &str, v: f64, text: String) -> String {
    if v.is_nan() {
        format!("CAST(nan() AS {})", type_name)
    } else if v.is_infinite() && v > 0.0 {
        format!("CAST(infinity() AS {})", type_name)
    } else if v.is_infinite() {
        format!("CAST(-infinity() AS {})", type_name)
    } else {
        format!("{} '{}'", type_name, text)
    }
}
