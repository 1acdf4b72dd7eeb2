//! Coercion of raw text fields into typed values by declared column type.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::core::SqlValue;
use crate::error::{ImportError, Result};

/// Base column types the importer can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    TinyInt,
    SmallInt,
    /// `integer` and `bigint`; both bind as 32-bit integers.
    Integer,
    Real,
    Double,
    Decimal,
    /// `varchar` and `char`.
    Varchar,
    Date,
}

impl ColumnType {
    /// Resolve a declared type such as `"varchar(20)"` or `"decimal(10,2)"`.
    ///
    /// The parenthesized suffix is dropped; only the base name is matched.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::UnsupportedColumnType` for any base type outside
    /// the supported scalar subset (timestamps, json, varbinary, array, ...).
    pub fn parse(declared: &str) -> Result<Self> {
        let base = base_type(declared);
        match base.as_str() {
            "boolean" => Ok(ColumnType::Boolean),
            "tinyint" => Ok(ColumnType::TinyInt),
            "smallint" => Ok(ColumnType::SmallInt),
            // bigint is deliberately narrowed to 32 bits.
            "integer" | "bigint" => Ok(ColumnType::Integer),
            "real" => Ok(ColumnType::Real),
            "double" => Ok(ColumnType::Double),
            "decimal" => Ok(ColumnType::Decimal),
            "varchar" | "char" => Ok(ColumnType::Varchar),
            "date" => Ok(ColumnType::Date),
            _ => Err(ImportError::UnsupportedColumnType(base)),
        }
    }

    /// Convert a raw field into a value of this type.
    pub fn coerce(self, raw: &str) -> Result<SqlValue> {
        match self {
            ColumnType::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(SqlValue::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(SqlValue::Bool(false))
                } else {
                    Err(ImportError::coercion("boolean", raw, "expected true or false"))
                }
            }
            ColumnType::TinyInt => raw
                .parse::<i8>()
                .map(SqlValue::TinyInt)
                .map_err(|e| ImportError::coercion("tinyint", raw, e)),
            ColumnType::SmallInt => raw
                .parse::<i16>()
                .map(SqlValue::SmallInt)
                .map_err(|e| ImportError::coercion("smallint", raw, e)),
            ColumnType::Integer => raw
                .parse::<i32>()
                .map(SqlValue::Integer)
                .map_err(|e| ImportError::coercion("integer", raw, e)),
            ColumnType::Real => raw
                .trim()
                .parse::<f32>()
                .map(SqlValue::Real)
                .map_err(|e| ImportError::coercion("real", raw, e)),
            ColumnType::Double => raw
                .trim()
                .parse::<f64>()
                .map(SqlValue::Double)
                .map_err(|e| ImportError::coercion("double", raw, e)),
            ColumnType::Decimal => parse_decimal(raw).map(SqlValue::Decimal),
            ColumnType::Varchar => Ok(SqlValue::Varchar(raw.to_string())),
            ColumnType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(SqlValue::Date)
                .map_err(|e| ImportError::coercion("date", raw, e)),
        }
    }
}

/// Coerce a raw field according to its declared column type.
pub fn coerce(raw: &str, declared: &str) -> Result<SqlValue> {
    ColumnType::parse(declared)?.coerce(raw)
}

/// Strip any `(precision, scale)` suffix and normalize case.
fn base_type(declared: &str) -> String {
    declared
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Plain or exponent notation, no digit limit.
fn parse_decimal(raw: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(raw).map_err(|e| ImportError::coercion("decimal", raw, e))
}
