//! Column metadata for the target table.

use serde::{Deserialize, Serialize};

/// Column metadata as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Declared type, possibly with a precision suffix (e.g. "decimal(10,2)").
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Ordered columns of a table.
///
/// Iteration order is the order the engine reported, which is also the
/// positional order values are bound in. It must never be re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Append a column at the end of the bind order.
    pub fn push(&mut self, name: impl Into<String>, data_type: impl Into<String>) {
        self.columns.push(Column::new(name, data_type));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Column names in bind order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl FromIterator<(String, String)> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, data_type)| Column { name, data_type })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnSchema {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let mut schema = ColumnSchema::default();
        schema.push("zeta", "integer");
        schema.push("alpha", "varchar(20)");
        schema.push("mid", "date");
        assert_eq!(schema.names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_from_iterator() {
        let schema: ColumnSchema = vec![
            ("id".to_string(), "integer".to_string()),
            ("name".to_string(), "varchar(20)".to_string()),
        ]
        .into_iter()
        .collect();
        let types: Vec<&str> = schema.iter().map(|c| c.data_type.as_str()).collect();
        assert_eq!(types, vec!["integer", "varchar(20)"]);
    }

    #[test]
    fn test_empty() {
        assert!(ColumnSchema::default().is_empty());
    }
}
