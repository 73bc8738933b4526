use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Columns exposed as multi-select filters in the side panel.
pub const FILTER_FIELDS: [&str; 4] = ["Department", "JobRole", "Gender", "OverTime"];

/// Minimum columns every source file must provide. Extra columns are kept
/// and participate in the numeric projection.
pub const REQUIRED_FIELDS: [&str; 16] = [
    "Age",
    "Attrition",
    "BusinessTravel",
    "Department",
    "DistanceFromHome",
    "EnvironmentSatisfaction",
    "Gender",
    "JobRole",
    "JobSatisfaction",
    "MaritalStatus",
    "MonthlyIncome",
    "OverTime",
    "PerformanceRating",
    "TotalWorkingYears",
    "WorkLifeBalance",
    "YearsAtCompany",
];

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Using `BTreeMap` / `BTreeSet` downstream
/// so `FieldValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

/// Serialize as the bare scalar (`Null` as an empty field) so a CSV export
/// parses back to the same value.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Float(v) => serializer.serialize_f64(*v),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Null => serializer.serialize_none(),
        }
    }
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Text(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl FieldValue {
    /// Interpret the value as `f64` for the numeric projection.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeRow – one record of the source table
// ---------------------------------------------------------------------------

/// A single employee record (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    /// Cell values keyed by column name.
    pub fields: BTreeMap<String, FieldValue>,
}

impl EmployeeRow {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }
}

// ---------------------------------------------------------------------------
// AttritionDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed per-column value sets.
/// Immutable after load; constructed once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AttritionDataset {
    /// Column names in source header order.
    pub columns: Vec<String>,
    /// All employee records, in source row order.
    pub rows: Vec<EmployeeRow>,
    /// For each column the sorted set of distinct values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl AttritionDataset {
    /// Build column value indices from the loaded rows.
    pub fn new(columns: Vec<String>, rows: Vec<EmployeeRow>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in &row.fields {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        AttritionDataset {
            columns,
            rows,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns whose every cell is numeric, in header order. Column type is
    /// a property of the full dataset, not of the current filter result.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| {
                self.unique_values.get(*col).is_some_and(|vals| {
                    !vals.is_empty() && vals.iter().all(|v| v.as_f64().is_some())
                })
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_as_f64() {
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(FieldValue::Text("Sales".into()).as_f64(), None);
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn field_value_ordering_is_total() {
        let mut set = BTreeSet::new();
        set.insert(FieldValue::Text("Yes".into()));
        set.insert(FieldValue::Text("No".into()));
        set.insert(FieldValue::Integer(1));
        set.insert(FieldValue::Null);
        let ordered: Vec<FieldValue> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                FieldValue::Null,
                FieldValue::Integer(1),
                FieldValue::Text("No".into()),
                FieldValue::Text("Yes".into()),
            ]
        );
    }

    #[test]
    fn numeric_columns_excludes_text_and_mixed() {
        let columns = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mk = |a: FieldValue, b: FieldValue, c: FieldValue| EmployeeRow {
            fields: [
                ("A".to_string(), a),
                ("B".to_string(), b),
                ("C".to_string(), c),
            ]
            .into_iter()
            .collect(),
        };
        let ds = AttritionDataset::new(
            columns,
            vec![
                mk(
                    FieldValue::Integer(1),
                    FieldValue::Text("x".into()),
                    FieldValue::Float(0.5),
                ),
                mk(
                    FieldValue::Integer(2),
                    FieldValue::Text("y".into()),
                    FieldValue::Null,
                ),
            ],
        );
        // C mixes Float and Null, so only A counts as numeric.
        assert_eq!(ds.numeric_columns(), vec!["A".to_string()]);
    }
}
