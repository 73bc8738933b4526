use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::model::{AttritionDataset, EmployeeRow, FieldValue, REQUIRED_FIELDS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fixed location of the source table, relative to the working directory.
pub const DATA_PATH: &str = "EA.csv";

/// A load failure is fatal: the dashboard cannot start without its data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Load the attrition table from a CSV file.
pub fn load_csv(path: &Path) -> Result<AttritionDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_dataset(file)
}

/// Parse a CSV table from any reader. A header row is required; every data
/// row becomes one [`EmployeeRow`] with the type of each cell guessed from
/// its text.
pub fn read_dataset<R: Read>(rdr: R) -> Result<AttritionDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|f| !columns.iter().any(|c| c == *f))
        .map(|f| f.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut fields = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(col) = columns.get(idx) {
                fields.insert(col.clone(), parse_field(value));
            }
        }
        rows.push(EmployeeRow { fields });
    }

    Ok(AttritionDataset::new(columns, rows))
}

/// Guess the type of a single CSV cell.
pub fn parse_field(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    FieldValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::tiny_dataset;
    use std::io::Cursor;

    #[test]
    fn parse_field_guesses_types() {
        assert_eq!(parse_field("42"), FieldValue::Integer(42));
        assert_eq!(parse_field("-7"), FieldValue::Integer(-7));
        assert_eq!(parse_field("3.25"), FieldValue::Float(3.25));
        assert_eq!(parse_field("Sales"), FieldValue::Text("Sales".into()));
        assert_eq!(parse_field(""), FieldValue::Null);
    }

    #[test]
    fn loads_rows_and_unique_values() {
        let ds = tiny_dataset();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.columns.len(), 16);

        let departments: Vec<String> = ds.unique_values["Department"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(
            departments,
            vec!["Research & Development".to_string(), "Sales".to_string()]
        );
    }

    #[test]
    fn numeric_projection_matches_schema() {
        let ds = tiny_dataset();
        let numeric = ds.numeric_columns();
        assert!(numeric.contains(&"Age".to_string()));
        assert!(numeric.contains(&"MonthlyIncome".to_string()));
        assert!(numeric.contains(&"JobSatisfaction".to_string()));
        assert!(!numeric.contains(&"Attrition".to_string()));
        assert!(!numeric.contains(&"Department".to_string()));
    }

    #[test]
    fn rejects_missing_required_columns() {
        let csv = "Age,Department\n41,Sales\n";
        let err = read_dataset(Cursor::new(csv)).unwrap_err();
        match err {
            LoadError::MissingColumns(missing) => {
                assert!(missing.contains(&"Gender".to_string()));
                assert!(missing.contains(&"OverTime".to_string()));
                assert!(!missing.contains(&"Age".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
