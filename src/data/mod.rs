/// Data layer: core types, loading, filtering, and view derivation.
///
/// Architecture:
/// ```text
///      EA.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate schema → AttritionDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ AttritionDataset  │  Vec<EmployeeRow>, column value sets
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  per-field selections → filtered row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  view     │  16 chart artifacts, preview, CSV export
///   └──────────┘
/// ```
///
/// Everything here is a pure function of `(dataset, selection)`; the UI
/// layer owns no derivation logic of its own.

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod view;

#[cfg(test)]
pub mod testutil;
