use super::model::{AttritionDataset, FieldValue};
use super::stats::{self, BoxStats, CorrelationMatrix};

// ---------------------------------------------------------------------------
// Chart specifications – the fixed set of dashboard views
// ---------------------------------------------------------------------------

/// Maximum rows shown in the on-screen data table.
pub const PREVIEW_LIMIT: usize = 100;

/// Default file name offered for the CSV export.
pub const EXPORT_FILE_NAME: &str = "filtered_attrition.csv";

/// Thematic dashboard sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Macro,
    Distributions,
    Satisfaction,
    Correlation,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Overview,
        Section::Macro,
        Section::Distributions,
        Section::Satisfaction,
        Section::Correlation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "Overall Attrition",
            Section::Macro => "Macro-Level Visualizations",
            Section::Distributions => "Numeric Attribute Distributions",
            Section::Satisfaction => "Performance and Satisfaction",
            Section::Correlation => "Correlations & Heatmap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Histogram,
    BoxPlot,
    Violin,
    Heatmap,
}

/// Declarative descriptor of one dashboard chart: what kind, which field it
/// maps, and which field splits it into grouped series.
#[derive(Debug)]
pub struct ChartSpec {
    pub title: &'static str,
    pub section: Section,
    pub kind: ChartKind,
    pub field: &'static str,
    pub group_by: Option<&'static str>,
    /// Histograms only: stack the group series on top of each other
    /// instead of placing them side by side.
    pub stacked: bool,
    pub blurb: Option<&'static str>,
}

const fn grouped(
    title: &'static str,
    section: Section,
    kind: ChartKind,
    field: &'static str,
) -> ChartSpec {
    ChartSpec {
        title,
        section,
        kind,
        field,
        group_by: Some("Attrition"),
        stacked: false,
        blurb: None,
    }
}

const fn stacked_hist(
    title: &'static str,
    section: Section,
    field: &'static str,
) -> ChartSpec {
    ChartSpec {
        title,
        section,
        kind: ChartKind::Histogram,
        field,
        group_by: Some("Attrition"),
        stacked: true,
        blurb: None,
    }
}

/// The sixteen dashboard views. Iterated in order to produce artifacts; the
/// UI only groups them by section.
pub static CHART_SPECS: [ChartSpec; 16] = [
    ChartSpec {
        title: "Attrition Distribution",
        section: Section::Overview,
        kind: ChartKind::Pie,
        field: "Attrition",
        group_by: None,
        stacked: false,
        blurb: Some("Shows overall distribution of employee attrition."),
    },
    ChartSpec {
        title: "Attrition Count by Department",
        section: Section::Macro,
        kind: ChartKind::Histogram,
        field: "Department",
        group_by: Some("Attrition"),
        stacked: false,
        blurb: Some("This chart highlights attrition across departments."),
    },
    grouped(
        "Attrition by Gender",
        Section::Macro,
        ChartKind::Histogram,
        "Gender",
    ),
    grouped(
        "Attrition by Job Role",
        Section::Macro,
        ChartKind::Histogram,
        "JobRole",
    ),
    grouped(
        "Attrition by Marital Status",
        Section::Macro,
        ChartKind::Histogram,
        "MaritalStatus",
    ),
    grouped(
        "Attrition by Business Travel",
        Section::Macro,
        ChartKind::Histogram,
        "BusinessTravel",
    ),
    stacked_hist("Age Distribution", Section::Distributions, "Age"),
    grouped(
        "Monthly Income by Attrition",
        Section::Distributions,
        ChartKind::BoxPlot,
        "MonthlyIncome",
    ),
    grouped(
        "Distance From Home",
        Section::Distributions,
        ChartKind::Violin,
        "DistanceFromHome",
    ),
    stacked_hist("Years At Company", Section::Distributions, "YearsAtCompany"),
    stacked_hist(
        "Total Working Years",
        Section::Distributions,
        "TotalWorkingYears",
    ),
    stacked_hist("Job Satisfaction", Section::Satisfaction, "JobSatisfaction"),
    stacked_hist(
        "Environment Satisfaction",
        Section::Satisfaction,
        "EnvironmentSatisfaction",
    ),
    stacked_hist("Work Life Balance", Section::Satisfaction, "WorkLifeBalance"),
    stacked_hist(
        "Performance Rating",
        Section::Satisfaction,
        "PerformanceRating",
    ),
    ChartSpec {
        title: "Correlation Heatmap",
        section: Section::Correlation,
        kind: ChartKind::Heatmap,
        field: "",
        group_by: None,
        stacked: false,
        blurb: Some("Shows correlation between numeric features."),
    },
];

// ---------------------------------------------------------------------------
// Chart artifacts – data shaped for each chart primitive
// ---------------------------------------------------------------------------

/// One grouped histogram series: counts aligned with the category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub label: String,
    pub counts: Vec<f64>,
}

/// Violin outline plus its inner box summary.
#[derive(Debug, Clone)]
pub struct ViolinGroup {
    pub label: String,
    pub stats: BoxStats,
    /// `(value, density)` samples of the KDE, low to high.
    pub profile: Vec<(f64, f64)>,
}

/// Shaped input for exactly one chart primitive. No rendering here.
#[derive(Debug, Clone)]
pub enum ChartData {
    Pie { slices: Vec<(String, f64)> },
    Histogram {
        categories: Vec<String>,
        series: Vec<HistogramSeries>,
    },
    BoxPlot { groups: Vec<(String, BoxStats)> },
    Violin { groups: Vec<ViolinGroup> },
    Heatmap(CorrelationMatrix),
}

/// A spec together with its data, ready for the UI layer.
#[derive(Debug)]
pub struct ChartArtifact {
    pub spec: &'static ChartSpec,
    pub data: ChartData,
}

/// Shape the filtered rows (given by `indices`) into the artifact for one
/// chart specification.
pub fn render(
    spec: &'static ChartSpec,
    dataset: &AttritionDataset,
    indices: &[usize],
) -> ChartArtifact {
    let data = match spec.kind {
        ChartKind::Pie => pie_data(dataset, indices, spec.field),
        ChartKind::Histogram => histogram_data(dataset, indices, spec),
        ChartKind::BoxPlot => ChartData::BoxPlot {
            groups: numeric_groups(dataset, indices, spec)
                .into_iter()
                .filter_map(|(label, values)| {
                    stats::box_stats(&values).map(|st| (label, st))
                })
                .collect(),
        },
        ChartKind::Violin => ChartData::Violin {
            groups: numeric_groups(dataset, indices, spec)
                .into_iter()
                .filter_map(|(label, values)| {
                    stats::box_stats(&values).map(|st| ViolinGroup {
                        label,
                        stats: st,
                        profile: stats::density_profile(&values, 48),
                    })
                })
                .collect(),
        },
        ChartKind::Heatmap => ChartData::Heatmap(stats::correlation_matrix(dataset, indices)),
    };
    ChartArtifact { spec, data }
}

// ---------------------------------------------------------------------------
// Shaping helpers
// ---------------------------------------------------------------------------

/// Fields with more distinct numeric values than this get binned; everything
/// else (including the ordinal satisfaction scores) keeps its distinct
/// values as discrete categories.
const MAX_DISCRETE: usize = 20;
const BIN_COUNT: usize = 20;

/// Category axis of a histogram. Derived from the full dataset so bins and
/// category order stay put while filters change.
enum Axis {
    Discrete(Vec<FieldValue>),
    Binned { min: f64, width: f64, count: usize },
}

impl Axis {
    fn for_field(dataset: &AttritionDataset, field: &str) -> Axis {
        let values: Vec<FieldValue> = dataset
            .unique_values
            .get(field)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();

        if values.len() > MAX_DISCRETE {
            let numeric: Option<Vec<f64>> = values.iter().map(FieldValue::as_f64).collect();
            if let Some(nums) = numeric {
                let min = nums.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = nums.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let width = (max - min) / BIN_COUNT as f64;
                if width > 0.0 {
                    return Axis::Binned {
                        min,
                        width,
                        count: BIN_COUNT,
                    };
                }
            }
        }
        Axis::Discrete(values)
    }

    fn labels(&self) -> Vec<String> {
        match self {
            Axis::Discrete(values) => values.iter().map(|v| v.to_string()).collect(),
            Axis::Binned { min, width, count } => (0..*count)
                .map(|i| {
                    let lo = min + width * i as f64;
                    let hi = lo + width;
                    format!("{lo:.0}-{hi:.0}")
                })
                .collect(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Axis::Discrete(values) => values.len(),
            Axis::Binned { count, .. } => *count,
        }
    }

    fn index_of(&self, value: &FieldValue) -> Option<usize> {
        match self {
            Axis::Discrete(values) => values.iter().position(|v| v == value),
            Axis::Binned { min, width, count } => {
                let x = value.as_f64()?;
                let idx = ((x - min) / width).floor() as isize;
                Some(idx.clamp(0, *count as isize - 1) as usize)
            }
        }
    }
}

/// Grouping labels for a spec: the dataset-level distinct values of the
/// group-by field, or a single unnamed group when there is none.
fn group_values(dataset: &AttritionDataset, spec: &ChartSpec) -> Vec<Option<FieldValue>> {
    match spec.group_by {
        Some(field) => dataset
            .unique_values
            .get(field)
            .map(|set| set.iter().cloned().map(Some).collect())
            .unwrap_or_default(),
        None => vec![None],
    }
}

fn row_in_group(
    dataset: &AttritionDataset,
    row: usize,
    spec: &ChartSpec,
    group: &Option<FieldValue>,
) -> bool {
    match (spec.group_by, group) {
        (Some(field), Some(val)) => dataset.rows[row].get(field) == Some(val),
        _ => true,
    }
}

fn pie_data(dataset: &AttritionDataset, indices: &[usize], field: &str) -> ChartData {
    let values: Vec<FieldValue> = dataset
        .unique_values
        .get(field)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default();

    let slices = values
        .iter()
        .map(|val| {
            let count = indices
                .iter()
                .filter(|&&i| dataset.rows[i].get(field) == Some(val))
                .count();
            (val.to_string(), count as f64)
        })
        .collect();
    ChartData::Pie { slices }
}

fn histogram_data(dataset: &AttritionDataset, indices: &[usize], spec: &ChartSpec) -> ChartData {
    let axis = Axis::for_field(dataset, spec.field);

    let series = group_values(dataset, spec)
        .into_iter()
        .map(|group| {
            let mut counts = vec![0.0; axis.len()];
            for &i in indices {
                if !row_in_group(dataset, i, spec, &group) {
                    continue;
                }
                if let Some(idx) = dataset.rows[i]
                    .get(spec.field)
                    .and_then(|v| axis.index_of(v))
                {
                    counts[idx] += 1.0;
                }
            }
            HistogramSeries {
                label: group.map(|v| v.to_string()).unwrap_or_else(|| "All".into()),
                counts,
            }
        })
        .collect();

    ChartData::Histogram {
        categories: axis.labels(),
        series,
    }
}

/// Collect the numeric values of `spec.field` per group, in group order.
/// Groups with no numeric values in the filtered rows come back empty.
fn numeric_groups(
    dataset: &AttritionDataset,
    indices: &[usize],
    spec: &ChartSpec,
) -> Vec<(String, Vec<f64>)> {
    group_values(dataset, spec)
        .into_iter()
        .map(|group| {
            let values: Vec<f64> = indices
                .iter()
                .filter(|&&i| row_in_group(dataset, i, spec, &group))
                .filter_map(|&i| dataset.rows[i].get(spec.field).and_then(FieldValue::as_f64))
                .collect();
            (
                group.map(|v| v.to_string()).unwrap_or_else(|| "All".into()),
                values,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Table preview and CSV export
// ---------------------------------------------------------------------------

/// The first `min(PREVIEW_LIMIT, n)` filtered indices, original order.
/// A literal truncation, not a sample.
pub fn preview(indices: &[usize]) -> &[usize] {
    &indices[..indices.len().min(PREVIEW_LIMIT)]
}

/// Serialize the full (untruncated) filtered table as UTF-8 CSV: header row
/// included, source column order, no index column.
pub fn export_csv(dataset: &AttritionDataset, indices: &[usize]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&dataset.columns)?;
    for &i in indices {
        let row = &dataset.rows[i];
        let values: Vec<&FieldValue> = dataset
            .columns
            .iter()
            .map(|col| row.get(col).unwrap_or(&FieldValue::Null))
            .collect();
        wtr.serialize(values)?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}
