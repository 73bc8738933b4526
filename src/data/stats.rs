use super::model::{AttritionDataset, FieldValue};

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson correlation coefficient of two equally-long series.
/// Returns `NaN` for empty series or zero variance rather than erroring, so
/// a degenerate filter selection degrades to blank heatmap cells.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }
    cov / (vx * vy).sqrt()
}

/// Square Pearson matrix over the numeric projection of the filtered rows.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// Numeric column names, in source header order.
    pub fields: Vec<String>,
    /// `cells[i][j]` is the correlation of field i with field j.
    pub cells: Vec<Vec<f64>>,
}

/// Compute the correlation matrix of the rows selected by `indices`.
///
/// The set of numeric columns comes from the full dataset, so the matrix
/// keeps its shape while filters change; only the cell values move.
pub fn correlation_matrix(dataset: &AttritionDataset, indices: &[usize]) -> CorrelationMatrix {
    let fields = dataset.numeric_columns();
    let series: Vec<Vec<f64>> = fields
        .iter()
        .map(|col| {
            indices
                .iter()
                .filter_map(|&i| dataset.rows[i].get(col).and_then(FieldValue::as_f64))
                .collect()
        })
        .collect();

    let n = fields.len();
    let mut cells = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                if sum_of_squares(&series[i]) > 0.0 {
                    1.0
                } else {
                    f64::NAN
                }
            } else {
                pearson(&series[i], &series[j])
            };
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }
    CorrelationMatrix { fields, cells }
}

fn sum_of_squares(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    xs.iter().map(|x| (x - mean) * (x - mean)).sum()
}

// ---------------------------------------------------------------------------
// Box-plot spreads
// ---------------------------------------------------------------------------

/// Five-number summary for a box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarise a series; `None` when it is empty.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Linear-interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Kernel density estimate (violin outlines)
// ---------------------------------------------------------------------------

/// Sample a Gaussian KDE of `values` at `samples` evenly spaced points over
/// the value range. Returns `(position, density)` pairs; empty input gives
/// an empty profile.
pub fn density_profile(values: &[f64], samples: usize) -> Vec<(f64, f64)> {
    if values.is_empty() || samples < 2 {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sd = (values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Silverman's rule of thumb; fall back to a fraction of the range (or a
    // constant for a single repeated value) when variance collapses.
    let mut bandwidth = 1.06 * sd * n.powf(-0.2);
    if bandwidth <= 0.0 {
        bandwidth = ((max - min) / 10.0).max(0.5);
    }

    let span = (max - min).max(f64::EPSILON);
    (0..samples)
        .map(|s| {
            let x = min + span * s as f64 / (samples - 1) as f64;
            let density = values
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
            (x, density)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::tiny_dataset;

    #[test]
    fn pearson_on_perfectly_linear_series() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -3.0 * v).collect();
        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_degrades_to_nan() {
        assert!(pearson(&[], &[]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let ds = tiny_dataset();
        let indices: Vec<usize> = (0..ds.len()).collect();
        let m = correlation_matrix(&ds, &indices);

        assert!(!m.fields.is_empty());
        for i in 0..m.fields.len() {
            assert_eq!(m.cells[i][i], 1.0, "diagonal of {}", m.fields[i]);
            for j in 0..m.fields.len() {
                let a = m.cells[i][j];
                let b = m.cells[j][i];
                assert!(a == b || (a.is_nan() && b.is_nan()));
                if !a.is_nan() {
                    assert!((-1.0..=1.0).contains(&a));
                }
            }
        }
    }

    #[test]
    fn matrix_on_zero_rows_is_all_nan() {
        let ds = tiny_dataset();
        let m = correlation_matrix(&ds, &[]);
        assert_eq!(m.fields, ds.numeric_columns());
        assert!(m
            .cells
            .iter()
            .all(|row| row.iter().all(|c| c.is_nan())));
    }

    #[test]
    fn box_stats_five_number_summary() {
        let stats = box_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);

        assert_eq!(box_stats(&[]), None);
        let single = box_stats(&[7.0]).unwrap();
        assert_eq!(single.median, 7.0);
        assert_eq!(single.min, single.max);
    }

    #[test]
    fn density_profile_integrates_roughly_to_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 5.5];
        let profile = density_profile(&values, 64);
        assert_eq!(profile.len(), 64);
        let step = profile[1].0 - profile[0].0;
        let area: f64 = profile.iter().map(|&(_, d)| d * step).sum();
        // Tails beyond [min, max] are cut off, so the mass inside is < 1.
        assert!(area > 0.5 && area < 1.1, "area = {area}");
        assert!(density_profile(&[], 64).is_empty());
    }
}
