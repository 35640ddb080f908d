//! svar::bands — pointwise median and percentile bands over accepted draws.
//!
//! Percentiles use linear interpolation between order statistics: for n
//! sorted values and q ∈ [0, 100], the position is q/100 · (n − 1) and the
//! result interpolates its two neighbours. A cell containing NaN yields NaN.
use ndarray::Array3;

/// ResponseBands — median, lower, and upper tensors, each `(H + 1) × k × k`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBands {
    pub median: Array3<f64>,
    pub lower: Array3<f64>,
    pub upper: Array3<f64>,
}

/// compute_bands — cell-wise median and `lower_pct`/`upper_pct` percentiles.
///
/// Returns `None` when `draws` is empty. All draws must share one shape.
pub fn compute_bands(draws: &[Array3<f64>], lower_pct: f64, upper_pct: f64) -> Option<ResponseBands> {
    let first = draws.first()?;
    let dim = first.dim();
    let mut median = Array3::<f64>::zeros(dim);
    let mut lower = Array3::<f64>::zeros(dim);
    let mut upper = Array3::<f64>::zeros(dim);

    let mut cell = Vec::with_capacity(draws.len());
    for (idx, m) in median.indexed_iter_mut() {
        cell.clear();
        cell.extend(draws.iter().map(|d| d[idx]));
        if cell.iter().any(|v| v.is_nan()) {
            *m = f64::NAN;
            lower[idx] = f64::NAN;
            upper[idx] = f64::NAN;
            continue;
        }
        cell.sort_by(f64::total_cmp);
        *m = percentile_sorted(&cell, 50.0);
        lower[idx] = percentile_sorted(&cell, lower_pct);
        upper[idx] = percentile_sorted(&cell, upper_pct);
    }

    Some(ResponseBands { median, lower, upper })
}

/// Linear-interpolation percentile of an ascending slice; NaN when empty.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    match n {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }
    let pos = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
