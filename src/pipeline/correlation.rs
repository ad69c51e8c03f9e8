//! Pearson correlation matrix over numeric columns

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

use super::loader::column_as_f64;

/// Symmetric correlation matrix with named rows/columns.
///
/// The diagonal is 1.0; pairs whose correlation is undefined (fewer than two
/// complete observations, or a constant column) hold NaN.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Mat<f64>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Correlation between two named columns, `None` if either is unknown
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[(i, j)])
    }

    /// Row of the matrix as `(column, correlation)` pairs
    pub fn row(&self, column: &str) -> Option<Vec<(String, f64)>> {
        let i = self.index_of(column)?;
        Some(
            self.columns
                .iter()
                .enumerate()
                .map(|(j, name)| (name.clone(), self.values[(i, j)]))
                .collect(),
        )
    }
}

/// Compute the pairwise-complete Pearson correlation matrix of `columns`.
///
/// Every listed column must exist and be numeric. Pairs are computed in
/// parallel with Rayon.
pub fn correlation_matrix<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
) -> Result<CorrelationMatrix> {
    let names: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
    let data: Vec<Vec<Option<f64>>> = names
        .iter()
        .map(|name| column_as_f64(df, name))
        .collect::<Result<_>>()?;

    let n = names.len();

    // Upper triangle only; the matrix is mirrored afterwards
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let computed: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = pearson_correlation(&data[i], &data[j]).unwrap_or(f64::NAN);
            (i, j, r)
        })
        .collect();

    let mut values = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        values[(i, i)] = 1.0;
    }
    for (i, j, r) in computed {
        values[(i, j)] = r;
        values[(j, i)] = r;
    }

    Ok(CorrelationMatrix {
        columns: names,
        values,
    })
}

/// Pearson correlation over rows where both values are present.
///
/// Single-pass Welford accumulation for numerical stability. Returns `None`
/// with fewer than two complete rows or when either side has zero variance.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (a, b) in x.iter().zip(y.iter()) {
        if let (Some(a), Some(b)) = (a, b) {
            n += 1.0;
            let dx = a - mean_x;
            let dy = b - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (a - mean_x);
            var_y += dy * (b - mean_y);
            cov_xy += dx * (b - mean_y);
        }
    }

    if n < 2.0 || var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov_xy / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_positive() {
        let r = pearson_correlation(&some(&[1.0, 2.0, 3.0]), &some(&[2.0, 4.0, 6.0])).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_skips_incomplete_rows() {
        let x = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        let y = vec![Some(3.0), Some(2.0), Some(100.0), Some(1.0)];
        let r = pearson_correlation(&x, &y).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_is_undefined() {
        assert!(pearson_correlation(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])).is_none());
    }
}
