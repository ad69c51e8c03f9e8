//! Factor impact analysis: how strongly each factor tracks a target column

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::correlation::pearson_correlation;
use super::loader::column_as_f64;

/// Ordinary least squares fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Number of complete (x, y) observations used in the fit
    pub n: usize,
}

impl Trendline {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Relationship between one factor and the target
#[derive(Debug, Clone, Serialize)]
pub struct FactorImpact {
    pub factor: String,
    pub correlation: Option<f64>,
    pub trendline: Option<Trendline>,
}

/// Fit an OLS trendline over rows where both values are present.
///
/// Returns `None` with fewer than two complete rows or a constant `x`.
pub fn fit_trendline(x: &[Option<f64>], y: &[Option<f64>]) -> Option<Trendline> {
    let points: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let n = points.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / nf;

    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
    let syy: f64 = points.iter().map(|p| (p.1 - mean_y).powi(2)).sum();

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A constant target is fit exactly by the horizontal line
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(Trendline {
        slope,
        intercept,
        r_squared,
        n,
    })
}

/// Correlate every factor with `target` and fit a trendline for each.
///
/// Sorted by absolute correlation descending; undefined correlations last.
pub fn factor_impacts<S: AsRef<str>>(
    df: &DataFrame,
    target: &str,
    factors: &[S],
) -> Result<Vec<FactorImpact>> {
    let y = column_as_f64(df, target)?;

    let mut impacts = factors
        .iter()
        .map(|factor| {
            let factor = factor.as_ref();
            let x = column_as_f64(df, factor)?;
            Ok(FactorImpact {
                factor: factor.to_string(),
                correlation: pearson_correlation(&x, &y),
                trendline: fit_trendline(&x, &y),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    impacts.sort_by(|a, b| {
        let a = a.correlation.map(f64::abs).unwrap_or(f64::NEG_INFINITY);
        let b = b.correlation.map(f64::abs).unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });

    Ok(impacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let x = vec![Some(1.0), Some(2.0), Some(3.0)];
        let y = vec![Some(3.0), Some(5.0), Some(7.0)];
        let fit = fit_trendline(&x, &y).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.predict(4.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_x_has_no_fit() {
        let x = vec![Some(1.0), Some(1.0)];
        let y = vec![Some(3.0), Some(5.0)];
        assert!(fit_trendline(&x, &y).is_none());
    }
}
