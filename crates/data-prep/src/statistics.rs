//! Quantiles and IQR fences for numeric columns.

use crate::config::OutlierConfig;
use serde::{Deserialize, Serialize};

/// Returns the `q` quantile (`0.0..=1.0`) of an ascending sample.
///
/// Interpolates linearly between the two closest ranks, with
/// `rank = q * (n - 1)`. Returns `None` for an empty sample.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    debug_assert!((0.0..=1.0).contains(&q));
    let last = sorted.len().checked_sub(1)?;

    let rank = q * last as f64;
    let floor = rank.floor();
    let n = floor as usize;
    if n >= last {
        return Some(sorted[last]);
    }

    let fraction = rank - floor;
    let (low, high) = (sorted[n], sorted[n + 1]);
    Some(low + (high - low) * fraction)
}

/// IQR fences computed from one snapshot of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute the fences from raw column values.
    ///
    /// Missing and NaN values are ignored. Returns `None` when no value is left.
    pub fn from_values<I>(values: I, config: &OutlierConfig) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut sample: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        sample.sort_unstable_by(f64::total_cmp);

        let q1 = quantile(&sample, config.lower_quantile)?;
        let q3 = quantile(&sample, config.upper_quantile)?;
        Some(Self::from_quartiles(q1, q3, config.iqr_multiplier))
    }

    pub fn from_quartiles(q1: f64, q3: f64, multiplier: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    /// Whether `value` lies inside the closed fence interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}
