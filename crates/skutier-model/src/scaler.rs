//! Column standardization to zero mean and unit variance.

use crate::error::ModelError;

/// Per-column mean and scale learned from a training matrix.
///
/// Uses the population standard deviation. A column with zero variance gets
/// a scale of 1.0 so it transforms to all zeros instead of NaN.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit on row-major data where every row has the same width.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DegenerateInput`] for an empty matrix, ragged
    /// rows or non-finite values.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        let Some(first) = rows.first() else {
            return Err(ModelError::DegenerateInput(
                "cannot fit scaler on zero rows".to_string(),
            ));
        };
        let width = first.len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(ModelError::DegenerateInput(
                "scaler rows have inconsistent widths".to_string(),
            ));
        }
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ModelError::DegenerateInput(
                "scaler input contains non-finite values".to_string(),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let n = rows.len() as f64;
        let mut means = vec![0.0; width];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut scales = vec![0.0; width];
        for row in rows {
            for ((s, v), m) in scales.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut scales {
            let std = (*s / n).sqrt();
            *s = if std > f64::EPSILON { std } else { 1.0 };
        }

        Ok(Self { means, scales })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.means.len()
    }

    #[must_use]
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}
