//! Linear regression with a combined L1/L2 penalty, fit by coordinate descent.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::ModelError;

/// Order in which coordinates are updated each sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Cyclic,
    /// Visit every coordinate once per sweep in a freshly shuffled order.
    Random,
}

#[derive(Debug, Clone)]
pub struct ElasticNetParams {
    /// Overall penalty strength.
    pub alpha: f64,
    /// Share of the penalty that is L1; `1.0` is the lasso, `0.0` is ridge.
    pub l1_ratio: f64,
    pub max_iter: usize,
    pub tol: f64,
    pub selection: Selection,
    pub seed: u64,
}

impl Default for ElasticNetParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            l1_ratio: 0.5,
            max_iter: 1000,
            tol: 1e-4,
            selection: Selection::Cyclic,
            seed: 42,
        }
    }
}

/// A fitted elastic-net model.
///
/// Minimizes `1/(2n)·‖y − Xw − b‖² + α·ρ·‖w‖₁ + α·(1−ρ)/2·‖w‖²` with an
/// unpenalized intercept `b`.
#[derive(Debug, Clone)]
pub struct ElasticNet {
    coefficients: Vec<f64>,
    intercept: f64,
    iterations: usize,
    converged: bool,
}

impl ElasticNet {
    /// Fit on a dense row-major design matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DegenerateInput`] for empty or ragged input,
    /// mismatched target length, non-finite values or invalid penalties.
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &ElasticNetParams) -> Result<Self, ModelError> {
        let (n, p) = validate(x, y, params)?;

        #[allow(clippy::cast_precision_loss)]
        let n_f = n as f64;
        let y_mean = y.iter().sum::<f64>() / n_f;
        let mut x_mean = vec![0.0; p];
        for row in x {
            for (m, v) in x_mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut x_mean {
            *m /= n_f;
        }

        // Centered, column-major copy of X.
        let columns: Vec<Vec<f64>> = (0..p)
            .map(|j| x.iter().map(|row| row[j] - x_mean[j]).collect())
            .collect();
        let norm_sq: Vec<f64> = columns
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum())
            .collect();

        let l1_reg = params.alpha * params.l1_ratio * n_f;
        let l2_reg = params.alpha * (1.0 - params.l1_ratio) * n_f;

        let mut w = vec![0.0; p];
        let mut residual: Vec<f64> = y.iter().map(|v| v - y_mean).collect();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut iterations = 0;
        let mut converged = p == 0;
        let mut order: Vec<usize> = (0..p).collect();

        while !converged && iterations < params.max_iter {
            iterations += 1;
            let mut max_delta = 0.0_f64;
            let mut max_weight = 0.0_f64;

            if params.selection == Selection::Random {
                order.shuffle(&mut rng);
            }

            for &j in &order {
                let denom = norm_sq[j] + l2_reg;
                if denom == 0.0 {
                    continue;
                }

                let old = w[j];
                let rho = columns[j]
                    .iter()
                    .zip(&residual)
                    .map(|(c, r)| c * r)
                    .sum::<f64>()
                    + norm_sq[j] * old;
                let new = soft_threshold(rho, l1_reg) / denom;

                if new != old {
                    let delta = new - old;
                    for (r, c) in residual.iter_mut().zip(&columns[j]) {
                        *r -= c * delta;
                    }
                    w[j] = new;
                }
                max_delta = max_delta.max((new - old).abs());
                max_weight = max_weight.max(new.abs());
            }

            if max_weight == 0.0 || max_delta / max_weight < params.tol {
                converged = true;
            }
        }

        if !converged {
            tracing::warn!(
                iterations,
                alpha = params.alpha,
                l1_ratio = params.l1_ratio,
                "elastic net did not converge; consider raising max_iter"
            );
        }

        let intercept = y_mean - x_mean.iter().zip(&w).map(|(m, c)| m * c).sum::<f64>();

        Ok(Self {
            coefficients: w,
            intercept,
            iterations,
            converged,
        })
    }

    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(v, c)| v * c)
                .sum::<f64>()
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

fn validate(
    x: &[Vec<f64>],
    y: &[f64],
    params: &ElasticNetParams,
) -> Result<(usize, usize), ModelError> {
    let n = x.len();
    if n == 0 {
        return Err(ModelError::DegenerateInput(
            "cannot fit elastic net on zero rows".to_string(),
        ));
    }
    if y.len() != n {
        return Err(ModelError::DegenerateInput(format!(
            "design matrix has {n} rows but target has {}",
            y.len()
        )));
    }
    let p = x[0].len();
    if x.iter().any(|row| row.len() != p) {
        return Err(ModelError::DegenerateInput(
            "design matrix rows have inconsistent widths".to_string(),
        ));
    }
    if x.iter().flatten().chain(y).any(|v| !v.is_finite()) {
        return Err(ModelError::DegenerateInput(
            "design matrix or target contains non-finite values".to_string(),
        ));
    }
    if !(params.alpha >= 0.0 && params.alpha.is_finite()) {
        return Err(ModelError::DegenerateInput(format!(
            "alpha must be finite and non-negative, got {}",
            params.alpha
        )));
    }
    if !(0.0..=1.0).contains(&params.l1_ratio) {
        return Err(ModelError::DegenerateInput(format!(
            "l1_ratio must lie in [0, 1], got {}",
            params.l1_ratio
        )));
    }
    Ok((n, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let x: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..n).map(|i| 3.0 * i as f64 + 2.0).collect();
        (x, y)
    }

    #[test]
    fn tiny_penalty_recovers_line() {
        let (x, y) = line(20);
        let params = ElasticNetParams {
            alpha: 1e-8,
            ..ElasticNetParams::default()
        };
        let model = ElasticNet::fit(&x, &y, &params).unwrap();
        assert!(model.converged());
        assert!((model.coefficients()[0] - 3.0).abs() < 1e-4);
        assert!((model.intercept() - 2.0).abs() < 1e-3);
        assert!((model.predict_row(&[10.0]) - 32.0).abs() < 1e-3);
    }

    #[test]
    fn penalty_shrinks_towards_zero() {
        let (x, y) = line(20);
        let with_alpha = |alpha: f64| ElasticNetParams {
            alpha,
            ..ElasticNetParams::default()
        };
        let loose = ElasticNet::fit(&x, &y, &with_alpha(1e-8)).unwrap();
        let tight = ElasticNet::fit(&x, &y, &with_alpha(5.0)).unwrap();
        assert!(tight.coefficients()[0].abs() < loose.coefficients()[0].abs());
    }

    #[test]
    fn huge_penalty_predicts_the_mean() {
        let (x, y) = line(10);
        let params = ElasticNetParams {
            alpha: 1e6,
            l1_ratio: 1.0,
            ..ElasticNetParams::default()
        };
        let model = ElasticNet::fit(&x, &y, &params).unwrap();
        assert_eq!(model.coefficients(), &[0.0]);
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        assert!((model.predict_row(&[100.0]) - mean).abs() < 1e-12);
    }

    #[test]
    fn constant_column_keeps_zero_weight() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 4.0]).collect();
        let y: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let model = ElasticNet::fit(&x, &y, &ElasticNetParams::default()).unwrap();
        assert_eq!(model.coefficients()[1], 0.0);
    }

    #[test]
    fn random_selection_reaches_the_cyclic_solution() {
        let x: Vec<Vec<f64>> = (0..30)
            .map(|i| vec![i as f64 / 10.0, ((i * i) % 7) as f64])
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 2.0 * r[0] - r[1] + 1.0).collect();
        let base = ElasticNetParams {
            alpha: 1e-3,
            max_iter: 100_000,
            tol: 1e-12,
            ..ElasticNetParams::default()
        };
        let cyclic = ElasticNet::fit(&x, &y, &base).unwrap();
        let random = ElasticNet::fit(
            &x,
            &y,
            &ElasticNetParams {
                selection: Selection::Random,
                ..base.clone()
            },
        )
        .unwrap();
        for (a, b) in cyclic.coefficients().iter().zip(random.coefficients()) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn rejects_mismatched_target() {
        let (x, _) = line(5);
        let err = ElasticNet::fit(&x, &[1.0, 2.0], &ElasticNetParams::default()).unwrap_err();
        assert!(matches!(err, ModelError::DegenerateInput(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let x = vec![vec![1.0], vec![f64::NAN]];
        assert!(ElasticNet::fit(&x, &[1.0, 2.0], &ElasticNetParams::default()).is_err());
    }

    #[test]
    fn rejects_invalid_l1_ratio() {
        let (x, y) = line(5);
        let params = ElasticNetParams {
            l1_ratio: 1.5,
            ..ElasticNetParams::default()
        };
        assert!(ElasticNet::fit(&x, &y, &params).is_err());
    }
}
