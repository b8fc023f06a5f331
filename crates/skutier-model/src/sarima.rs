//! Seasonal ARIMA estimated by conditional sum of squares.
//!
//! The model for a series `y` is
//!
//! ```text
//! φ(B) Φ(Bˢ) (1 − B)ᵈ (1 − Bˢ)ᴰ yₜ = θ(B) Θ(Bˢ) eₜ
//! ```
//!
//! with no trend term. Both sides are expanded into plain lag polynomials so
//! fitting and forecasting work directly on the undifferenced series.
//! Coefficients are searched in an unconstrained space and mapped through
//! partial autocorrelations, which keeps every AR factor stationary and
//! every MA factor invertible.

use thiserror::Error;

use crate::optimize::{nelder_mead, NelderMeadConfig};

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("{observed} observations, at least {required} required")]
    TooShort { observed: usize, required: usize },

    #[error("{0}")]
    NonFinite(String),

    #[error("invalid order: {0}")]
    InvalidOrder(String),
}

/// `(p, d, q) × (P, D, Q, s)` order of a seasonal ARIMA model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SarimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub seasonal_p: usize,
    pub seasonal_d: usize,
    pub seasonal_q: usize,
    pub period: usize,
}

impl Default for SarimaOrder {
    /// `(1, 1, 1) × (1, 0, 1, 7)`
    fn default() -> Self {
        Self {
            p: 1,
            d: 1,
            q: 1,
            seasonal_p: 1,
            seasonal_d: 0,
            seasonal_q: 1,
            period: 7,
        }
    }
}

impl SarimaOrder {
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.p + self.q + self.seasonal_p + self.seasonal_q
    }

    fn has_seasonal_terms(&self) -> bool {
        self.seasonal_p + self.seasonal_d + self.seasonal_q > 0
    }

    /// Degree of the expanded autoregressive polynomial, differencing included.
    fn ar_degree(&self) -> usize {
        self.p + self.d + self.period * (self.seasonal_p + self.seasonal_d)
    }

    /// Fewest observations accepted by [`Sarima::fit`]: two full seasonal
    /// cycles after differencing, and always more residuals than parameters.
    #[must_use]
    pub fn min_observations(&self) -> usize {
        let seasonal_window = self.d + self.period * self.seasonal_d + 2 * self.period;
        let identifiable = self.ar_degree() + self.n_params() + 1;
        seasonal_window.max(identifiable)
    }

    fn validate(&self) -> Result<(), FitError> {
        if self.has_seasonal_terms() && self.period < 2 {
            return Err(FitError::InvalidOrder(format!(
                "seasonal terms need a period of at least 2, got {}",
                self.period
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for SarimaOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{},{})({},{},{},{})",
            self.p,
            self.d,
            self.q,
            self.seasonal_p,
            self.seasonal_d,
            self.seasonal_q,
            self.period
        )
    }
}

/// Unfitted model: an order plus optimizer settings.
#[derive(Debug, Clone, Default)]
pub struct Sarima {
    pub order: SarimaOrder,
    pub optimizer: NelderMeadConfig,
}

impl Sarima {
    #[must_use]
    pub fn new(order: SarimaOrder) -> Self {
        Self {
            order,
            optimizer: NelderMeadConfig::default(),
        }
    }

    /// Estimate coefficients by minimizing the conditional sum of squares.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::TooShort`] below [`SarimaOrder::min_observations`],
    /// [`FitError::NonFinite`] for NaN/inf input or a diverged objective, and
    /// [`FitError::InvalidOrder`] for seasonal terms without a period.
    pub fn fit(&self, series: &[f64]) -> Result<FittedSarima, FitError> {
        let order = self.order;
        order.validate()?;

        let required = order.min_observations();
        if series.len() < required {
            return Err(FitError::TooShort {
                observed: series.len(),
                required,
            });
        }
        if series.iter().any(|v| !v.is_finite()) {
            return Err(FitError::NonFinite(
                "series contains NaN or infinite values".to_string(),
            ));
        }

        let objective = |u: &[f64]| {
            let coeffs = Coefficients::from_unconstrained(&order, u);
            let (ar, ma) = coeffs.polynomials(&order);
            conditional_sum_of_squares(series, &ar, &ma)
        };

        let start = vec![0.0; order.n_params()];
        let result = nelder_mead(objective, &start, &self.optimizer);
        if !result.value.is_finite() {
            return Err(FitError::NonFinite(
                "conditional sum of squares diverged".to_string(),
            ));
        }

        let coefficients = Coefficients::from_unconstrained(&order, &result.point);
        let (ar_poly, ma_poly) = coefficients.polynomials(&order);
        let residuals = residuals(series, &ar_poly, &ma_poly);

        #[allow(clippy::cast_precision_loss)]
        let effective = (series.len() - (ar_poly.len() - 1)) as f64;
        let sigma2 = result.value / effective;

        Ok(FittedSarima {
            order,
            coefficients,
            ar_poly,
            ma_poly,
            history: series.to_vec(),
            residuals,
            sigma2,
            iterations: result.iterations,
            converged: result.converged,
        })
    }
}

/// Constrained coefficients of each polynomial factor.
///
/// AR factors read `1 − Σ aᵢBⁱ`; MA factors read `1 + Σ mᵢBⁱ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
}

impl Coefficients {
    fn from_unconstrained(order: &SarimaOrder, u: &[f64]) -> Self {
        let (ar_u, rest) = u.split_at(order.p);
        let (ma_u, rest) = rest.split_at(order.q);
        let (sar_u, sma_u) = rest.split_at(order.seasonal_p);
        let invertible = |u: &[f64]| -> Vec<f64> {
            pacf_to_coefficients(u).into_iter().map(|c| -c).collect()
        };
        Self {
            ar: pacf_to_coefficients(ar_u),
            ma: invertible(ma_u),
            seasonal_ar: pacf_to_coefficients(sar_u),
            seasonal_ma: invertible(sma_u),
        }
    }

    /// Expanded `(ar, ma)` lag polynomials, leading coefficient 1.
    fn polynomials(&self, order: &SarimaOrder) -> (Vec<f64>, Vec<f64>) {
        let s = order.period;

        let mut ar = lag_polynomial(&self.ar, 1, -1.0);
        ar = multiply(&ar, &lag_polynomial(&self.seasonal_ar, s, -1.0));
        for _ in 0..order.d {
            ar = multiply(&ar, &[1.0, -1.0]);
        }
        for _ in 0..order.seasonal_d {
            let mut seasonal_diff = vec![0.0; s + 1];
            seasonal_diff[0] = 1.0;
            seasonal_diff[s] = -1.0;
            ar = multiply(&ar, &seasonal_diff);
        }

        let ma = multiply(
            &lag_polynomial(&self.ma, 1, 1.0),
            &lag_polynomial(&self.seasonal_ma, s, 1.0),
        );
        (ar, ma)
    }
}

/// A fitted model holding the series and in-sample residuals it was fit on.
#[derive(Debug, Clone)]
pub struct FittedSarima {
    pub order: SarimaOrder,
    pub coefficients: Coefficients,
    ar_poly: Vec<f64>,
    ma_poly: Vec<f64>,
    history: Vec<f64>,
    residuals: Vec<f64>,
    pub sigma2: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl FittedSarima {
    /// Point forecasts for the next `steps` periods, future shocks set to zero.
    #[must_use]
    pub fn forecast(&self, steps: usize) -> Vec<f64> {
        let n = self.history.len();
        let mut y = self.history.clone();
        let mut e = self.residuals.clone();
        y.reserve(steps);
        e.reserve(steps);

        for _ in 0..steps {
            let t = y.len();
            let value = one_step(&y, &e, t, &self.ar_poly, &self.ma_poly);
            y.push(value);
            e.push(0.0);
        }
        y.split_off(n)
    }

    #[must_use]
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }
}

/// Map unconstrained reals to the coefficients of a stationary AR polynomial
/// `1 − Σ aᵢBⁱ`: squash each to a partial autocorrelation in (−1, 1), then
/// run the Durbin–Levinson recursion.
#[must_use]
pub fn pacf_to_coefficients(u: &[f64]) -> Vec<f64> {
    let mut coeffs: Vec<f64> = Vec::with_capacity(u.len());
    for (k, &raw) in u.iter().enumerate() {
        let r = raw / (1.0 + raw * raw).sqrt();
        let prev = coeffs.clone();
        coeffs.push(r);
        for i in 0..k {
            coeffs[i] = prev[i] - r * prev[k - 1 - i];
        }
    }
    coeffs
}

/// `1 + sign · Σ cᵢ B^(i·spacing)`
fn lag_polynomial(coeffs: &[f64], spacing: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * spacing + 1];
    poly[0] = 1.0;
    for (i, c) in coeffs.iter().enumerate() {
        poly[(i + 1) * spacing] = sign * c;
    }
    poly
}

fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Prediction of `y[t]` from everything before `t`.
fn one_step(y: &[f64], e: &[f64], t: usize, ar: &[f64], ma: &[f64]) -> f64 {
    let ar_part: f64 = ar
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, c)| -c * y[t - k])
        .sum();
    let ma_part: f64 = ma
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(k, _)| *k <= t)
        .map(|(k, c)| c * e[t - k])
        .sum();
    ar_part + ma_part
}

/// In-sample one-step errors; zero before the first fully determined index.
fn residuals(y: &[f64], ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let start = ar.len() - 1;
    let mut e = vec![0.0; y.len()];
    for t in start..y.len() {
        e[t] = y[t] - one_step(y, &e, t, ar, ma);
    }
    e
}

fn conditional_sum_of_squares(y: &[f64], ar: &[f64], ma: &[f64]) -> f64 {
    residuals(y, ar, ma).iter().map(|e| e * e).sum()
}

#[cfg(test)]
#[path = "sarima_test.rs"]
mod tests;
