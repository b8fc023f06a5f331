//! Demand regressor: standardized numeric features plus TF-IDF titles fed
//! into an elastic net, evaluated on a chronological hold-out.

use crate::elastic_net::{ElasticNet, ElasticNetParams};
use crate::error::ModelError;
use crate::metrics::mean_absolute_error;
use crate::scaler::StandardScaler;
use crate::tfidf::TfidfVectorizer;
use crate::types::{FeatureRow, RegressionReport};

#[derive(Debug, Clone)]
pub struct RegressorConfig {
    /// Share of the newest rows held out for evaluation.
    pub test_fraction: f64,
    pub net: ElasticNetParams,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            net: ElasticNetParams::default(),
        }
    }
}

/// Split time-ordered rows into a training prefix and a held-out suffix.
///
/// The suffix holds `ceil(test_fraction * n)` rows. Rows are never shuffled,
/// so nothing from the future leaks into training.
///
/// # Errors
///
/// Returns [`ModelError::InvalidConfig`] if `test_fraction` is outside
/// `(0, 1)` and [`ModelError::InsufficientData`] if either side would be empty.
pub fn chronological_split(
    rows: &[FeatureRow],
    test_fraction: f64,
) -> Result<(&[FeatureRow], &[FeatureRow]), ModelError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ModelError::InvalidConfig(format!(
            "test_fraction must lie in (0, 1), got {test_fraction}"
        )));
    }

    let n = rows.len();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(ModelError::InsufficientData(format!(
            "{n} rows cannot be split into non-empty train and test partitions"
        )));
    }

    Ok(rows.split_at(n - n_test))
}

/// Preprocessing and model, all fit on the training partition only.
#[derive(Debug, Clone)]
pub struct FittedRegressor {
    scaler: StandardScaler,
    tfidf: TfidfVectorizer,
    model: ElasticNet,
}

impl FittedRegressor {
    /// # Errors
    ///
    /// Returns [`ModelError::DegenerateInput`] if any preprocessing step or
    /// the elastic net cannot be fit on `train`.
    pub fn fit(train: &[FeatureRow], params: &ElasticNetParams) -> Result<Self, ModelError> {
        let numeric: Vec<Vec<f64>> = train.iter().map(numeric_features).collect();
        let scaler = StandardScaler::fit(&numeric)?;

        let titles: Vec<&str> = train.iter().map(|r| r.post.title.as_str()).collect();
        let tfidf = TfidfVectorizer::fit(&titles)?;

        let design: Vec<Vec<f64>> = train
            .iter()
            .map(|r| design_row(&scaler, &tfidf, r))
            .collect();
        let target: Vec<f64> = train.iter().map(|r| r.norm_score).collect();
        let model = ElasticNet::fit(&design, &target, params)?;

        tracing::debug!(
            features = design.first().map_or(0, Vec::len),
            iterations = model.iterations(),
            converged = model.converged(),
            "demand regressor fit"
        );

        Ok(Self {
            scaler,
            tfidf,
            model,
        })
    }

    #[must_use]
    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.model
            .predict_row(&design_row(&self.scaler, &self.tfidf, row))
    }

    #[must_use]
    pub fn model(&self) -> &ElasticNet {
        &self.model
    }
}

/// Standardized numeric columns followed by the dense TF-IDF title vector.
fn design_row(scaler: &StandardScaler, tfidf: &TfidfVectorizer, row: &FeatureRow) -> Vec<f64> {
    let mut dense = scaler.transform_row(&numeric_features(row));
    let offset = dense.len();
    dense.resize(offset + tfidf.vocabulary_len(), 0.0);
    for (idx, weight) in tfidf.transform(&row.post.title) {
        dense[offset + idx] = weight;
    }
    dense
}

fn numeric_features(row: &FeatureRow) -> Vec<f64> {
    vec![
        row.post.price,
        f64::from(row.hour),
        f64::from(row.dow),
        row.lag7_mean,
    ]
}

/// Fit on the chronological training prefix and report MAE on the suffix.
///
/// # Errors
///
/// Propagates split and fit failures; any of them is fatal to the run since
/// a single shared model is used.
pub fn evaluate_regressor(
    rows: &[FeatureRow],
    config: &RegressorConfig,
) -> Result<RegressionReport, ModelError> {
    let (train, test) = chronological_split(rows, config.test_fraction)?;
    let fitted = FittedRegressor::fit(train, &config.net)?;

    let actual: Vec<f64> = test.iter().map(|r| r.norm_score).collect();
    let predicted: Vec<f64> = test.iter().map(|r| fitted.predict(r)).collect();
    let mae = mean_absolute_error(&actual, &predicted).ok_or_else(|| {
        ModelError::InsufficientData("held-out partition is empty".to_string())
    })?;

    let nonzero_coefficients = fitted
        .model()
        .coefficients()
        .iter()
        .filter(|c| **c != 0.0)
        .count();

    tracing::info!(
        mae,
        train_rows = train.len(),
        test_rows = test.len(),
        nonzero_coefficients,
        "regression evaluated"
    );

    Ok(RegressionReport {
        mae,
        train_rows: train.len(),
        test_rows: test.len(),
        nonzero_coefficients,
        converged: fitted.model().converged(),
    })
}
