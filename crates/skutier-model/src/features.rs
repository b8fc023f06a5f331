//! Time and engagement features derived from the raw post table.

use std::collections::{HashMap, VecDeque};

use chrono::{Datelike, Timelike};
use skutier_core::Post;

use crate::types::FeatureRow;

/// Trailing window length for [`FeatureRow::lag7_mean`].
pub const LAG_WINDOW: usize = 7;

/// Derive per-row features and return rows sorted by ascending timestamp.
///
/// `age_hours` is floored at 1.0 before dividing so the newest post does
/// not divide by zero, and the subscriber count (in thousands) is floored
/// at 1.0 for the same reason on tiny communities.
#[must_use]
pub fn engineer_features(mut posts: Vec<Post>) -> Vec<FeatureRow> {
    let Some(latest) = posts.iter().map(|p| p.created_utc).max() else {
        return Vec::new();
    };

    posts.sort_by_key(|p| p.created_utc);

    let mut rows: Vec<FeatureRow> = posts
        .into_iter()
        .map(|post| {
            #[allow(clippy::cast_precision_loss)]
            let age_hours = (latest - post.created_utc).num_seconds() as f64 / 3600.0;
            let score_per_hour = f64::from(post.score) / age_hours.max(1.0);
            let norm_score = score_per_hour / (f64::from(post.subscribers) / 1000.0).max(1.0);
            FeatureRow {
                hour: post.created_utc.hour(),
                dow: post.created_utc.weekday().num_days_from_monday(),
                age_hours,
                score_per_hour,
                norm_score,
                lag7_mean: norm_score,
                post,
            }
        })
        .collect();

    fill_rolling_means(&mut rows, LAG_WINDOW);
    rows
}

/// Per-sku trailing mean over chronologically sorted rows.
///
/// Rows must already be in ascending timestamp order. Each sku keeps its own
/// bounded window, so a row only ever sees earlier rows of the same sku.
fn fill_rolling_means(rows: &mut [FeatureRow], window: usize) {
    let mut windows: HashMap<String, VecDeque<f64>> = HashMap::new();

    for row in rows.iter_mut() {
        let values = windows
            .entry(row.post.sku.clone())
            .or_insert_with(|| VecDeque::with_capacity(window + 1));

        values.push_back(row.norm_score);
        if values.len() > window {
            values.pop_front();
        }

        #[allow(clippy::cast_precision_loss)]
        let len = values.len() as f64;
        row.lag7_mean = values.iter().sum::<f64>() / len;
    }
}
