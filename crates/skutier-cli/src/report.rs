use std::fmt::Write;

use skutier_model::PipelineReport;

/// Plain-text report: the hold-out MAE, then one `<sku> <tier>` line per sku.
pub(crate) fn render_text(report: &PipelineReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MAE (regression): {}", report.regression.mae);
    out.push('\n');
    out.push_str("Tiered SKUs:\n");

    let width = report.tiers.tiers.keys().map(String::len).max().unwrap_or(0);
    for (sku, tier) in &report.tiers.tiers {
        let _ = writeln!(out, "{sku:<width$} {tier}");
    }
    out
}
