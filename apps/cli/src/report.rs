//! Rendering of a validation report: plain text, or the per-row cells a form
//! front end displays.

use ozone_core::{FieldState, Localizer, SubmissionKind};
use ozone_rules::{Form, FormReport};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Rows of one tab as `field -> cell`, including derived cells and the
/// `validation` cell.
pub type TabCells = Vec<BTreeMap<String, FieldState>>;

/// Every row's cells as a front end shows them after validation.
pub fn render_cells(
    form: &Form,
    report: &FormReport,
    localizer: &dyn Localizer,
) -> BTreeMap<SubmissionKind, TabCells> {
    report
        .tabs
        .iter()
        .filter_map(|tab_report| {
            let tab = form.tab(tab_report.kind)?;
            let rows = tab
                .rows()
                .iter()
                .zip(&tab_report.rows)
                .map(|(row, row_report)| {
                    let mut cells = row.snapshot(localizer);
                    cells.insert("validation".to_string(), row_report.result.as_field());
                    cells
                })
                .collect();
            Some((tab_report.kind, rows))
        })
        .collect()
}

pub fn render_text(report: &FormReport) -> String {
    let mut out = String::new();
    for tab in &report.tabs {
        let _ = writeln!(
            out,
            "{}: {} rows, {} errors",
            tab.kind,
            tab.rows.len(),
            tab.error_count()
        );
        for d in &tab.discrepancies {
            let _ = writeln!(
                out,
                "  {}: new + recovered {} is less than itemized uses {}",
                d.item, d.left, d.right
            );
        }
        for row in tab.rows.iter().filter(|r| !r.result.is_valid()) {
            for message in &row.result.selected {
                let _ = writeln!(out, "  row {}: {}", row.index + 1, message);
            }
        }
    }
    let errors = report.error_count();
    if errors == 0 {
        out.push_str("OK: no errors\n");
    } else {
        let _ = writeln!(out, "FAILED: {} errors", errors);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozone_core::{FieldKind, FieldValue, NoLabels};
    use ozone_rules::{BuildParams, RowIssue, RuleContext, ValidationConfig};

    #[test]
    fn lists_row_messages_and_summary() {
        let mut form = Form::new();
        form.tab_mut(SubmissionKind::Destruction)
            .add_row(BuildParams::default());
        let cfg = ValidationConfig::default();
        let report = form.validate(&RuleContext::new(&cfg, &NoLabels));
        let text = render_text(&report);
        assert!(text.starts_with("has_destroyed: 1 rows, 1 errors\n"));
        assert!(text.contains(&format!("  row 1: {}", RowIssue::DestroyedRequired)));
        assert!(text.ends_with("FAILED: 1 errors\n"));
    }

    #[test]
    fn clean_report_says_ok() {
        let text = render_text(&FormReport::default());
        assert_eq!(text, "OK: no errors\n");
    }

    #[test]
    fn cells_carry_derived_and_validation_columns() {
        let mut form = Form::new();
        let cfg = ValidationConfig::default();
        form.tab_mut(SubmissionKind::Imports).add_row(BuildParams {
            prefill_data: serde_json::from_value(serde_json::json!({
                "quantity_total_new": 3,
                "quantity_essential_uses": 1
            }))
            .ok(),
            ..Default::default()
        });
        let report = form.validate(&RuleContext::new(&cfg, &NoLabels));
        let cells = render_cells(&form, &report, &NoLabels);
        let row = &cells[&SubmissionKind::Imports][0];
        assert_eq!(
            row["quantity_exempted"].selected,
            Some(FieldValue::Text("1".to_string()))
        );
        assert_eq!(row["validation"].kind, FieldKind::NonInput);
        assert_eq!(row["validation"].selected, Some(FieldValue::List(Vec::new())));
        assert!(row.contains_key("source_party"));
    }
}
