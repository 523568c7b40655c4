//! Second validation phase: row rules given each row's skip state.

use crate::config::{CoercionPolicy, ValidationConfig};
use crate::issue::{RowIssue, ValidationResult};
use crate::reconcile::SkipState;
use crate::rows::SubmissionRow;
use ozone_core::Localizer;

/// What a validation pass needs from its surroundings.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a ValidationConfig,
    pub localizer: &'a dyn Localizer,
}

impl<'a> RuleContext<'a> {
    pub fn new(config: &'a ValidationConfig, localizer: &'a dyn Localizer) -> Self {
        Self { config, localizer }
    }
}

/// Every rule the row currently violates, in rule order. Format issues for
/// unparseable numbers come first when the policy asks for them.
pub fn row_issues(
    row: &SubmissionRow,
    skip: SkipState,
    config: &ValidationConfig,
) -> Vec<RowIssue> {
    let mut issues = Vec::new();
    if config.coercion == CoercionPolicy::Flag {
        for name in row.field_names() {
            if let Some(text) = row.field(name).and_then(|f| f.unparseable_text()) {
                issues.push(RowIssue::UnparseableNumber {
                    field: name.to_string(),
                    value: text.to_string(),
                });
            }
        }
    }
    issues.extend(row.issues(skip));
    issues
}

/// Validate one row; `skip` comes from [`crate::reconcile_groups`] over the
/// row's tab.
pub fn validate_row(
    row: &SubmissionRow,
    skip: SkipState,
    ctx: &RuleContext<'_>,
) -> ValidationResult {
    ValidationResult::new(row_issues(row, skip, ctx.config), row.kind(), ctx.localizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{build_row, BuildParams};
    use ozone_core::{FieldValue, NoLabels, SubmissionKind};
    use ozone_i18n::{builtin, Language};
    use serde_json::json;

    fn destroyed(value: serde_json::Value) -> SubmissionRow {
        build_row(
            SubmissionKind::Destruction,
            BuildParams {
                prefill_data: serde_json::from_value(json!({ "quantity_destroyed": value })).ok(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn zero_policy_hides_bad_text() {
        let row = destroyed(json!("twelve"));
        let cfg = ValidationConfig::default();
        let result = validate_row(&row, SkipState::Evaluate, &RuleContext::new(&cfg, &NoLabels));
        assert_eq!(result.issues, vec![RowIssue::DestroyedRequired]);
    }

    #[test]
    fn flag_policy_reports_bad_text() {
        let row = destroyed(json!("twelve"));
        let cfg = ValidationConfig {
            coercion: CoercionPolicy::Flag,
            ..Default::default()
        };
        let result = validate_row(
            &row,
            SkipState::Evaluate,
            &RuleContext::new(&cfg, builtin(Language::En)),
        );
        assert_eq!(
            result.selected,
            vec![
                "Quantity destroyed: \"twelve\" is not a number.".to_string(),
                RowIssue::DestroyedRequired.to_string(),
            ]
        );
    }

    #[test]
    fn valid_row_has_empty_result() {
        let row = destroyed(json!(4.2));
        let cfg = ValidationConfig::default();
        let result = validate_row(&row, SkipState::Evaluate, &RuleContext::new(&cfg, &NoLabels));
        assert!(result.is_valid());
        assert!(result.selected.is_empty());
    }

    #[test]
    fn validation_is_pure() {
        let mut row = build_row(SubmissionKind::Emissions, BuildParams::default());
        row.field_mut("quantity_generated").unwrap().selected = Some(FieldValue::from("10"));
        let cfg = ValidationConfig::default();
        let ctx = RuleContext::new(&cfg, &NoLabels);
        let a = validate_row(&row, SkipState::Evaluate, &ctx);
        let b = validate_row(&row, SkipState::Evaluate, &ctx);
        assert_eq!(a, b);
        assert_eq!(
            a.issues,
            vec![RowIssue::FacilityRequired, RowIssue::EmittedRequired]
        );
    }
}
