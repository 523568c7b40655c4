//! Typed rule violations and their rendering.

use ozone_core::{FieldKind, FieldState, FieldValue, Localizer, SubmissionKind};
use serde::Serialize;
use thiserror::Error;

/// Broad class of a violation, for callers that treat them differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// A required field is empty.
    Completeness,
    /// A total does not cover the sum of its components.
    Balance,
    /// A complete emissions row does not add up exactly.
    ExactBalance,
    /// Rows split across trading partners do not reconcile.
    Aggregate,
    /// A numeric field holds text that is not a number.
    Format,
}

/// A rule a row currently violates. The display text is the English
/// message; [`RowIssue::render`] consults the localizer first.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RowIssue {
    #[error("Please fill in a total quantity (new, recovered or polyols) greater than zero.")]
    TradeTotalRequired,
    #[error("The sum of feedstock, exempted and quarantine quantities cannot exceed the total quantity (new + recovered).")]
    ComponentsExceedTotal,
    #[error("Across all rows reporting this substance, the total quantity (new + recovered) is smaller than the sum of feedstock, exempted and quarantine quantities.")]
    GroupUnreconciled,
    #[error("Please fill in the total production for all uses.")]
    ProductionTotalRequired,
    #[error("Total production must be at least the sum of feedstock, exempted and Article 5 quantities.")]
    ProductionBalanceArticle5,
    #[error("Total production must be at least the sum of feedstock, exempted and quarantine quantities.")]
    ProductionBalanceQuarantine,
    #[error("Total production must be at least the sum of feedstock and exempted quantities.")]
    ProductionBalance,
    #[error("Total production must be at least the sum of feedstock, captured for destruction and exempted quantities.")]
    ProductionBalanceDestruction,
    #[error("Please fill in a quantity destroyed other than zero.")]
    DestroyedRequired,
    #[error("Please fill in at least one import or export quantity greater than zero.")]
    NonPartyTotalRequired,
    #[error("Please fill in the facility name.")]
    FacilityRequired,
    #[error("Please fill in the amount of generated emissions.")]
    EmittedRequired,
    #[error("The total amount generated must be at least the sum of all captured, feedstock and destroyed amounts.")]
    GeneratedBelowParts,
    #[error("The amount captured for all uses must be at least the sum of the amounts captured for feedstock and for destruction.")]
    CapturedBelowParts,
    #[error("The total amount generated must equal the sum of the captured, feedstock, destroyed and emitted amounts.")]
    EmissionsNotBalanced,
    #[error("The total amount generated must be at least the sum of the captured, feedstock, destroyed and emitted amounts.")]
    GeneratedBelowSum,
    #[error("Please fill in an amount transferred greater than zero.")]
    TransferAmountRequired,
    #[error("Please fill in both the transferring and the receiving party.")]
    TransferPartiesRequired,
    #[error("The transferring and the receiving party must be different.")]
    TransferSameParty,
    #[error("Please fill in the process agent application.")]
    ApplicationRequired,
    #[error("Please fill in the make-up quantity.")]
    MakeupRequired,
    #[error("Emissions cannot exceed the make-up quantity.")]
    EmissionsExceedMakeup,
    #[error("Please fill in the quantities needed to compute the amount on hand at the end of the year.")]
    OnHandEndRequired,
    #[error("{field}: \"{value}\" is not a number.")]
    UnparseableNumber { field: String, value: String },
}

impl RowIssue {
    /// Catalog key of the message template.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TradeTotalRequired => "validation.trade.total_required",
            Self::ComponentsExceedTotal => "validation.trade.components_exceed_total",
            Self::GroupUnreconciled => "validation.trade.group_unreconciled",
            Self::ProductionTotalRequired => "validation.production.total_required",
            Self::ProductionBalanceArticle5 => "validation.production.balance_abc",
            Self::ProductionBalanceQuarantine => "validation.production.balance_e",
            Self::ProductionBalance => "validation.production.balance_fi",
            Self::ProductionBalanceDestruction => "validation.production.balance_fii",
            Self::DestroyedRequired => "validation.destruction.quantity_required",
            Self::NonPartyTotalRequired => "validation.nonparty.total_required",
            Self::FacilityRequired => "validation.emissions.facility_required",
            Self::EmittedRequired => "validation.emissions.emitted_required",
            Self::GeneratedBelowParts => "validation.emissions.generated_below_parts",
            Self::CapturedBelowParts => "validation.emissions.captured_below_parts",
            Self::EmissionsNotBalanced => "validation.emissions.not_balanced",
            Self::GeneratedBelowSum => "validation.emissions.generated_below_sum",
            Self::TransferAmountRequired => "validation.transfers.amount_required",
            Self::TransferPartiesRequired => "validation.transfers.parties_required",
            Self::TransferSameParty => "validation.transfers.same_party",
            Self::ApplicationRequired => "validation.procagent.application_required",
            Self::MakeupRequired => "validation.procagent.makeup_required",
            Self::EmissionsExceedMakeup => "validation.procagent.emissions_exceed_makeup",
            Self::OnHandEndRequired => "validation.essencrit.on_hand_end_required",
            Self::UnparseableNumber { .. } => "validation.number.unparseable",
        }
    }

    pub fn category(&self) -> IssueCategory {
        match self {
            Self::TradeTotalRequired
            | Self::ProductionTotalRequired
            | Self::DestroyedRequired
            | Self::NonPartyTotalRequired
            | Self::FacilityRequired
            | Self::EmittedRequired
            | Self::TransferAmountRequired
            | Self::TransferPartiesRequired
            | Self::ApplicationRequired
            | Self::MakeupRequired
            | Self::OnHandEndRequired => IssueCategory::Completeness,
            Self::ComponentsExceedTotal
            | Self::ProductionBalanceArticle5
            | Self::ProductionBalanceQuarantine
            | Self::ProductionBalance
            | Self::ProductionBalanceDestruction
            | Self::GeneratedBelowParts
            | Self::CapturedBelowParts
            | Self::GeneratedBelowSum
            | Self::TransferSameParty
            | Self::EmissionsExceedMakeup => IssueCategory::Balance,
            Self::EmissionsNotBalanced => IssueCategory::ExactBalance,
            Self::GroupUnreconciled => IssueCategory::Aggregate,
            Self::UnparseableNumber { .. } => IssueCategory::Format,
        }
    }

    /// Localized message, or the English text when the catalog has none.
    pub fn render(&self, kind: SubmissionKind, localizer: &dyn Localizer) -> String {
        let Some(template) = localizer.message(self.key()) else {
            return self.to_string();
        };
        match self {
            Self::UnparseableNumber { field, value } => template
                .replace("{field}", localizer.label_or_name(kind, field))
                .replace("{value}", value),
            _ => template.to_string(),
        }
    }
}

/// Errors currently shown for a row.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub issues: Vec<RowIssue>,
    /// Rendered messages, one per issue, in the same order.
    pub selected: Vec<String>,
}

impl ValidationResult {
    pub fn new(issues: Vec<RowIssue>, kind: SubmissionKind, localizer: &dyn Localizer) -> Self {
        let selected = issues.iter().map(|i| i.render(kind, localizer)).collect();
        Self { issues, selected }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The `validation` cell of a row.
    pub fn as_field(&self) -> FieldState {
        FieldState::new(FieldKind::NonInput).with(Some(FieldValue::List(self.selected.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozone_core::NoLabels;
    use ozone_i18n::{builtin, Language};

    #[test]
    fn english_catalog_matches_builtin_text() {
        let en = builtin(Language::En);
        let issues = [
            RowIssue::TradeTotalRequired,
            RowIssue::ProductionBalanceDestruction,
            RowIssue::EmissionsNotBalanced,
            RowIssue::OnHandEndRequired,
        ];
        for issue in issues {
            assert_eq!(issue.render(SubmissionKind::Imports, en), issue.to_string());
        }
    }

    #[test]
    fn unparseable_uses_field_label() {
        let issue = RowIssue::UnparseableNumber {
            field: "quantity_feedstock".into(),
            value: "12,5".into(),
        };
        assert_eq!(
            issue.render(SubmissionKind::Imports, builtin(Language::En)),
            "Feedstock: \"12,5\" is not a number."
        );
        assert_eq!(
            issue.render(SubmissionKind::Imports, builtin(Language::Fr)),
            "Matières premières : « 12,5 » n'est pas un nombre."
        );
        assert_eq!(
            issue.render(SubmissionKind::Imports, &NoLabels),
            "quantity_feedstock: \"12,5\" is not a number."
        );
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(RowIssue::FacilityRequired.category(), IssueCategory::Completeness);
        assert_eq!(RowIssue::ComponentsExceedTotal.category(), IssueCategory::Balance);
        assert_eq!(RowIssue::EmissionsNotBalanced.category(), IssueCategory::ExactBalance);
        assert_eq!(RowIssue::GroupUnreconciled.category(), IssueCategory::Aggregate);
    }

    #[test]
    fn result_exposes_validation_cell() {
        let r = ValidationResult::new(
            vec![RowIssue::DestroyedRequired],
            SubmissionKind::Destruction,
            &NoLabels,
        );
        assert!(!r.is_valid());
        let cell = r.as_field();
        assert_eq!(cell.kind, FieldKind::NonInput);
        assert_eq!(
            cell.selected,
            Some(FieldValue::List(vec![RowIssue::DestroyedRequired.to_string()]))
        );
    }
}
