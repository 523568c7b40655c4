use super::BuildParams;
use crate::aggregate::{
    decision_generator, quantity_calculator, truthy_sum, EXEMPTED_DECISION_FIELDS,
    EXEMPTED_QUANTITY_FIELDS,
};
use crate::issue::RowIssue;
use ozone_core::{FieldState, GroupCode, Localizer, SubmissionKind};
use rust_decimal::Decimal;

/// Which components total production has to cover, by annex group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductionRule {
    /// Annex A, B and C: feedstock + exempted + Article 5 supply.
    FeedstockExemptedArticle5,
    /// Annex E: feedstock + exempted + quarantine and pre-shipment.
    FeedstockExemptedQuarantine,
    /// Annex F group I: feedstock + exempted.
    FeedstockExempted,
    /// Annex F group II: feedstock + captured for destruction + exempted.
    FeedstockDestructionExempted,
}

impl ProductionRule {
    /// Rule for a group code; case-insensitive. Unknown groups have none.
    pub fn for_group(group: &GroupCode) -> Option<Self> {
        let code = group.normalized();
        if code.starts_with(['A', 'B', 'C']) {
            Some(Self::FeedstockExemptedArticle5)
        } else if code.starts_with('E') {
            Some(Self::FeedstockExemptedQuarantine)
        } else if code == "FII" {
            Some(Self::FeedstockDestructionExempted)
        } else if code == "FI" {
            Some(Self::FeedstockExempted)
        } else {
            None
        }
    }
}

/// Production of one substance.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductionRow {
    pub ordering_id: Option<u32>,
    pub substance: FieldState,
    pub group: FieldState,
    pub quantity_total_produced: FieldState,
    pub quantity_feedstock: FieldState,
    pub quantity_essential_uses: FieldState,
    pub decision_essential_uses: FieldState,
    pub quantity_critical_uses: FieldState,
    pub decision_critical_uses: FieldState,
    pub quantity_high_ambient_temperature: FieldState,
    pub decision_high_ambient_temperature: FieldState,
    pub quantity_process_agent_uses: FieldState,
    pub decision_process_agent_uses: FieldState,
    pub quantity_laboratory_analytical_uses: FieldState,
    pub decision_laboratory_analytical_uses: FieldState,
    pub quantity_other_uses: FieldState,
    pub decision_other_uses: FieldState,
    pub quantity_article_5: FieldState,
    pub quantity_quarantine_pre_shipment: FieldState,
    pub quantity_for_destruction: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(ProductionRow {
    substance,
    group,
    quantity_total_produced,
    quantity_feedstock,
    quantity_essential_uses,
    decision_essential_uses,
    quantity_critical_uses,
    decision_critical_uses,
    quantity_high_ambient_temperature,
    decision_high_ambient_temperature,
    quantity_process_agent_uses,
    decision_process_agent_uses,
    quantity_laboratory_analytical_uses,
    decision_laboratory_analytical_uses,
    quantity_other_uses,
    decision_other_uses,
    quantity_article_5,
    quantity_quarantine_pre_shipment,
    quantity_for_destruction,
    remarks_party,
    remarks_os,
});

impl ProductionRow {
    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            substance: params.substance_field(),
            group: params.group_field(),
            quantity_total_produced: FieldState::number(),
            quantity_feedstock: FieldState::number(),
            quantity_essential_uses: FieldState::number(),
            decision_essential_uses: FieldState::text(),
            quantity_critical_uses: FieldState::number(),
            decision_critical_uses: FieldState::text(),
            quantity_high_ambient_temperature: FieldState::number(),
            decision_high_ambient_temperature: FieldState::text(),
            quantity_process_agent_uses: FieldState::number(),
            decision_process_agent_uses: FieldState::text(),
            quantity_laboratory_analytical_uses: FieldState::number(),
            decision_laboratory_analytical_uses: FieldState::text(),
            quantity_other_uses: FieldState::number(),
            decision_other_uses: FieldState::text(),
            quantity_article_5: FieldState::number(),
            quantity_quarantine_pre_shipment: FieldState::number(),
            quantity_for_destruction: FieldState::number(),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    pub fn rule(&self) -> Option<ProductionRule> {
        let code = self.group.value()?.display();
        ProductionRule::for_group(&GroupCode(code))
    }

    pub(super) fn derived(&self, name: &str, localizer: &dyn Localizer) -> Option<FieldState> {
        match name {
            "quantity_exempted" => Some(quantity_calculator(
                EXEMPTED_QUANTITY_FIELDS,
                self,
                SubmissionKind::Production,
                localizer,
            )),
            "decision_exempted" => Some(decision_generator(
                EXEMPTED_DECISION_FIELDS,
                self,
                SubmissionKind::Production,
                localizer,
            )),
            _ => None,
        }
    }

    pub(super) fn issues(&self) -> Vec<RowIssue> {
        let mut issues = Vec::new();
        if !self.quantity_total_produced.is_set() {
            issues.push(RowIssue::ProductionTotalRequired);
        }
        let produced = self.quantity_total_produced.decimal();
        let feedstock = self.quantity_feedstock.decimal();
        let exempted = truthy_sum(EXEMPTED_QUANTITY_FIELDS, self);
        let covered = |extra: Decimal| feedstock.saturating_add(exempted).saturating_add(extra);
        match self.rule() {
            Some(ProductionRule::FeedstockExemptedArticle5)
                if produced < covered(self.quantity_article_5.decimal()) =>
            {
                issues.push(RowIssue::ProductionBalanceArticle5);
            }
            Some(ProductionRule::FeedstockExemptedQuarantine)
                if produced < covered(self.quantity_quarantine_pre_shipment.decimal()) =>
            {
                issues.push(RowIssue::ProductionBalanceQuarantine);
            }
            Some(ProductionRule::FeedstockExempted) if produced < covered(Decimal::ZERO) => {
                issues.push(RowIssue::ProductionBalance);
            }
            Some(ProductionRule::FeedstockDestructionExempted)
                if produced < covered(self.quantity_for_destruction.decimal()) =>
            {
                issues.push(RowIssue::ProductionBalanceDestruction);
            }
            _ => {}
        }
        issues
    }
}
