use super::{BuildParams, RowFields};
use crate::aggregate::{
    decision_generator, quantity_calculator, truthy_sum, EXEMPTED_DECISION_FIELDS,
    EXEMPTED_QUANTITY_FIELDS,
};
use crate::issue::RowIssue;
use crate::reconcile::SkipState;
use ozone_core::{do_sum, FieldState, Localizer, SubmissionKind};
use rust_decimal::Decimal;

/// Whether a trade row reports imports or exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeDirection {
    Imports,
    Exports,
}

impl TradeDirection {
    pub fn kind(self) -> SubmissionKind {
        match self {
            Self::Imports => SubmissionKind::Imports,
            Self::Exports => SubmissionKind::Exports,
        }
    }

    /// `source_party` for imports, `destination_party` for exports.
    pub fn party_field(self) -> &'static str {
        match self {
            Self::Imports => "source_party",
            Self::Exports => "destination_party",
        }
    }
}

/// Imports or exports of one substance or blend with one trading partner.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeRow {
    pub direction: TradeDirection,
    pub ordering_id: Option<u32>,
    /// Exporting party for imports, destination party for exports.
    pub party: FieldState,
    pub substance: FieldState,
    pub blend: FieldState,
    pub group: FieldState,
    pub quantity_total_new: FieldState,
    pub quantity_total_recovered: FieldState,
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
    pub quantity_quarantine_pre_shipment: FieldState,
    pub quantity_polyols: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(@inherent TradeRow {
    substance,
    blend,
    group,
    quantity_total_new,
    quantity_total_recovered,
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
    quantity_quarantine_pre_shipment,
    quantity_polyols,
    remarks_party,
    remarks_os,
});

impl RowFields for TradeRow {
    fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![self.direction.party_field()];
        names.extend_from_slice(Self::FIELDS);
        names
    }

    fn field(&self, name: &str) -> Option<&FieldState> {
        if name == self.direction.party_field() {
            return Some(&self.party);
        }
        self.stored(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        if name == self.direction.party_field() {
            return Some(&mut self.party);
        }
        self.stored_mut(name)
    }
}

impl TradeRow {
    pub fn new(direction: TradeDirection, params: &BuildParams) -> Self {
        Self {
            direction,
            ordering_id: params.ordering_id,
            party: params.country_field(),
            substance: params.substance_field(),
            blend: params.blend_field(),
            group: params.group_field(),
            quantity_total_new: FieldState::number(),
            quantity_total_recovered: FieldState::number(),
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
            quantity_quarantine_pre_shipment: FieldState::number(),
            quantity_polyols: FieldState::number(),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    pub fn has_party(&self) -> bool {
        self.party.is_set()
    }

    /// new + recovered.
    pub fn reported_total(&self) -> Decimal {
        do_sum([
            self.quantity_total_new.value(),
            self.quantity_total_recovered.value(),
        ])
    }

    /// feedstock + exempted + quarantine.
    pub fn itemized_total(&self) -> Decimal {
        self.quantity_feedstock
            .decimal()
            .saturating_add(truthy_sum(EXEMPTED_QUANTITY_FIELDS, self))
            .saturating_add(self.quantity_quarantine_pre_shipment.decimal())
    }

    pub(super) fn derived(&self, name: &str, localizer: &dyn Localizer) -> Option<FieldState> {
        let kind = self.direction.kind();
        match name {
            "quantity_exempted" => Some(quantity_calculator(
                EXEMPTED_QUANTITY_FIELDS,
                self,
                kind,
                localizer,
            )),
            "decision_exempted" => Some(decision_generator(
                EXEMPTED_DECISION_FIELDS,
                self,
                kind,
                localizer,
            )),
            _ => None,
        }
    }

    pub(super) fn issues(&self, skip: SkipState) -> Vec<RowIssue> {
        let mut issues = Vec::new();
        if skip != SkipState::Suppress {
            let total = do_sum([
                self.quantity_total_new.value(),
                self.quantity_total_recovered.value(),
                self.quantity_polyols.value(),
            ]);
            if total <= Decimal::ZERO {
                issues.push(RowIssue::TradeTotalRequired);
            }
            if self.itemized_total() > self.reported_total() {
                issues.push(RowIssue::ComponentsExceedTotal);
            }
        }
        if skip == SkipState::Force {
            issues.push(RowIssue::GroupUnreconciled);
        }
        issues
    }
}
