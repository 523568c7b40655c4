use super::BuildParams;
use crate::issue::RowIssue;
use ozone_core::{do_sum, FieldState};

/// By-product generation and emissions reported per production facility.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionRow {
    pub ordering_id: Option<u32>,
    pub facility_name: FieldState,
    pub quantity_generated: FieldState,
    pub quantity_captured_all_uses: FieldState,
    pub quantity_captured_feedstock: FieldState,
    pub quantity_captured_for_destruction: FieldState,
    /// Used for feedstock without prior capture.
    pub quantity_feedstock: FieldState,
    /// Destroyed without prior capture.
    pub quantity_destroyed: FieldState,
    pub quantity_emitted: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(EmissionRow {
    facility_name,
    quantity_generated,
    quantity_captured_all_uses,
    quantity_captured_feedstock,
    quantity_captured_for_destruction,
    quantity_feedstock,
    quantity_destroyed,
    quantity_emitted,
    remarks_party,
    remarks_os,
});

impl EmissionRow {
    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            facility_name: FieldState::text(),
            quantity_generated: FieldState::number(),
            quantity_captured_all_uses: FieldState::number(),
            quantity_captured_feedstock: FieldState::number(),
            quantity_captured_for_destruction: FieldState::number(),
            quantity_feedstock: FieldState::number(),
            quantity_destroyed: FieldState::number(),
            quantity_emitted: FieldState::number(),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    /// Every check runs; each failure adds its own issue.
    pub(super) fn issues(&self) -> Vec<RowIssue> {
        let mut issues = Vec::new();
        if !self.facility_name.is_set() {
            issues.push(RowIssue::FacilityRequired);
        }
        if !self.quantity_emitted.is_set() {
            issues.push(RowIssue::EmittedRequired);
        }

        let generated = self.quantity_generated.decimal();
        let all_parts = do_sum([
            self.quantity_captured_all_uses.value(),
            self.quantity_captured_feedstock.value(),
            self.quantity_captured_for_destruction.value(),
            self.quantity_feedstock.value(),
            self.quantity_destroyed.value(),
        ]);
        if generated < all_parts {
            issues.push(RowIssue::GeneratedBelowParts);
        }

        let any_captured = self.quantity_captured_all_uses.is_set()
            || self.quantity_captured_feedstock.is_set()
            || self.quantity_captured_for_destruction.is_set();
        let captured_parts = do_sum([
            self.quantity_captured_feedstock.value(),
            self.quantity_captured_for_destruction.value(),
        ]);
        if any_captured && self.quantity_captured_all_uses.decimal() < captured_parts {
            issues.push(RowIssue::CapturedBelowParts);
        }

        let balance_fields = [
            &self.quantity_captured_all_uses,
            &self.quantity_feedstock,
            &self.quantity_destroyed,
            &self.quantity_emitted,
        ];
        let balance = do_sum(balance_fields.iter().map(|f| f.value()));
        let complete =
            self.quantity_generated.is_set() && balance_fields.iter().all(|f| f.is_set());
        if complete {
            if generated != balance {
                issues.push(RowIssue::EmissionsNotBalanced);
            }
        } else if generated < balance {
            issues.push(RowIssue::GeneratedBelowSum);
        }
        issues
    }
}
