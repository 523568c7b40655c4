use super::BuildParams;
use crate::issue::RowIssue;
use ozone_core::{FieldKind, FieldState};

/// Use of a controlled substance as a process agent in one application.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessAgentRow {
    pub ordering_id: Option<u32>,
    pub decision: FieldState,
    pub application: FieldState,
    pub substance: FieldState,
    pub group: FieldState,
    pub contain_technologies: FieldState,
    pub makeup_quantity: FieldState,
    pub emissions: FieldState,
    pub units: FieldState,
    pub remarks: FieldState,
}

stored_fields!(ProcessAgentRow {
    decision,
    application,
    substance,
    group,
    contain_technologies,
    makeup_quantity,
    emissions,
    units,
    remarks,
});

impl ProcessAgentRow {
    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            decision: FieldState::text(),
            application: FieldState::select(None),
            substance: params.substance_field(),
            group: params.group_field(),
            contain_technologies: FieldState::new(FieldKind::Multiselect),
            makeup_quantity: FieldState::number(),
            emissions: FieldState::number(),
            units: FieldState::select(None),
            remarks: FieldState::textarea(),
        }
    }

    pub(super) fn issues(&self) -> Vec<RowIssue> {
        let mut issues = Vec::new();
        if !self.application.is_set() {
            issues.push(RowIssue::ApplicationRequired);
        }
        if !self.makeup_quantity.is_set() {
            issues.push(RowIssue::MakeupRequired);
        } else if self.emissions.decimal() > self.makeup_quantity.decimal() {
            issues.push(RowIssue::EmissionsExceedMakeup);
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozone_core::FieldValue;
    use rust_decimal::Decimal;

    #[test]
    fn application_and_makeup_are_required() {
        let r = ProcessAgentRow::new(&BuildParams::default());
        assert_eq!(
            r.issues(),
            vec![RowIssue::ApplicationRequired, RowIssue::MakeupRequired]
        );
    }

    #[test]
    fn emissions_bounded_by_makeup() {
        let mut r = ProcessAgentRow::new(&BuildParams::default());
        r.application.selected = Some("Chlorine production".into());
        r.makeup_quantity.selected = Some(FieldValue::Number(Decimal::new(12, 1)));
        r.emissions.selected = Some(FieldValue::Number(Decimal::new(13, 1)));
        assert_eq!(r.issues(), vec![RowIssue::EmissionsExceedMakeup]);
        r.emissions.selected = Some(FieldValue::Number(Decimal::new(12, 1)));
        assert!(r.issues().is_empty());
    }
}
