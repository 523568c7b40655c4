use super::BuildParams;
use crate::issue::RowIssue;
use ozone_core::FieldState;

/// Quantity of a substance or blend destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct DestructionRow {
    pub ordering_id: Option<u32>,
    pub substance: FieldState,
    pub blend: FieldState,
    pub group: FieldState,
    pub quantity_destroyed: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(DestructionRow {
    substance,
    blend,
    group,
    quantity_destroyed,
    remarks_party,
    remarks_os,
});

impl DestructionRow {
    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            substance: params.substance_field(),
            blend: params.blend_field(),
            group: params.group_field(),
            quantity_destroyed: FieldState::number(),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    pub(super) fn issues(&self) -> Vec<RowIssue> {
        if self.quantity_destroyed.decimal().is_zero() {
            vec![RowIssue::DestroyedRequired]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozone_core::FieldValue;

    #[test]
    fn zero_or_missing_quantity_is_flagged() {
        let mut r = DestructionRow::new(&BuildParams::default());
        assert_eq!(r.issues(), vec![RowIssue::DestroyedRequired]);
        r.quantity_destroyed.selected = Some(FieldValue::Text("0.000".into()));
        assert_eq!(r.issues(), vec![RowIssue::DestroyedRequired]);
        r.quantity_destroyed.selected = Some(FieldValue::Text("2e-3".into()));
        assert!(r.issues().is_empty());
    }
}
