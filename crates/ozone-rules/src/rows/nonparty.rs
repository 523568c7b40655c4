use super::BuildParams;
use crate::issue::RowIssue;
use ozone_core::{do_sum, FieldState};
use rust_decimal::Decimal;

/// Trade of a substance or blend with a state that is not party to the
/// relevant amendment.
#[derive(Clone, Debug, PartialEq)]
pub struct NonPartyRow {
    pub ordering_id: Option<u32>,
    pub substance: FieldState,
    pub blend: FieldState,
    pub group: FieldState,
    pub trade_party: FieldState,
    pub quantity_import_new: FieldState,
    pub quantity_import_recovered: FieldState,
    pub quantity_export_new: FieldState,
    pub quantity_export_recovered: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(NonPartyRow {
    substance,
    blend,
    group,
    trade_party,
    quantity_import_new,
    quantity_import_recovered,
    quantity_export_new,
    quantity_export_recovered,
    remarks_party,
    remarks_os,
});

impl NonPartyRow {
    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            substance: params.substance_field(),
            blend: params.blend_field(),
            group: params.group_field(),
            trade_party: params.country_field(),
            quantity_import_new: FieldState::number(),
            quantity_import_recovered: FieldState::number(),
            quantity_export_new: FieldState::number(),
            quantity_export_recovered: FieldState::number(),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    pub(super) fn issues(&self) -> Vec<RowIssue> {
        let total = do_sum([
            self.quantity_import_new.value(),
            self.quantity_import_recovered.value(),
            self.quantity_export_new.value(),
            self.quantity_export_recovered.value(),
        ]);
        if total <= Decimal::ZERO {
            vec![RowIssue::NonPartyTotalRequired]
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
    fn any_positive_quantity_satisfies_total() {
        let mut r = NonPartyRow::new(&BuildParams::default());
        assert_eq!(r.issues(), vec![RowIssue::NonPartyTotalRequired]);
        r.quantity_export_recovered.selected = Some(FieldValue::Number(Decimal::new(5, 1)));
        assert!(r.issues().is_empty());
    }

    #[test]
    fn negative_quantities_do_not_count() {
        let mut r = NonPartyRow::new(&BuildParams::default());
        r.quantity_import_new.selected = Some(FieldValue::Number(Decimal::new(3, 0)));
        r.quantity_export_new.selected = Some(FieldValue::Number(Decimal::new(-3, 0)));
        assert_eq!(r.issues(), vec![RowIssue::NonPartyTotalRequired]);
    }
}
