use super::BuildParams;
use crate::issue::RowIssue;
use ozone_core::{FieldKind, FieldState, FieldValue};
use rust_decimal::Decimal;

/// Transfer of production or consumption rights between two parties.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferRow {
    pub ordering_id: Option<u32>,
    pub substance: FieldState,
    pub group: FieldState,
    pub transferred_amount: FieldState,
    pub source_party: FieldState,
    pub destination_party: FieldState,
    pub is_basic_domestic_need: FieldState,
    pub reporting_period: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(TransferRow {
    substance,
    group,
    transferred_amount,
    source_party,
    destination_party,
    is_basic_domestic_need,
    reporting_period,
    remarks_party,
    remarks_os,
});

impl TransferRow {
    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            substance: params.substance_field(),
            group: params.group_field(),
            transferred_amount: FieldState::number(),
            source_party: FieldState::select(None),
            destination_party: params.country_field(),
            is_basic_domestic_need: FieldState::new(FieldKind::Checkbox)
                .with(Some(FieldValue::Bool(false))),
            reporting_period: FieldState::select(None),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    pub(super) fn issues(&self) -> Vec<RowIssue> {
        let mut issues = Vec::new();
        if self.transferred_amount.decimal() <= Decimal::ZERO {
            issues.push(RowIssue::TransferAmountRequired);
        }
        if !(self.source_party.is_set() && self.destination_party.is_set()) {
            issues.push(RowIssue::TransferPartiesRequired);
        } else if self.source_party.value() == self.destination_party.value() {
            issues.push(RowIssue::TransferSameParty);
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozone_core::PartyId;

    fn row(source: Option<&str>, amount: i64) -> TransferRow {
        let mut r = TransferRow::new(&BuildParams {
            country: Some(PartyId("RO".into())),
            ..Default::default()
        });
        r.source_party.selected = source.map(FieldValue::from);
        r.transferred_amount.selected = Some(FieldValue::Number(Decimal::new(amount, 0)));
        r
    }

    #[test]
    fn complete_transfer_is_valid() {
        assert!(row(Some("BG"), 100).issues().is_empty());
    }

    #[test]
    fn needs_amount_and_both_parties() {
        assert_eq!(
            row(None, 0).issues(),
            vec![RowIssue::TransferAmountRequired, RowIssue::TransferPartiesRequired]
        );
    }

    #[test]
    fn parties_must_differ() {
        assert_eq!(row(Some("RO"), 5).issues(), vec![RowIssue::TransferSameParty]);
    }
}
