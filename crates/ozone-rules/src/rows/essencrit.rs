use super::BuildParams;
use crate::config::ExemptionMode;
use crate::issue::RowIssue;
use ozone_core::{FieldState, FieldValue};
use rust_decimal::Decimal;

/// Yearly accounting of an essential- or critical-use exemption.
///
/// The balance chain is derived:
/// acquired = production + import,
/// authorized not acquired = exempted - acquired,
/// available for use = on hand at start + acquired,
/// on hand at end = available - used - exported (critical only) - destroyed.
/// A derived amount is absent while none of its inputs has been filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct EssencritRow {
    pub ordering_id: Option<u32>,
    pub mode: ExemptionMode,
    pub substance: FieldState,
    pub group: FieldState,
    pub quantity_exempted: FieldState,
    pub quantity_production: FieldState,
    pub quantity_import: FieldState,
    pub quantity_on_hand_start_year: FieldState,
    pub quantity_used: FieldState,
    pub quantity_exported: FieldState,
    pub quantity_destroyed: FieldState,
    pub remarks_party: FieldState,
    pub remarks_os: FieldState,
}

stored_fields!(EssencritRow {
    substance,
    group,
    quantity_exempted,
    quantity_production,
    quantity_import,
    quantity_on_hand_start_year,
    quantity_used,
    quantity_exported,
    quantity_destroyed,
    remarks_party,
    remarks_os,
});

fn filled(field: &FieldState) -> Option<Decimal> {
    field.is_set().then(|| field.decimal())
}

/// Sum of the present terms; absent when every term is absent.
fn combine(terms: &[Option<Decimal>]) -> Option<Decimal> {
    terms
        .iter()
        .flatten()
        .copied()
        .reduce(|acc, v| acc.saturating_add(v))
}

impl EssencritRow {
    pub const DERIVED: &'static [&'static str] = &[
        "quantity_acquired",
        "quantity_authorized_not_acquired",
        "available_for_use",
        "on_hand_end_year",
    ];

    pub fn new(params: &BuildParams) -> Self {
        Self {
            ordering_id: params.ordering_id,
            mode: params.exemption_mode,
            substance: params.substance_field(),
            group: params.group_field(),
            quantity_exempted: FieldState::number(),
            quantity_production: FieldState::number(),
            quantity_import: FieldState::number(),
            quantity_on_hand_start_year: FieldState::number(),
            quantity_used: FieldState::number(),
            quantity_exported: FieldState::number(),
            quantity_destroyed: FieldState::number(),
            remarks_party: FieldState::textarea(),
            remarks_os: FieldState::textarea(),
        }
    }

    pub fn quantity_acquired(&self) -> Option<Decimal> {
        combine(&[
            filled(&self.quantity_production),
            filled(&self.quantity_import),
        ])
    }

    pub fn quantity_authorized_not_acquired(&self) -> Option<Decimal> {
        combine(&[
            filled(&self.quantity_exempted),
            self.quantity_acquired().map(|d| -d),
        ])
    }

    pub fn available_for_use(&self) -> Option<Decimal> {
        combine(&[
            filled(&self.quantity_on_hand_start_year),
            self.quantity_acquired(),
        ])
    }

    pub fn on_hand_end_year(&self) -> Option<Decimal> {
        let exported = match self.mode {
            ExemptionMode::Critical => filled(&self.quantity_exported),
            ExemptionMode::Essential => None,
        };
        combine(&[
            self.available_for_use(),
            filled(&self.quantity_used).map(|d| -d),
            exported.map(|d| -d),
            filled(&self.quantity_destroyed).map(|d| -d),
        ])
    }

    pub(super) fn derived(&self, name: &str) -> Option<FieldState> {
        let value = match name {
            "quantity_acquired" => self.quantity_acquired(),
            "quantity_authorized_not_acquired" => self.quantity_authorized_not_acquired(),
            "available_for_use" => self.available_for_use(),
            "on_hand_end_year" => self.on_hand_end_year(),
            _ => return None,
        };
        Some(FieldState::non_input(value.map(FieldValue::Number), None))
    }

    pub(super) fn issues(&self) -> Vec<RowIssue> {
        if self.on_hand_end_year().is_none() {
            vec![RowIssue::OnHandEndRequired]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RowFields;

    fn row(mode: ExemptionMode, values: &[(&str, i64)]) -> EssencritRow {
        let mut r = EssencritRow::new(&BuildParams {
            exemption_mode: mode,
            ..Default::default()
        });
        for (name, v) in values {
            r.field_mut(name).unwrap().selected = Some(FieldValue::Number(Decimal::new(*v, 0)));
        }
        r
    }

    const FULL: [(&str, i64); 7] = [
        ("quantity_exempted", 100),
        ("quantity_production", 30),
        ("quantity_import", 50),
        ("quantity_on_hand_start_year", 10),
        ("quantity_used", 60),
        ("quantity_exported", 5),
        ("quantity_destroyed", 2),
    ];

    #[test]
    fn chain_in_essential_mode_ignores_exports() {
        let r = row(ExemptionMode::Essential, &FULL);
        assert_eq!(r.quantity_acquired(), Some(Decimal::new(80, 0)));
        assert_eq!(r.quantity_authorized_not_acquired(), Some(Decimal::new(20, 0)));
        assert_eq!(r.available_for_use(), Some(Decimal::new(90, 0)));
        assert_eq!(r.on_hand_end_year(), Some(Decimal::new(28, 0)));
        assert!(r.issues().is_empty());
    }

    #[test]
    fn critical_mode_subtracts_exports() {
        let r = row(ExemptionMode::Critical, &FULL);
        assert_eq!(r.on_hand_end_year(), Some(Decimal::new(23, 0)));
    }

    #[test]
    fn empty_row_has_no_end_balance() {
        let r = row(ExemptionMode::Essential, &[]);
        assert_eq!(r.quantity_acquired(), None);
        assert_eq!(r.on_hand_end_year(), None);
        assert_eq!(r.issues(), vec![RowIssue::OnHandEndRequired]);
        let d = r.derived("on_hand_end_year").unwrap();
        assert_eq!(d.selected, None);
    }

    #[test]
    fn exports_alone_do_not_count_for_essential_uses() {
        let r = row(ExemptionMode::Essential, &[("quantity_exported", 4)]);
        assert_eq!(r.on_hand_end_year(), None);
        let r = row(ExemptionMode::Critical, &[("quantity_exported", 4)]);
        assert_eq!(r.on_hand_end_year(), Some(Decimal::new(-4, 0)));
    }

    #[test]
    fn derived_cells_render_numbers() {
        let r = row(ExemptionMode::Essential, &[("quantity_production", 3)]);
        let d = r.derived("quantity_acquired").unwrap();
        assert_eq!(d.selected, Some(FieldValue::Number(Decimal::new(3, 0))));
        assert!(r.derived("quantity_used").is_none());
    }
}
