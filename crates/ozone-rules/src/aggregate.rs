//! Derived cells built from groups of sibling fields.
//!
//! Both calculators read the row every time they are called; nothing is
//! cached, so an edit to any sibling is visible on the next read.

use crate::rows::RowFields;
use crate::tooltip::create_tooltip;
use ozone_core::{format_decimal, is_truthy, FieldState, FieldValue, Localizer, SubmissionKind};
use rust_decimal::Decimal;

/// Exempted-use quantities summed into `quantity_exempted`.
pub const EXEMPTED_QUANTITY_FIELDS: &[&str] = &[
    "quantity_essential_uses",
    "quantity_critical_uses",
    "quantity_high_ambient_temperature",
    "quantity_process_agent_uses",
    "quantity_laboratory_analytical_uses",
    "quantity_quarantine_pre_shipment",
    "quantity_other_uses",
];

/// Decision references joined into `decision_exempted`, in display order.
pub const EXEMPTED_DECISION_FIELDS: &[&str] = &[
    "decision_essential_uses",
    "decision_critical_uses",
    "decision_high_ambient_temperature",
    "decision_process_agent_uses",
    "decision_laboratory_analytical_uses",
    "decision_other_uses",
];

fn included<'a>(fields: &[&'a str], row: &'a dyn RowFields) -> Vec<(&'a str, &'a FieldState)> {
    fields
        .iter()
        .filter_map(|name| row.field(name).map(|f| (*name, f)))
        .filter(|(_, f)| is_truthy(f.value()))
        .collect()
}

/// Sum of the truthy fields among `fields`.
pub fn truthy_sum(fields: &[&str], row: &dyn RowFields) -> Decimal {
    included(fields, row)
        .iter()
        .fold(Decimal::ZERO, |acc, (_, f)| acc.saturating_add(f.decimal()))
}

/// Sum of the named quantities. A zero total renders as an empty cell.
pub fn quantity_calculator(
    fields: &[&str],
    row: &dyn RowFields,
    kind: SubmissionKind,
    localizer: &dyn Localizer,
) -> FieldState {
    let parts = included(fields, row);
    let total = parts
        .iter()
        .fold(Decimal::ZERO, |acc, (_, f)| acc.saturating_add(f.decimal()));
    let selected = if total.is_zero() {
        String::new()
    } else {
        format_decimal(total)
    };
    let breakdown: Vec<(&str, String)> = parts
        .iter()
        .filter_map(|(name, f)| f.value().map(|v| (*name, v.display())))
        .collect();
    FieldState::non_input(
        Some(FieldValue::Text(selected)),
        Some(create_tooltip(&breakdown, kind, localizer)),
    )
}

/// The named decision references joined with ", " in declared order.
pub fn decision_generator(
    fields: &[&str],
    row: &dyn RowFields,
    kind: SubmissionKind,
    localizer: &dyn Localizer,
) -> FieldState {
    let breakdown: Vec<(&str, String)> = included(fields, row)
        .iter()
        .filter_map(|(name, f)| f.value().map(|v| (*name, v.display())))
        .collect();
    let joined = breakdown
        .iter()
        .map(|(_, v)| v.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    FieldState::non_input(
        Some(FieldValue::Text(joined)),
        Some(create_tooltip(&breakdown, kind, localizer)),
    )
}
