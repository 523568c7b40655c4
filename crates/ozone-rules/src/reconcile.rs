//! Cross-row reconciliation for substances split across trading partners.
//!
//! A substance imported from (or exported to) several parties is reported
//! once per party. While some of those rows still lack a party, the totals
//! and the itemized quantities may sit on different rows, so the balance is
//! checked over the whole group instead. The outcome is a [`SkipState`] per
//! row which the row rules consume in the second phase.

use crate::rows::SubmissionRow;
use ozone_core::{ItemKey, SubmissionKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// How a row's own group-sum checks are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipState {
    /// Evaluate the row normally.
    #[default]
    Evaluate = 0,
    /// The row's group reconciles; its own sum checks are waived.
    Suppress = 1,
    /// The row's group does not reconcile; report the group error.
    Force = 2,
}

impl SkipState {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Aggregate shortfall of one substance group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub item: ItemKey,
    /// Σ new + recovered.
    pub left: Decimal,
    /// Σ feedstock + exempted + quarantine.
    pub right: Decimal,
}

/// Phase-one result: one skip state per row, by position, plus the groups
/// that still do not reconcile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    skip: Vec<SkipState>,
    pub discrepancies: BTreeMap<ItemKey, Discrepancy>,
}

impl Reconciliation {
    /// Skip state for the row at `index`; rows outside the pass evaluate
    /// normally.
    pub fn skip_state(&self, index: usize) -> SkipState {
        self.skip.get(index).copied().unwrap_or_default()
    }

    pub fn skip_states(&self) -> &[SkipState] {
        &self.skip
    }

    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Group the rows of a trade tab by substance and decide each row's skip
/// state. Tabs of other kinds get `Evaluate` for every row.
pub fn reconcile_groups(kind: SubmissionKind, rows: &[SubmissionRow]) -> Reconciliation {
    let mut result = Reconciliation {
        skip: vec![SkipState::Evaluate; rows.len()],
        discrepancies: BTreeMap::new(),
    };
    if kind.party_field().is_none() {
        return result;
    }

    let mut groups: BTreeMap<ItemKey, Vec<usize>> = BTreeMap::new();
    for (index, row) in rows.iter().enumerate() {
        if let (SubmissionRow::Trade(_), Some(key)) = (row, row.item_key()) {
            groups.entry(key).or_default().push(index);
        }
    }

    for (key, members) in groups {
        if members.len() <= 1 {
            continue;
        }
        let trade: Vec<(usize, &crate::rows::TradeRow)> = members
            .iter()
            .filter_map(|&i| match &rows[i] {
                SubmissionRow::Trade(t) => Some((i, t)),
                _ => None,
            })
            .collect();
        if trade.iter().all(|(_, t)| t.has_party()) {
            debug!(%kind, item = %key, "every split row has a party; checking rows individually");
            continue;
        }

        let (left, right) = trade.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(l, r), (_, t)| {
                (
                    l.saturating_add(t.reported_total()),
                    r.saturating_add(t.itemized_total()),
                )
            },
        );
        let reconciles = left >= right;
        debug!(
            %kind,
            item = %key,
            rows = trade.len(),
            %left,
            %right,
            reconciles,
            "reconciled split rows"
        );

        let unattributed = if reconciles {
            SkipState::Suppress
        } else {
            SkipState::Force
        };
        for (index, t) in &trade {
            result.skip[*index] = if t.has_party() {
                SkipState::Evaluate
            } else {
                unattributed
            };
        }
        if !reconciles {
            result.discrepancies.insert(
                key.clone(),
                Discrepancy {
                    item: key,
                    left,
                    right,
                },
            );
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{build_row, BuildParams};
    use ozone_core::{FieldValue, PartyId, SubstanceId};
    use proptest::prelude::*;

    fn trade(
        kind: SubmissionKind,
        substance: &str,
        party: Option<&str>,
        values: &[(&str, i64)],
    ) -> SubmissionRow {
        let mut row = build_row(
            kind,
            BuildParams {
                substance: Some(SubstanceId(substance.to_string())),
                country: party.map(|p| PartyId(p.to_string())),
                ..Default::default()
            },
        );
        for (name, v) in values {
            row.field_mut(name).unwrap().selected = Some(FieldValue::Number(Decimal::new(*v, 0)));
        }
        row
    }

    fn cfc(key: &str) -> ItemKey {
        ItemKey::Substance(SubstanceId(key.to_string()))
    }

    #[test]
    fn reconciled_group_suppresses_unattributed_rows() {
        let rows = vec![
            trade(
                SubmissionKind::Imports,
                "CFC-11",
                Some("DE"),
                &[("quantity_total_new", 5), ("quantity_feedstock", 2)],
            ),
            trade(
                SubmissionKind::Imports,
                "CFC-11",
                None,
                &[("quantity_total_new", 2), ("quantity_feedstock", 1)],
            ),
        ];
        let rec = reconcile_groups(SubmissionKind::Imports, &rows);
        assert_eq!(rec.skip_states(), &[SkipState::Evaluate, SkipState::Suppress]);
        assert!(rec.is_clean());
    }

    #[test]
    fn totals_and_components_on_different_rows() {
        let rows = vec![
            trade(SubmissionKind::Imports, "CFC-11", Some("DE"), &[("quantity_total_new", 10)]),
            trade(SubmissionKind::Imports, "CFC-11", None, &[("quantity_feedstock", 8)]),
        ];
        let rec = reconcile_groups(SubmissionKind::Imports, &rows);
        assert_eq!(rec.skip_state(1), SkipState::Suppress);
        assert!(rows[1].issues(rec.skip_state(1)).is_empty());
        assert!(!rows[1].issues(SkipState::Evaluate).is_empty());
    }

    #[test]
    fn shortfall_forces_unattributed_rows() {
        let rows = vec![
            trade(SubmissionKind::Exports, "HCFC-22", Some("FR"), &[("quantity_total_new", 3)]),
            trade(SubmissionKind::Exports, "HCFC-22", None, &[("quantity_feedstock", 5)]),
            trade(SubmissionKind::Exports, "HCFC-22", None, &[("quantity_total_new", 1)]),
        ];
        let rec = reconcile_groups(SubmissionKind::Exports, &rows);
        assert_eq!(
            rec.skip_states(),
            &[SkipState::Evaluate, SkipState::Force, SkipState::Force]
        );
        let d = &rec.discrepancies[&cfc("HCFC-22")];
        assert_eq!((d.left, d.right), (Decimal::new(4, 0), Decimal::new(5, 0)));
    }

    #[test]
    fn single_rows_and_attributed_groups_are_left_alone() {
        let rows = vec![
            trade(SubmissionKind::Imports, "CFC-11", None, &[("quantity_feedstock", 5)]),
            trade(SubmissionKind::Imports, "CFC-12", Some("DE"), &[("quantity_feedstock", 5)]),
            trade(SubmissionKind::Imports, "CFC-12", Some("IT"), &[("quantity_total_new", 1)]),
        ];
        let rec = reconcile_groups(SubmissionKind::Imports, &rows);
        assert!(rec.skip_states().iter().all(|s| *s == SkipState::Evaluate));
        assert!(rec.is_clean());
    }

    #[test]
    fn other_kinds_are_not_reconciled() {
        let rows = vec![
            build_row(SubmissionKind::Destruction, BuildParams::default()),
            build_row(SubmissionKind::Destruction, BuildParams::default()),
        ];
        let rec = reconcile_groups(SubmissionKind::Destruction, &rows);
        assert_eq!(rec.skip_states(), &[SkipState::Evaluate, SkipState::Evaluate]);
        assert_eq!(rec.skip_state(10), SkipState::Evaluate);
    }

    #[test]
    fn skip_codes_are_stable() {
        assert_eq!(SkipState::Evaluate.code(), 0);
        assert_eq!(SkipState::Suppress.code(), 1);
        assert_eq!(SkipState::Force.code(), 2);
    }

    proptest! {
        #[test]
        fn reconciliation_is_idempotent(
            parts in proptest::collection::vec((0i64..50, 0i64..50, proptest::bool::ANY), 1..8)
        ) {
            let rows: Vec<SubmissionRow> = parts
                .iter()
                .map(|(new, feed, attributed)| {
                    trade(
                        SubmissionKind::Imports,
                        "CFC-11",
                        attributed.then_some("DE"),
                        &[("quantity_total_new", *new), ("quantity_feedstock", *feed)],
                    )
                })
                .collect();
            let first = reconcile_groups(SubmissionKind::Imports, &rows);
            let second = reconcile_groups(SubmissionKind::Imports, &rows);
            prop_assert_eq!(&first, &second);
            let left: i64 = parts.iter().map(|p| p.0).sum();
            let right: i64 = parts.iter().map(|p| p.1).sum();
            let split = parts.len() > 1 && parts.iter().any(|p| !p.2);
            prop_assert_eq!(first.is_clean(), !split || left >= right);
        }
    }
}
