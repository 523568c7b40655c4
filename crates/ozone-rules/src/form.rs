//! Tabs of rows and the commands that mutate them.

use crate::issue::{IssueCategory, ValidationResult};
use crate::reconcile::{reconcile_groups, Discrepancy, SkipState};
use crate::rows::{build_row, BuildParams, SubmissionRow};
use crate::validate::{validate_row, RuleContext};
use ozone_core::{FieldValue, SubmissionKind};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("row {index} out of range for {kind} ({len} rows)")]
    RowOutOfRange {
        kind: SubmissionKind,
        index: usize,
        len: usize,
    },
    #[error("{kind} rows have no field named {field}")]
    UnknownField { kind: SubmissionKind, field: String },
    #[error("{field} is computed from other fields and cannot be edited")]
    DerivedField { field: String },
    #[error("cannot add a {row} row to the {tab} tab")]
    KindMismatch {
        tab: SubmissionKind,
        row: SubmissionKind,
    },
}

/// The rows of one submission kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    kind: SubmissionKind,
    rows: Vec<SubmissionRow>,
}

impl Tab {
    pub fn new(kind: SubmissionKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    pub fn rows(&self) -> &[SubmissionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a row of this tab's kind and append it. Returns its index.
    pub fn add_row(&mut self, params: BuildParams) -> usize {
        self.rows.push(build_row(self.kind, params));
        debug!(kind = %self.kind, rows = self.rows.len(), "row added");
        self.rows.len() - 1
    }

    /// Append an already built row.
    pub fn push_row(&mut self, row: SubmissionRow) -> Result<usize, FormError> {
        if row.kind() != self.kind {
            return Err(FormError::KindMismatch {
                tab: self.kind,
                row: row.kind(),
            });
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<SubmissionRow, FormError> {
        self.check_index(index)?;
        debug!(kind = %self.kind, index, "row removed");
        Ok(self.rows.remove(index))
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: &str,
        value: Option<FieldValue>,
    ) -> Result<(), FormError> {
        self.check_index(index)?;
        let kind = self.kind;
        let row = &mut self.rows[index];
        if row.derived_names().contains(&field) {
            return Err(FormError::DerivedField {
                field: field.to_string(),
            });
        }
        let state = row.field_mut(field).ok_or_else(|| FormError::UnknownField {
            kind,
            field: field.to_string(),
        })?;
        state.selected = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        debug!(kind = %self.kind, rows = self.rows.len(), "tab reset");
        self.rows.clear();
    }

    fn check_index(&self, index: usize) -> Result<(), FormError> {
        if index >= self.rows.len() {
            return Err(FormError::RowOutOfRange {
                kind: self.kind,
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    /// Reconcile split rows, then validate every row against the outcome.
    pub fn validate(&self, ctx: &RuleContext<'_>) -> TabReport {
        let reconciliation = reconcile_groups(self.kind, &self.rows);
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let result = validate_row(row, reconciliation.skip_state(i), ctx);
                RowReport {
                    index: i,
                    ordering_id: row.ordering_id(),
                    skip: reconciliation.skip_state(i),
                    categories: result.issues.iter().map(|issue| issue.category()).collect(),
                    result,
                }
            })
            .collect();
        TabReport {
            kind: self.kind,
            rows,
            discrepancies: reconciliation.discrepancies.into_values().collect(),
        }
    }
}

/// Validation outcome for one row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowReport {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering_id: Option<u32>,
    pub skip: SkipState,
    #[serde(flatten)]
    pub result: ValidationResult,
    /// Category of each issue, in the same order.
    pub categories: Vec<IssueCategory>,
}

/// Validation outcome for one tab.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TabReport {
    pub kind: SubmissionKind,
    pub rows: Vec<RowReport>,
    /// Substance groups whose split rows do not reconcile.
    pub discrepancies: Vec<Discrepancy>,
}

impl TabReport {
    pub fn error_count(&self) -> usize {
        self.rows.iter().map(|r| r.result.issues.len()).sum::<usize>() + self.discrepancies.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// A submission's tabs. Each tab owns its rows exclusively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Form {
    tabs: BTreeMap<SubmissionKind, Tab>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self, kind: SubmissionKind) -> Option<&Tab> {
        self.tabs.get(&kind)
    }

    /// The tab for `kind`, created empty on first use.
    pub fn tab_mut(&mut self, kind: SubmissionKind) -> &mut Tab {
        self.tabs.entry(kind).or_insert_with(|| Tab::new(kind))
    }

    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }

    pub fn reset_tab(&mut self, kind: SubmissionKind) {
        if let Some(tab) = self.tabs.get_mut(&kind) {
            tab.reset();
        }
    }

    pub fn validate(&self, ctx: &RuleContext<'_>) -> FormReport {
        let tabs: Vec<TabReport> = self.tabs.values().map(|t| t.validate(ctx)).collect();
        let report = FormReport { tabs };
        info!(
            tabs = report.tabs.len(),
            errors = report.error_count(),
            "form validated"
        );
        report
    }
}

/// Validation outcome for a whole form.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormReport {
    pub tabs: Vec<TabReport>,
}

impl FormReport {
    pub fn error_count(&self) -> usize {
        self.tabs.iter().map(TabReport::error_count).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
