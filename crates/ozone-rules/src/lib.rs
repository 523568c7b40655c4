#![deny(warnings)]

//! Row builders and validation rules for Article 7 submissions.
//!
//! Validation runs in two phases per tab:
//! - [`reconcile_groups`] sums the rows of each split substance group and
//!   assigns every row a [`SkipState`];
//! - [`validate_row`] evaluates a row's own rules given that state.
//!
//! [`Form`] and [`Tab`] wrap both phases behind the editing commands a data
//! entry front end issues.

pub mod aggregate;
pub mod config;
pub mod form;
pub mod issue;
pub mod reconcile;
pub mod rows;
pub mod tooltip;
pub mod validate;

pub use aggregate::{decision_generator, quantity_calculator, truthy_sum};
pub use config::{CoercionPolicy, ExemptionMode, ValidationConfig};
pub use form::{Form, FormError, FormReport, RowReport, Tab, TabReport};
pub use issue::{IssueCategory, RowIssue, ValidationResult};
pub use reconcile::{reconcile_groups, Discrepancy, Reconciliation, SkipState};
pub use rows::{build_row, BuildParams, RowFields, SubmissionRow};
pub use tooltip::create_tooltip;
pub use validate::{row_issues, validate_row, RuleContext};
