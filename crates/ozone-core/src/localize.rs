//! Label and message lookup supplied by the embedding application.

use crate::SubmissionKind;

/// Resolves field labels and user-facing messages.
///
/// Rules never hold on to a localizer; it is passed to every call that
/// renders text.
pub trait Localizer {
    /// Column label for `field` within `kind`.
    fn label(&self, kind: SubmissionKind, field: &str) -> Option<&str>;

    /// Message template for `key`. Templates may contain `{field}`.
    fn message(&self, key: &str) -> Option<&str>;

    /// Label with the raw field name as fallback.
    fn label_or_name<'a>(&'a self, kind: SubmissionKind, field: &'a str) -> &'a str {
        self.label(kind, field).unwrap_or(field)
    }
}

/// Localizer with no catalog: labels fall back to field names and messages
/// to the built-in English text of each rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLabels;

impl Localizer for NoLabels {
    fn label(&self, _kind: SubmissionKind, _field: &str) -> Option<&str> {
        None
    }

    fn message(&self, _key: &str) -> Option<&str> {
        None
    }
}
