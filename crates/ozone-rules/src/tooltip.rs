//! Hover text for derived cells.

use ozone_core::{Localizer, SubmissionKind};

pub(crate) const CLICK_TO_EDIT_KEY: &str = "tooltip.click_to_edit";
const CLICK_TO_EDIT: &str = "Click to edit";

/// One `"<label>: <value>"` line per entry, then the "Click to edit" hint.
/// Fields without a label are shown under their raw name.
pub fn create_tooltip(
    values: &[(&str, String)],
    kind: SubmissionKind,
    localizer: &dyn Localizer,
) -> String {
    let mut lines: Vec<String> = values
        .iter()
        .map(|(field, value)| format!("{}: {}", localizer.label_or_name(kind, field), value))
        .collect();
    lines.push(
        localizer
            .message(CLICK_TO_EDIT_KEY)
            .unwrap_or(CLICK_TO_EDIT)
            .to_string(),
    );
    lines.join("\n")
}
