//! Submission documents: a JSON object mapping tab keys to row objects.
//!
//! ```json
//! { "has_imports": [ { "substance": "CFC-11", "country": "DE", "quantity_total_new": 5 } ] }
//! ```
//!
//! `substance`, `blend`, `group`, `country` and `ordering_id` go to the row
//! builder; every other key is prefill data for the field of that name. Ids
//! may be strings or numbers, since the backend keys substances by number.

use anyhow::{Context, Result};
use ozone_core::{BlendId, GroupCode, PartyId, SubmissionKind, SubstanceId};
use ozone_rules::{BuildParams, ExemptionMode, Form};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use tracing::warn;

fn scalar_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_json::Value>::deserialize(d)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RowInput {
    #[serde(default, deserialize_with = "scalar_id")]
    pub substance: Option<String>,
    #[serde(default, deserialize_with = "scalar_id")]
    pub blend: Option<String>,
    #[serde(default, deserialize_with = "scalar_id")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "scalar_id")]
    pub country: Option<String>,
    pub ordering_id: Option<u32>,
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl RowInput {
    fn into_params(self, position: usize, mode: ExemptionMode) -> BuildParams {
        BuildParams {
            substance: self.substance.map(SubstanceId),
            group: self.group.map(GroupCode),
            country: self.country.map(PartyId),
            blend: self.blend.map(BlendId),
            prefill_data: (!self.values.is_empty()).then_some(self.values),
            ordering_id: self.ordering_id.or(u32::try_from(position + 1).ok()),
            exemption_mode: mode,
        }
    }
}

#[derive(Debug, Default)]
pub struct Submission {
    pub tabs: BTreeMap<SubmissionKind, Vec<RowInput>>,
}

impl Submission {
    pub fn parse(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<RowInput>> =
            serde_json::from_str(text).context("parsing submission JSON")?;
        let mut tabs = BTreeMap::new();
        for (key, rows) in raw {
            let kind: SubmissionKind = key.parse()?;
            tabs.insert(kind, rows);
        }
        Ok(Self { tabs })
    }

    /// Build a form from every tab, or from `only` when given.
    pub fn into_form(self, mode: ExemptionMode, only: Option<SubmissionKind>) -> Form {
        let mut form = Form::new();
        for (kind, rows) in self.tabs {
            if only.is_some_and(|o| o != kind) {
                continue;
            }
            let tab = form.tab_mut(kind);
            for (position, row) in rows.into_iter().enumerate() {
                tab.add_row(row.into_params(position, mode));
            }
        }
        if form.tabs().all(|t| t.is_empty()) {
            warn!("submission has no rows to validate");
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "has_imports": [
            { "substance": "CFC-11", "country": "DE", "quantity_total_new": 5 },
            { "substance": "CFC-11", "quantity_feedstock": "2", "ordering_id": 9 }
        ],
        "has_destroyed": [ { "substance": "CFC-12", "quantity_destroyed": 0 } ]
    }"#;

    #[test]
    fn parses_tabs_and_builder_keys() {
        let sub = Submission::parse(DOC).unwrap();
        assert_eq!(sub.tabs.len(), 2);
        let imports = &sub.tabs[&SubmissionKind::Imports];
        assert_eq!(imports[0].country.as_deref(), Some("DE"));
        assert!(imports[0].values.contains_key("quantity_total_new"));
        assert!(!imports[0].values.contains_key("substance"));
        assert_eq!(imports[1].ordering_id, Some(9));
    }

    #[test]
    fn numeric_ids_are_read_as_text() {
        let sub = Submission::parse(
            r#"{ "has_imports": [ { "substance": 12, "country": 276, "blend": null } ] }"#,
        )
        .unwrap();
        let row = &sub.tabs[&SubmissionKind::Imports][0];
        assert_eq!(row.substance.as_deref(), Some("12"));
        assert_eq!(row.country.as_deref(), Some("276"));
        assert_eq!(row.blend, None);
        assert!(Submission::parse(r#"{ "has_imports": [ { "substance": [1] } ] }"#).is_err());
    }

    #[test]
    fn unknown_tab_is_an_error() {
        let err = Submission::parse(r#"{ "has_everything": [] }"#).unwrap_err();
        assert!(err.to_string().contains("has_everything"));
    }

    #[test]
    fn builds_form_rows_with_positions() {
        let form = Submission::parse(DOC)
            .unwrap()
            .into_form(ExemptionMode::Essential, None);
        let imports = form.tab(SubmissionKind::Imports).unwrap();
        assert_eq!(imports.len(), 2);
        assert_eq!(imports.rows()[0].ordering_id(), Some(1));
        assert_eq!(imports.rows()[1].ordering_id(), Some(9));
        assert!(imports.rows()[0].field("source_party").unwrap().is_set());
    }

    #[test]
    fn only_keeps_one_tab() {
        let form = Submission::parse(DOC)
            .unwrap()
            .into_form(ExemptionMode::Essential, Some(SubmissionKind::Destruction));
        assert!(form.tab(SubmissionKind::Imports).is_none());
        assert_eq!(form.tabs().count(), 1);
    }
}
