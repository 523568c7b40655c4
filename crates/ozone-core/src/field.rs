//! Field model shared by every submission row.

use crate::numeric::{parse_decimal, value_converter};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input widget a field is rendered with. `NonInput` fields are derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Multiselect,
    Textarea,
    Checkbox,
    Radio,
    NonInput,
}

/// A value held by a field. Absence is modeled as `Option::None` on
/// [`FieldState::selected`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Decimal),
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl FieldValue {
    /// Coerce a prefill value: anything that parses as a number becomes a
    /// number, everything else is kept as given. JSON `null` is absence.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(
                parse_decimal(&n.to_string())
                    .map(Self::Number)
                    .unwrap_or_else(|| Self::Text(n.to_string())),
            ),
            Value::String(s) => Some(
                parse_decimal(s)
                    .map(Self::Number)
                    .unwrap_or_else(|| Self::Text(s.clone())),
            ),
            Value::Array(items) => Some(Self::List(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Display form used in tooltips and reports.
    pub fn display(&self) -> String {
        match self {
            Self::Number(d) => crate::numeric::format_decimal(*d),
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(", "),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        Self::Number(d)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// State of a single field on a row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub selected: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Quantity already granted by an exemption decision, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exemption_value: Option<Decimal>,
    #[serde(default)]
    pub disabled: bool,
}

impl FieldState {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            selected: None,
            tooltip: None,
            exemption_value: None,
            disabled: false,
        }
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    pub fn textarea() -> Self {
        Self::new(FieldKind::Textarea)
    }

    /// A select pre-populated with `value`.
    pub fn select(value: Option<FieldValue>) -> Self {
        Self::new(FieldKind::Select).with(value)
    }

    pub fn non_input(value: Option<FieldValue>, tooltip: Option<String>) -> Self {
        Self {
            tooltip,
            ..Self::new(FieldKind::NonInput).with(value)
        }
    }

    pub fn with(mut self, value: Option<FieldValue>) -> Self {
        self.selected = value;
        self
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.selected.as_ref()
    }

    /// Numeric reading of the field; unset or unparseable is zero.
    pub fn decimal(&self) -> Decimal {
        value_converter(self.value())
    }

    /// Whether the user supplied anything: blank text and empty lists do not
    /// count, a literal zero does.
    pub fn is_set(&self) -> bool {
        match &self.selected {
            None => false,
            Some(FieldValue::Text(s)) => !s.trim().is_empty(),
            Some(FieldValue::List(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    /// Text held by a numeric field that cannot be read as a number.
    pub fn unparseable_text(&self) -> Option<&str> {
        if self.kind != FieldKind::Number {
            return None;
        }
        match &self.selected {
            Some(FieldValue::Text(s)) if !s.trim().is_empty() && parse_decimal(s).is_none() => {
                Some(s)
            }
            _ => None,
        }
    }
}
