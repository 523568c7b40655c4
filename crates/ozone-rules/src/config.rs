//! Validation settings.

use serde::{Deserialize, Serialize};

/// How numeric fields holding non-numeric text are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Read as zero and say nothing.
    #[default]
    Zero,
    /// Read as zero and report an `UnparseableNumber` issue.
    Flag,
}

/// Whether an essencrit table tracks essential or critical uses. Exports
/// only count against the year-end balance for critical uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionMode {
    #[default]
    Essential,
    Critical,
}

/// Settings shared by every validation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub coercion: CoercionPolicy,
    /// Catalog locale code, e.g. "en".
    pub locale: String,
    pub essencrit_mode: ExemptionMode,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            coercion: CoercionPolicy::Zero,
            locale: "en".to_string(),
            essencrit_mode: ExemptionMode::Essential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: ValidationConfig = serde_json::from_str(r#"{"coercion":"flag"}"#).unwrap();
        assert_eq!(cfg.coercion, CoercionPolicy::Flag);
        assert_eq!(cfg.locale, "en");
        assert_eq!(cfg.essencrit_mode, ExemptionMode::Essential);
    }
}
