#![deny(warnings)]

//! Label and message catalogs for the Article 7 forms.
//!
//! Catalogs are YAML documents with per-section label tables, a `common`
//! table shared by all sections, and message templates keyed by rule. The
//! English and French catalogs are compiled in; further locales can be loaded
//! from disk and chained onto English for anything they do not translate.

use ozone_core::{Localizer, SubmissionKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

const COMMON_SECTION: &str = "common";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

/// Built-in catalog languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::Fr]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|l| l.code() == code)
    }
}

/// A parsed catalog, optionally backed by another for missing entries.
#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    pub locale: String,
    #[serde(default)]
    labels: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    messages: BTreeMap<String, String>,
    #[serde(skip)]
    fallback: Option<&'static Catalog>,
}

impl Catalog {
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a catalog from disk, falling back to English.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_yaml(&text)?.with_fallback(builtin(Language::En));
        info!(
            locale = %catalog.locale,
            path = %path.as_ref().display(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn with_fallback(mut self, fallback: &'static Catalog) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Built-in catalog for a locale code such as "en" or "fr".
    pub fn for_locale(code: &str) -> Result<&'static Catalog, CatalogError> {
        Language::from_code(code)
            .map(builtin)
            .ok_or_else(|| CatalogError::UnknownLocale(code.to_string()))
    }

    fn own_label(&self, kind: SubmissionKind, field: &str) -> Option<&str> {
        self.labels
            .get(kind.as_str())
            .and_then(|m| m.get(field))
            .or_else(|| self.labels.get(COMMON_SECTION).and_then(|m| m.get(field)))
            .map(String::as_str)
    }
}

impl Localizer for Catalog {
    fn label(&self, kind: SubmissionKind, field: &str) -> Option<&str> {
        let found = self
            .own_label(kind, field)
            .or_else(|| self.fallback.and_then(|f| f.label(kind, field)));
        if found.is_none() {
            debug!(locale = %self.locale, %kind, field, "missing label");
        }
        found
    }

    fn message(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .map(String::as_str)
            .or_else(|| self.fallback.and_then(|f| f.message(key)))
    }
}

/// Compiled-in catalog for `language`.
pub fn builtin(language: Language) -> &'static Catalog {
    match language {
        Language::En => EN_CATALOG.get_or_init(|| parse_builtin(Language::En)),
        Language::Fr => FR_CATALOG.get_or_init(|| {
            parse_builtin(Language::Fr).with_fallback(builtin(Language::En))
        }),
    }
}

fn parse_builtin(language: Language) -> Catalog {
    let source = match language {
        Language::En => include_str!("../assets/en.yaml"),
        Language::Fr => include_str!("../assets/fr.yaml"),
    };
    Catalog::from_yaml(source).unwrap_or_else(|err| {
        panic!(
            "failed to parse built-in catalog for language '{}': {err}",
            language.code()
        )
    })
}

static EN_CATALOG: OnceLock<Catalog> = OnceLock::new();
static FR_CATALOG: OnceLock<Catalog> = OnceLock::new();

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalogs_parse() {
        for lang in Language::all() {
            assert_eq!(builtin(*lang).locale, lang.code());
        }
    }

    #[test]
    fn section_label_wins_over_common() {
        let en = builtin(Language::En);
        assert_eq!(
            en.label(SubmissionKind::Emissions, "quantity_destroyed"),
            Some("Amount destroyed without prior capture")
        );
        assert_eq!(
            en.label(SubmissionKind::Destruction, "quantity_destroyed"),
            Some("Quantity destroyed")
        );
        assert_eq!(en.label(SubmissionKind::Imports, "substance"), Some("Substance"));
    }

    #[test]
    fn french_falls_back_to_english() {
        let fr = builtin(Language::Fr);
        assert_eq!(fr.message("tooltip.click_to_edit"), Some("Cliquez pour modifier"));
        assert_eq!(
            fr.label(SubmissionKind::Production, "quantity_article_5"),
            Some("Production for supply to Article 5 countries")
        );
    }

    #[test]
    fn missing_label_uses_field_name() {
        let en = builtin(Language::En);
        assert_eq!(en.label(SubmissionKind::Imports, "no_such_field"), None);
        assert_eq!(
            en.label_or_name(SubmissionKind::Imports, "no_such_field"),
            "no_such_field"
        );
    }

    #[test]
    fn unknown_locale_is_an_error() {
        assert!(matches!(
            Catalog::for_locale("xx"),
            Err(CatalogError::UnknownLocale(code)) if code == "xx"
        ));
        assert_eq!(Catalog::for_locale("fr").unwrap().locale, "fr");
    }

    #[test]
    fn loads_catalog_from_disk() {
        let path = std::env::temp_dir()
            .join(format!("ozone-i18n-{}.yaml", std::process::id()));
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "locale: es\nmessages:\n  tooltip.click_to_edit: Haga clic para editar"
        )
        .unwrap();
        drop(f);
        let es = Catalog::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(es.message("tooltip.click_to_edit"), Some("Haga clic para editar"));
        assert_eq!(
            es.label(SubmissionKind::Imports, "quantity_polyols"),
            Some("Polyols")
        );
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        assert!(matches!(
            Catalog::from_yaml("locale: [unterminated"),
            Err(CatalogError::Yaml(_))
        ));
    }
}
