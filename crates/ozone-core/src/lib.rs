#![deny(warnings)]

//! Core domain models for Article 7 data entry.
//!
//! This crate defines the serializable identifiers, the field model every
//! submission row is made of, and the numeric coercion helpers the row rules
//! are written against. It knows nothing about individual submission kinds'
//! field sets; those live in `ozone-rules`.

pub mod field;
pub mod localize;
pub mod numeric;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use field::{FieldKind, FieldState, FieldValue};
pub use localize::{Localizer, NoLabels};
pub use numeric::{do_sum, format_decimal, is_truthy, parse_decimal, value_converter};

/// Substance identifier as used by the reporting backend, e.g. "CFC-11".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubstanceId(pub String);

/// Blend identifier, e.g. "R-502".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlendId(pub String);

/// Party (country) identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyId(pub String);

/// Annex/group code of a controlled substance, e.g. "AI", "EI", "FII".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupCode(pub String);

impl GroupCode {
    /// Upper-cased, trimmed code; group comparisons are case-insensitive.
    pub fn normalized(&self) -> String {
        self.0.trim().to_ascii_uppercase()
    }
}

/// Identity of the reported item a row is about. Rows reporting the same item
/// for different trade partners are reconciled together.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ItemKey {
    Substance(SubstanceId),
    Blend(BlendId),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Substance(id) => write!(f, "substance {}", id.0),
            ItemKey::Blend(id) => write!(f, "blend {}", id.0),
        }
    }
}

/// Regulatory form section a tab belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubmissionKind {
    #[serde(rename = "has_imports")]
    Imports,
    #[serde(rename = "has_exports")]
    Exports,
    #[serde(rename = "has_produced")]
    Production,
    #[serde(rename = "has_destroyed")]
    Destruction,
    #[serde(rename = "has_nonparty")]
    NonParty,
    #[serde(rename = "has_emissions")]
    Emissions,
    #[serde(rename = "transfers")]
    Transfers,
    #[serde(rename = "procagent")]
    ProcessAgent,
    #[serde(rename = "essencrit")]
    Essencrit,
}

impl SubmissionKind {
    pub fn all() -> &'static [Self] {
        &[
            Self::Imports,
            Self::Exports,
            Self::Production,
            Self::Destruction,
            Self::NonParty,
            Self::Emissions,
            Self::Transfers,
            Self::ProcessAgent,
            Self::Essencrit,
        ]
    }

    /// Section key used by the backend and the label catalogs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Imports => "has_imports",
            Self::Exports => "has_exports",
            Self::Production => "has_produced",
            Self::Destruction => "has_destroyed",
            Self::NonParty => "has_nonparty",
            Self::Emissions => "has_emissions",
            Self::Transfers => "transfers",
            Self::ProcessAgent => "procagent",
            Self::Essencrit => "essencrit",
        }
    }

    /// Trade-partner field for kinds whose rows are split per party.
    pub fn party_field(self) -> Option<&'static str> {
        match self {
            Self::Imports => Some("source_party"),
            Self::Exports => Some("destination_party"),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}

/// Errors raised when decoding core identifiers.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Section key does not name a submission kind.
    #[error("unknown submission kind: {0}")]
    UnknownKind(String),
}
