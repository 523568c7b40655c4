//! Row schemas, one type per submission kind, behind a single factory.
//!
//! Every row stores only its input fields. Derived cells
//! (`quantity_exempted`, the essencrit balance chain, ...) are computed from
//! the stored fields on each call to [`SubmissionRow::derived`].

use crate::config::ExemptionMode;
use crate::issue::RowIssue;
use crate::reconcile::SkipState;
use ozone_core::{
    BlendId, FieldState, FieldValue, GroupCode, ItemKey, Localizer, PartyId, SubmissionKind,
    SubstanceId,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Generates name-based access to a row's stored fields.
macro_rules! stored_fields {
    (@inherent $row:ident { $($name:ident),+ $(,)? }) => {
        impl $row {
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($name)),+];

            fn stored(&self, name: &str) -> Option<&::ozone_core::FieldState> {
                match name {
                    $(stringify!($name) => Some(&self.$name),)+
                    _ => None,
                }
            }

            fn stored_mut(&mut self, name: &str) -> Option<&mut ::ozone_core::FieldState> {
                match name {
                    $(stringify!($name) => Some(&mut self.$name),)+
                    _ => None,
                }
            }
        }
    };
    ($row:ident { $($name:ident),+ $(,)? }) => {
        stored_fields!(@inherent $row { $($name),+ });

        impl $crate::rows::RowFields for $row {
            fn field_names(&self) -> Vec<&'static str> {
                Self::FIELDS.to_vec()
            }

            fn field(&self, name: &str) -> Option<&::ozone_core::FieldState> {
                self.stored(name)
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut ::ozone_core::FieldState> {
                self.stored_mut(name)
            }
        }
    };
}

mod destruction;
mod emissions;
mod essencrit;
mod nonparty;
mod procagent;
mod production;
mod trade;
mod transfer;

pub use destruction::DestructionRow;
pub use emissions::EmissionRow;
pub use essencrit::EssencritRow;
pub use nonparty::NonPartyRow;
pub use procagent::ProcessAgentRow;
pub use production::{ProductionRow, ProductionRule};
pub use trade::{TradeDirection, TradeRow};
pub use transfer::TransferRow;

/// Name-based access to the stored (non-derived) fields of a row.
pub trait RowFields {
    /// Stored field names; identical for every row of the same kind.
    fn field_names(&self) -> Vec<&'static str>;
    fn field(&self, name: &str) -> Option<&FieldState>;
    fn field_mut(&mut self, name: &str) -> Option<&mut FieldState>;
}

/// Inputs to [`build_row`].
#[derive(Clone, Debug, Default)]
pub struct BuildParams {
    pub substance: Option<SubstanceId>,
    pub group: Option<GroupCode>,
    /// Trade partner; lands on the kind's party field when it has one.
    pub country: Option<PartyId>,
    pub blend: Option<BlendId>,
    /// Backend values keyed by field name.
    pub prefill_data: Option<BTreeMap<String, serde_json::Value>>,
    pub ordering_id: Option<u32>,
    pub exemption_mode: ExemptionMode,
}

impl BuildParams {
    pub(crate) fn substance_field(&self) -> FieldState {
        FieldState::select(self.substance.as_ref().map(|s| FieldValue::Text(s.0.clone())))
    }

    pub(crate) fn blend_field(&self) -> FieldState {
        FieldState::select(self.blend.as_ref().map(|b| FieldValue::Text(b.0.clone())))
    }

    pub(crate) fn group_field(&self) -> FieldState {
        FieldState::new(ozone_core::FieldKind::NonInput)
            .with(self.group.as_ref().map(|g| FieldValue::Text(g.0.clone())))
    }

    pub(crate) fn country_field(&self) -> FieldState {
        FieldState::select(self.country.as_ref().map(|c| FieldValue::Text(c.0.clone())))
    }
}

/// A row of any submission kind.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionRow {
    Trade(TradeRow),
    Production(ProductionRow),
    Destruction(DestructionRow),
    NonParty(NonPartyRow),
    Emission(EmissionRow),
    Transfer(TransferRow),
    ProcessAgent(ProcessAgentRow),
    Essencrit(EssencritRow),
}

/// Build a fully populated row for `kind`, then apply any prefill data.
pub fn build_row(kind: SubmissionKind, params: BuildParams) -> SubmissionRow {
    let mut row = match kind {
        SubmissionKind::Imports => {
            SubmissionRow::Trade(TradeRow::new(TradeDirection::Imports, &params))
        }
        SubmissionKind::Exports => {
            SubmissionRow::Trade(TradeRow::new(TradeDirection::Exports, &params))
        }
        SubmissionKind::Production => SubmissionRow::Production(ProductionRow::new(&params)),
        SubmissionKind::Destruction => SubmissionRow::Destruction(DestructionRow::new(&params)),
        SubmissionKind::NonParty => SubmissionRow::NonParty(NonPartyRow::new(&params)),
        SubmissionKind::Emissions => SubmissionRow::Emission(EmissionRow::new(&params)),
        SubmissionKind::Transfers => SubmissionRow::Transfer(TransferRow::new(&params)),
        SubmissionKind::ProcessAgent => SubmissionRow::ProcessAgent(ProcessAgentRow::new(&params)),
        SubmissionKind::Essencrit => SubmissionRow::Essencrit(EssencritRow::new(&params)),
    };
    if let Some(prefill) = &params.prefill_data {
        row.apply_prefill(prefill);
    }
    row
}

impl SubmissionRow {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Self::Trade(r) => r.direction.kind(),
            Self::Production(_) => SubmissionKind::Production,
            Self::Destruction(_) => SubmissionKind::Destruction,
            Self::NonParty(_) => SubmissionKind::NonParty,
            Self::Emission(_) => SubmissionKind::Emissions,
            Self::Transfer(_) => SubmissionKind::Transfers,
            Self::ProcessAgent(_) => SubmissionKind::ProcessAgent,
            Self::Essencrit(_) => SubmissionKind::Essencrit,
        }
    }

    pub fn fields(&self) -> &dyn RowFields {
        match self {
            Self::Trade(r) => r,
            Self::Production(r) => r,
            Self::Destruction(r) => r,
            Self::NonParty(r) => r,
            Self::Emission(r) => r,
            Self::Transfer(r) => r,
            Self::ProcessAgent(r) => r,
            Self::Essencrit(r) => r,
        }
    }

    fn fields_mut(&mut self) -> &mut dyn RowFields {
        match self {
            Self::Trade(r) => r,
            Self::Production(r) => r,
            Self::Destruction(r) => r,
            Self::NonParty(r) => r,
            Self::Emission(r) => r,
            Self::Transfer(r) => r,
            Self::ProcessAgent(r) => r,
            Self::Essencrit(r) => r,
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields().field_names()
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields().field(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.fields_mut().field_mut(name)
    }

    pub fn ordering_id(&self) -> Option<u32> {
        match self {
            Self::Trade(r) => r.ordering_id,
            Self::Production(r) => r.ordering_id,
            Self::Destruction(r) => r.ordering_id,
            Self::NonParty(r) => r.ordering_id,
            Self::Emission(r) => r.ordering_id,
            Self::Transfer(r) => r.ordering_id,
            Self::ProcessAgent(r) => r.ordering_id,
            Self::Essencrit(r) => r.ordering_id,
        }
    }

    /// Names of the cells computed on read for this kind.
    pub fn derived_names(&self) -> &'static [&'static str] {
        match self {
            Self::Trade(_) | Self::Production(_) => &["quantity_exempted", "decision_exempted"],
            Self::Essencrit(_) => EssencritRow::DERIVED,
            _ => &[],
        }
    }

    /// Compute a derived cell from the current stored values.
    pub fn derived(&self, name: &str, localizer: &dyn Localizer) -> Option<FieldState> {
        match self {
            Self::Trade(r) => r.derived(name, localizer),
            Self::Production(r) => r.derived(name, localizer),
            Self::Essencrit(r) => r.derived(name),
            _ => None,
        }
    }

    /// The substance or blend this row reports, if one is selected.
    pub fn item_key(&self) -> Option<ItemKey> {
        let text = |name: &str| {
            self.field(name)
                .filter(|f| f.is_set())
                .and_then(|f| f.value())
                .map(|v| v.display())
        };
        text("substance")
            .map(|s| ItemKey::Substance(SubstanceId(s)))
            .or_else(|| text("blend").map(|b| ItemKey::Blend(BlendId(b))))
    }

    /// Row-local rule violations given this row's reconciliation state.
    pub fn issues(&self, skip: SkipState) -> Vec<RowIssue> {
        match self {
            Self::Trade(r) => r.issues(skip),
            Self::Production(r) => r.issues(),
            Self::Destruction(r) => r.issues(),
            Self::NonParty(r) => r.issues(),
            Self::Emission(r) => r.issues(),
            Self::Transfer(r) => r.issues(),
            Self::ProcessAgent(r) => r.issues(),
            Self::Essencrit(r) => r.issues(),
        }
    }

    /// Copy backend values onto matching stored fields. Unknown keys and keys
    /// naming derived cells are ignored.
    pub fn apply_prefill(&mut self, prefill: &BTreeMap<String, serde_json::Value>) {
        let kind = self.kind();
        for (key, value) in prefill {
            match self.field_mut(key) {
                Some(field) => field.selected = FieldValue::from_json(value),
                None => debug!(%kind, key = %key, "ignoring prefill key without a matching field"),
            }
        }
    }

    /// Stored and derived cells by name, as the form renders them.
    pub fn snapshot(&self, localizer: &dyn Localizer) -> BTreeMap<String, FieldState> {
        let mut out: BTreeMap<String, FieldState> = self
            .field_names()
            .into_iter()
            .filter_map(|name| self.field(name).map(|f| (name.to_string(), f.clone())))
            .collect();
        for name in self.derived_names() {
            if let Some(f) = self.derived(name, localizer) {
                out.insert((*name).to_string(), f);
            }
        }
        out
    }
}
