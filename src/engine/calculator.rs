//! Per-attacker effectiveness scoring for one role rotation, and the
//! three-form (Meso/Alpha/Omega) chart built from a chosen type triple.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::baseline::{summarize, CupSummary};
use crate::engine::reaction::{reaction_for, Reaction};
use crate::engine::Symbol;
use crate::error::{AmoError, Result};
use crate::matrix::lookup::{normalize_key, Lookup, MatrixSnapshot, TypeName};

/// Total forced by the immune override.
pub const IMMUNE_TOTAL: i32 = -100;
pub const ACTIVE_WEIGHT: i32 = 50;
pub const SECONDARY_WEIGHT: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Form {
    Meso,
    Alpha,
    Omega,
}

impl Form {
    pub const ALL: [Form; 3] = [Self::Meso, Self::Alpha, Self::Omega];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Meso => "Meso",
            Self::Alpha => "Alpha",
            Self::Omega => "Omega",
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The chosen triple. Types need not be distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub meso: String,
    pub alpha: String,
    pub omega: String,
}

impl RoleAssignment {
    pub fn new(meso: impl Into<String>, alpha: impl Into<String>, omega: impl Into<String>) -> Self {
        Self {
            meso: meso.into(),
            alpha: alpha.into(),
            omega: omega.into(),
        }
    }

    /// Every role must name a type.
    pub fn validate(&self) -> Result<()> {
        for form in Form::ALL {
            if self.primary(form).trim().is_empty() {
                return Err(AmoError::Selection { form });
            }
        }
        Ok(())
    }

    /// The type occupying the active slot for `form`.
    pub fn primary(&self, form: Form) -> &str {
        self.rotation(form)[0]
    }

    /// (active, secondary 1, secondary 2) for `form`: MAO, AMO, OMA.
    pub fn rotation(&self, form: Form) -> [&str; 3] {
        let (m, a, o) = (self.meso.as_str(), self.alpha.as_str(), self.omega.as_str());
        match form {
            Form::Meso => [m, a, o],
            Form::Alpha => [a, m, o],
            Form::Omega => [o, m, a],
        }
    }

    /// Same roles spelled as the matrix header spells them.
    pub fn resolved(&self, snapshot: &MatrixSnapshot) -> Self {
        Self::new(
            snapshot.display_name(&self.meso),
            snapshot.display_name(&self.alpha),
            snapshot.display_name(&self.omega),
        )
    }

    /// Column title for `form`, e.g. `Fire / Ice / Wind`.
    pub fn title(&self, form: Form) -> String {
        self.rotation(form).join(" / ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRow {
    pub attacker: String,
    pub active: Symbol,
    pub secondary1: Symbol,
    pub secondary2: Symbol,
    pub total: i32,
    pub reaction: Reaction,
}

impl FormRow {
    /// Observed symbols joined by spaces, e.g. `N N R`.
    pub fn cups(&self) -> String {
        format!("{} {} {}", self.active, self.secondary1, self.secondary2)
    }
}

/// Raw total for one attacker, given the active symbol and the two
/// secondary symbols already normalized with [Symbol::as_secondary].
pub fn score_total(active: Symbol, secondary1: Symbol, secondary2: Symbol) -> i32 {
    let all_resist =
        active == Symbol::Resist && secondary1 == Symbol::Resist && secondary2 == Symbol::Resist;
    if active == Symbol::Exception || all_resist {
        return IMMUNE_TOTAL;
    }
    active.score() * ACTIVE_WEIGHT
        + secondary1.score() * SECONDARY_WEIGHT
        + secondary2.score() * SECONDARY_WEIGHT
}

/// One row per attacking type in `types`, in order.
pub fn compute_form(
    lookup: &Lookup,
    types: &[TypeName],
    active: &str,
    secondary1: &str,
    secondary2: &str,
) -> Vec<FormRow> {
    let active_key = normalize_key(active);
    let secondary1_key = normalize_key(secondary1);
    let secondary2_key = normalize_key(secondary2);

    types
        .iter()
        .map(|attacker| {
            let m = lookup.symbol(&attacker.key, &active_key);
            let a = lookup.symbol(&attacker.key, &secondary1_key).as_secondary();
            let o = lookup.symbol(&attacker.key, &secondary2_key).as_secondary();
            let total = score_total(m, a, o);
            FormRow {
                attacker: attacker.display.clone(),
                active: m,
                secondary1: a,
                secondary2: o,
                total,
                reaction: reaction_for(total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct FormTable {
    pub form: Form,
    pub title: String,
    pub rows: Vec<FormRow>,
}

/// All three forms for one role assignment, plus their baseline comparison.
#[derive(Debug, Clone, Serialize)]
pub struct TripleFormChart {
    pub name: String,
    pub roles: RoleAssignment,
    pub forms: Vec<FormTable>,
    pub summaries: Vec<CupSummary>,
}

impl TripleFormChart {
    pub fn form(&self, form: Form) -> &[FormRow] {
        self.forms
            .iter()
            .find(|table| table.form == form)
            .map(|table| table.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn summary(&self, form: Form) -> Option<&CupSummary> {
        self.summaries.iter().find(|s| s.form == form)
    }

    /// Download name. Anything outside ASCII alphanumerics, space, `_` and `-`
    /// becomes `_` so the name is safe inside a header and a path.
    pub fn csv_file_name(&self) -> String {
        let stem: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{stem}_Triple_Form_Chart.csv")
    }
}

/// Compute the Meso/Alpha/Omega chart against a loaded snapshot.
pub fn compute_chart(
    snapshot: &MatrixSnapshot,
    roles: &RoleAssignment,
    name: &str,
) -> Result<TripleFormChart> {
    if snapshot.types().is_empty() || snapshot.lookup().is_empty() {
        return Err(AmoError::NotLoaded);
    }
    roles.validate()?;
    let roles = &roles.resolved(snapshot);
    debug!(
        "computing chart {name:?} for {} / {} / {}",
        roles.meso, roles.alpha, roles.omega
    );

    let forms: Vec<FormTable> = Form::ALL
        .iter()
        .map(|&form| {
            let [active, secondary1, secondary2] = roles.rotation(form);
            FormTable {
                form,
                title: roles.title(form),
                rows: compute_form(snapshot.lookup(), snapshot.types(), active, secondary1, secondary2),
            }
        })
        .collect();
    let summaries = summarize(&forms, roles, snapshot.baselines());

    Ok(TripleFormChart {
        name: name.to_string(),
        roles: roles.clone(),
        forms,
        summaries,
    })
}
