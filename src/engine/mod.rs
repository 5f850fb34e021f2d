//! Effectiveness engine: WRNX symbols, role-rotation scoring, reaction snapping,
//! and pure-type baselines. Everything here is a pure function of a loaded
//! [crate::matrix::MatrixSnapshot].

pub mod baseline;
pub mod calculator;
pub mod reaction;
pub mod symbol;

pub use baseline::{base_type_sums, summarize, BaseTypeSum, BaseTypeSums, CupSummary};
pub use calculator::{
    compute_chart, compute_form, score_total, Form, FormRow, FormTable, RoleAssignment,
    TripleFormChart, ACTIVE_WEIGHT, IMMUNE_TOTAL, SECONDARY_WEIGHT,
};
pub use reaction::{reaction_for, snap, Reaction, REACTION_SCALE};
pub use symbol::Symbol;
