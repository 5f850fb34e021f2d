//! AMO type resistance calculator.
//!
//! Loads a WRNX interaction matrix, scores every attacking type against the
//! three role rotations (Meso/Alpha/Omega) of a chosen type triple, snaps the
//! scores onto the reaction scale, and compares each form with its pure-type
//! baseline.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod report;
pub mod server;
pub mod storage;
pub mod workbench;

pub use error::{AmoError, Result};
