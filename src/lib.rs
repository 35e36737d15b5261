//! Entity reconciliation and relative scoring for elderly-care workforce
//! reporting.
//!
//! Three independently maintained spreadsheets (employee roster, institution
//! registry, education-platform attendance) describe the same people and
//! institutions without sharing a reliable foreign key. The [`pipeline`]
//! module links them with a tiered matching cascade, collapses duplicate
//! matches, and converts the reconciled facts into percentile-rank scores
//! that are only meaningful relative to the institution population present
//! in the same run. The [`roster`] module turns raw CSV exports into the
//! typed collections the pipeline consumes.

pub mod config;
mod error;
pub mod pipeline;
pub mod roster;

pub use error::EngineError;
