//! Grade sheet auditing: per-component and per-branch averages, top-3
//! rankings, and detection of rows whose declared total disagrees with the
//! sum of their components.

pub mod aggregate;
pub mod config;
pub mod discrepancy;
pub mod error;
pub mod filter;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod sheet;

pub use error::AuditError;
