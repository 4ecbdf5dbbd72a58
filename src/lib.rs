//! # cardiorisk
//!
//! Deterministic cardiovascular risk-scoring engine: Framingham, ASCVD
//! (Pooled Cohort Equations), CAC/Agatston interpretation, HEART,
//! CHA2DS2-VASc, HAS-BLED, TIMI and GRACE, plus a comprehensive composer
//! that merges ASCVD and CAC findings.
//!
//! ## Architecture
//!
//! - `models`: input and result value objects shared by every calculator
//! - `scores`: the pure calculators, shared recommendation rules, the
//!   composer, and a score-type registry for JSON payloads
//! - `store`: the persistence port ([`ScoreStore`]) and compute-and-save glue
//! - `db`: SQLite adapter behind the port, with migrations and history queries
//!
//! Every calculator is a pure function from a validated input record to a
//! [`ScoreReport`]; persistence is the only I/O boundary. A failed save never
//! discards a computed report.

pub mod config;
pub mod db;
pub mod models;
pub mod scores;
pub mod store;

pub use db::SqliteScoreStore;
pub use models::{PatientRiskData, RiskCategory, ScoreReport, ScoreType, StoredMeasurement};
pub use scores::{compute, compute_by_name, ScoreError};
pub use store::{compute_and_save, ScoreStore};
