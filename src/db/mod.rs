pub mod repository;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ScoreReport, ScoreType, StoredMeasurement};
use crate::store::ScoreStore;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQLite-backed [`ScoreStore`].
///
/// The connection sits behind a `Mutex`; a thread that panics while holding
/// the lock poisons it, and later calls panic.
pub struct SqliteScoreStore {
    conn: Mutex<Connection>,
}

impl SqliteScoreStore {
    /// Open (creating if needed) a score database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: Mutex::new(sqlite::open_database(path)?),
        })
    }

    /// In-memory store for tests and ephemeral hosts.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: Mutex::new(sqlite::open_memory_database()?),
        })
    }
}

impl ScoreStore for SqliteScoreStore {
    type Error = DatabaseError;

    fn save_score(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        report: &ScoreReport,
        calculated_by: &str,
    ) -> Result<Uuid, DatabaseError> {
        let measurement = StoredMeasurement {
            id: Uuid::new_v4(),
            patient_id: *patient_id,
            organization_id: *organization_id,
            score_type: report.score_type,
            score_value: report.score,
            risk_percentage: report.risk_percentage,
            risk_category: report.category,
            recommendations: report.recommendations.clone(),
            calculated_by: calculated_by.to_string(),
            calculated_at: report.calculated_at,
        };

        let conn = self.conn.lock().expect("connection lock poisoned");
        repository::insert_measurement(&conn, &measurement)?;

        tracing::info!(
            measurement_id = %measurement.id,
            patient_id = %patient_id,
            score_type = measurement.score_type.as_str(),
            category = measurement.risk_category.as_str(),
            "Score measurement saved"
        );
        Ok(measurement.id)
    }

    fn history(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<StoredMeasurement>, DatabaseError> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        repository::get_measurement_history(&conn, patient_id, organization_id, limit)
    }

    fn history_for_type(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        score_type: ScoreType,
        limit: Option<usize>,
    ) -> Result<Vec<StoredMeasurement>, DatabaseError> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        repository::get_measurement_history_by_type(
            &conn,
            patient_id,
            organization_id,
            score_type,
            limit,
        )
    }

    fn latest(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        score_type: ScoreType,
    ) -> Result<Option<StoredMeasurement>, DatabaseError> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        repository::get_latest_measurement(&conn, patient_id, organization_id, score_type)
    }

    fn count(&self, patient_id: &Uuid, organization_id: &Uuid) -> Result<usize, DatabaseError> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        repository::count_measurements(&conn, patient_id, organization_id)
    }
}
