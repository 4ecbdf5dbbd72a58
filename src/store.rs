//! Persistence port for computed scores.
//!
//! Calculators never persist; callers that want history push a finished
//! report through this trait. The SQLite adapter in [`crate::db`] is the
//! shipped backend, but hosting layers can bring their own.

use serde_json::Value;
use uuid::Uuid;

use crate::models::enums::ScoreType;
use crate::models::measurement::StoredMeasurement;
use crate::models::results::ScoreReport;
use crate::scores::{registry, ScoreError};

/// Storage backend for score measurements, keyed by patient and organization.
///
/// Measurements are immutable once written; the only reads are
/// most-recent-first history queries.
pub trait ScoreStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one computed report. Returns the new measurement id.
    fn save_score(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        report: &ScoreReport,
        calculated_by: &str,
    ) -> Result<Uuid, Self::Error>;

    /// All measurements for a patient, newest first, optionally limited.
    fn history(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<StoredMeasurement>, Self::Error>;

    /// Measurements of one score type for a patient, newest first.
    fn history_for_type(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        score_type: ScoreType,
        limit: Option<usize>,
    ) -> Result<Vec<StoredMeasurement>, Self::Error>;

    /// Most recent measurement of one score type, if any.
    fn latest(
        &self,
        patient_id: &Uuid,
        organization_id: &Uuid,
        score_type: ScoreType,
    ) -> Result<Option<StoredMeasurement>, Self::Error>;

    /// Number of stored measurements for a patient.
    fn count(&self, patient_id: &Uuid, organization_id: &Uuid) -> Result<usize, Self::Error>;
}

/// Compute a score and persist it in one call.
///
/// The report is returned whenever computation succeeds; a failed save is
/// handed back alongside it instead of discarding the result. Only a
/// computation failure is a hard error.
pub fn compute_and_save<S: ScoreStore>(
    store: &S,
    score_type: ScoreType,
    payload: &Value,
    patient_id: &Uuid,
    organization_id: &Uuid,
    calculated_by: &str,
) -> Result<(ScoreReport, Result<Uuid, S::Error>), ScoreError> {
    let report = registry::compute(score_type, payload)?;
    let saved = store.save_score(patient_id, organization_id, &report, calculated_by);
    if let Err(ref err) = saved {
        tracing::warn!(
            score_type = score_type.as_str(),
            patient_id = %patient_id,
            error = %err,
            "Score computed but persistence failed"
        );
    }
    Ok((report, saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::convert::Infallible;
    use std::sync::Mutex;

    struct RecordingStore {
        saved: Mutex<Vec<(Uuid, Uuid, String, String)>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
            }
        }
    }

    impl ScoreStore for RecordingStore {
        type Error = Infallible;

        fn save_score(
            &self,
            patient_id: &Uuid,
            organization_id: &Uuid,
            report: &ScoreReport,
            calculated_by: &str,
        ) -> Result<Uuid, Self::Error> {
            self.saved.lock().unwrap().push((
                *patient_id,
                *organization_id,
                report.score_type.as_str().to_string(),
                calculated_by.to_string(),
            ));
            Ok(Uuid::new_v4())
        }

        fn history(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _limit: Option<usize>,
        ) -> Result<Vec<StoredMeasurement>, Self::Error> {
            Ok(Vec::new())
        }

        fn history_for_type(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _score_type: ScoreType,
            _limit: Option<usize>,
        ) -> Result<Vec<StoredMeasurement>, Self::Error> {
            Ok(Vec::new())
        }

        fn latest(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _score_type: ScoreType,
        ) -> Result<Option<StoredMeasurement>, Self::Error> {
            Ok(None)
        }

        fn count(&self, _patient_id: &Uuid, _organization_id: &Uuid) -> Result<usize, Self::Error> {
            Ok(0)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("disk unavailable")]
    struct DiskUnavailable;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        type Error = DiskUnavailable;

        fn save_score(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _report: &ScoreReport,
            _calculated_by: &str,
        ) -> Result<Uuid, Self::Error> {
            Err(DiskUnavailable)
        }

        fn history(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _limit: Option<usize>,
        ) -> Result<Vec<StoredMeasurement>, Self::Error> {
            Err(DiskUnavailable)
        }

        fn history_for_type(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _score_type: ScoreType,
            _limit: Option<usize>,
        ) -> Result<Vec<StoredMeasurement>, Self::Error> {
            Err(DiskUnavailable)
        }

        fn latest(
            &self,
            _patient_id: &Uuid,
            _organization_id: &Uuid,
            _score_type: ScoreType,
        ) -> Result<Option<StoredMeasurement>, Self::Error> {
            Err(DiskUnavailable)
        }

        fn count(&self, _patient_id: &Uuid, _organization_id: &Uuid) -> Result<usize, Self::Error> {
            Err(DiskUnavailable)
        }
    }

    fn timi_payload() -> Value {
        json!({
            "age_over_65": true,
            "has_three_cad_risk_factors": true,
            "has_known_cad": false,
            "uses_aspirin": false,
            "has_severe_angina": true,
            "has_st_deviation": false,
            "has_elevated_markers": false,
        })
    }

    #[test]
    fn computes_and_records_the_save() {
        let store = RecordingStore::new();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        let (report, saved) = compute_and_save(
            &store,
            ScoreType::Timi,
            &timi_payload(),
            &patient,
            &org,
            "dr.garcia",
        )
        .unwrap();

        assert_eq!(report.score, 3.0);
        assert!(saved.is_ok());
        let calls = store.saved.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, patient);
        assert_eq!(calls[0].2, "timi");
        assert_eq!(calls[0].3, "dr.garcia");
    }

    #[test]
    fn failed_save_still_returns_the_report() {
        let (report, saved) = compute_and_save(
            &BrokenStore,
            ScoreType::Timi,
            &timi_payload(),
            &Uuid::new_v4(),
            &Uuid::new_v4(),
            "dr.garcia",
        )
        .unwrap();

        assert_eq!(report.score, 3.0);
        assert!(saved.is_err());
    }

    #[test]
    fn computation_failure_is_the_only_hard_error() {
        let err = compute_and_save(
            &RecordingStore::new(),
            ScoreType::Timi,
            &json!({"age_over_65": true}),
            &Uuid::new_v4(),
            &Uuid::new_v4(),
            "dr.garcia",
        )
        .unwrap_err();
        assert!(matches!(err, ScoreError::MalformedPayload { .. }));
    }
}
