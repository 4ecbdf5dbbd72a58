use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RiskCategory, ScoreType};

/// A persisted score calculation, keyed by patient and organization.
///
/// Measurements are immutable once written; history queries return them
/// most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMeasurement {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub organization_id: Uuid,
    pub score_type: ScoreType,
    pub score_value: f64,
    pub risk_percentage: f64,
    pub risk_category: RiskCategory,
    pub recommendations: Vec<String>,
    pub calculated_by: String,
    pub calculated_at: NaiveDateTime,
}
