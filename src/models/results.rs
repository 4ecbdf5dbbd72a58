use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{RiskCategory, ScoreType};

// ---------------------------------------------------------------------------
// ScoreReport
// ---------------------------------------------------------------------------

/// The shape every calculator returns.
///
/// `score` is the calculator's native value: points for the additive scores,
/// a percentage for ASCVD, Agatston units for CAC. `risk_percentage` is the
/// normalized 0-100 figure used for banding and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score_type: ScoreType,
    pub score: f64,
    /// Always within [0, 100].
    pub risk_percentage: f64,
    pub category: RiskCategory,
    /// Ordered, de-duplicated guidance strings.
    pub recommendations: Vec<String>,
    pub calculated_at: NaiveDateTime,
    pub detail: ScoreDetail,
}

// ---------------------------------------------------------------------------
// ScoreDetail variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScoreDetail {
    Framingham(FraminghamDetail),
    Ascvd(AscvdDetail),
    Cac(CacDetail),
    Heart(HeartDetail),
    ChadsVasc(ChadsVascDetail),
    HasBled(HasBledDetail),
    Timi(TimiDetail),
    Grace(GraceDetail),
    Comprehensive(ComprehensiveDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraminghamDetail {
    pub total_points: i32,
    pub ten_year_risk_pct: f64,
    /// Vascular age estimate, clamped to [actual age, 85].
    pub heart_age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AscvdDetail {
    /// Whether the patient age fell inside the 40-79 validated window.
    /// When false the base score carries the -1 sentinel.
    pub applicable: bool,
    pub lifetime_risk_pct: f64,
    /// Ten-year risk recomputed at ideal lipid/BP/smoking values.
    pub optimal_risk_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacDetail {
    pub agatston_score: f64,
    /// Echoes the percentile supplied with the input, when any.
    pub percentile: Option<f64>,
    /// Reference 10-year MACE rate for the Agatston band.
    pub mace_ten_year_pct: f64,
    pub clinical_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartDetail {
    pub total_points: u8,
    /// Published 6-week MACE rate for the band, e.g. "1.7%" or ">50%".
    pub mace_six_week: String,
    pub clinical_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChadsVascDetail {
    pub total_points: u8,
    pub annual_stroke_risk_pct: f64,
    pub clinical_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasBledDetail {
    pub total_points: u8,
    pub annual_bleed_risk_pct: f64,
    pub clinical_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimiDetail {
    pub total_points: u8,
    pub event_risk_14_day_pct: f64,
    pub clinical_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraceDetail {
    pub total_points: u32,
    pub in_hospital_mortality_pct: f64,
    pub clinical_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveDetail {
    /// Individual reports the composer ran, in invocation order.
    pub reports: Vec<ScoreReport>,
    pub summary: Vec<String>,
    /// Cross-score adjustments, e.g. CAC=0 tempering an intermediate ASCVD.
    pub cross_score_notes: Vec<String>,
}
