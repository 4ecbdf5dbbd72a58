//! Comprehensive cardiovascular assessment.
//!
//! Composes the individual calculators into one report: ASCVD whenever lipid
//! and risk-factor data is available, CAC whenever an Agatston result is
//! supplied. Pure orchestration; every number comes from the component
//! calculators, the composer only merges and annotates.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType};
use crate::models::inputs::CacScoreInput;
use crate::models::patient::PatientRiskData;
use crate::models::results::{ComprehensiveDetail, ScoreDetail, ScoreReport};

use super::recommendations::RecommendationSet;
use super::{ascvd, cac};

/// Agatston score at which calcium burden alone settles the statin question.
const STATIN_OVERRIDE_CAC: f64 = 100.0;

/// Compose ASCVD and CAC results into a unified assessment.
///
/// Either input may be absent; whatever is present is computed and merged.
/// ASCVD is invoked unconditionally when risk data exists, so an
/// out-of-window age flows through as its not-applicable result rather than
/// suppressing the composition.
pub fn compose(
    risk_data: Option<&PatientRiskData>,
    cac_input: Option<&CacScoreInput>,
) -> ScoreReport {
    let mut reports = Vec::new();
    let mut summary = Vec::new();
    let mut recommendations = RecommendationSet::new();

    let mut ascvd_applicable = false;
    let mut ascvd_category = None;

    if let Some(data) = risk_data {
        let report = ascvd::calculate(data);
        if let ScoreDetail::Ascvd(ref detail) = report.detail {
            ascvd_applicable = detail.applicable;
        }
        if ascvd_applicable {
            ascvd_category = Some(report.category);
            summary.push(format!(
                "ASCVD 10-year risk {:.1}% ({}).",
                report.risk_percentage,
                report.category.description()
            ));
        } else {
            summary.push(format!(
                "ASCVD Pooled Cohort Equations not applicable at age {}; valid for ages {} to {}.",
                data.age,
                ascvd::MIN_AGE,
                ascvd::MAX_AGE
            ));
        }
        recommendations.extend(report.recommendations.iter().cloned());
        reports.push(report);
    }

    let mut agatston = None;
    if let Some(input) = cac_input {
        let report = cac::interpret(input);
        agatston = Some(input.agatston_score);
        summary.push(format!(
            "Agatston score {:.0} ({}); reference 10-year MACE {:.1}%.",
            input.agatston_score,
            report.category.description(),
            report.risk_percentage
        ));
        recommendations.extend(report.recommendations.iter().cloned());
        reports.push(report);
    }

    let cross_score_notes = cross_score_notes(ascvd_applicable, ascvd_category, agatston);

    let category = reports
        .iter()
        .map(|r| r.category)
        .max()
        .unwrap_or(RiskCategory::Low);
    let risk_percentage = reports
        .iter()
        .map(|r| r.risk_percentage)
        .fold(0.0, f64::max);

    if reports.is_empty() {
        summary.push("No score inputs supplied; nothing to compose.".to_string());
    } else {
        summary.push(format!("Overall: {}.", category.description()));
    }

    tracing::info!(
        components = reports.len(),
        category = category.as_str(),
        risk_pct = risk_percentage,
        cross_notes = cross_score_notes.len(),
        "Comprehensive risk composition complete"
    );

    ScoreReport {
        score_type: ScoreType::Comprehensive,
        // The composite has no point scale of its own; the governing
        // component risk doubles as the score.
        score: risk_percentage,
        risk_percentage,
        category,
        recommendations: recommendations.into_vec(),
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Comprehensive(ComprehensiveDetail {
            reports,
            summary,
            cross_score_notes,
        }),
    }
}

/// Adjustment notes that only make sense with both modalities in view.
fn cross_score_notes(
    ascvd_applicable: bool,
    ascvd_category: Option<RiskCategory>,
    agatston: Option<f64>,
) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(score) = agatston {
        if score == 0.0 && ascvd_applicable && ascvd_category == Some(RiskCategory::Moderate) {
            notes.push(
                "Agatston score of zero supports deferring statin therapy despite \
                 intermediate ASCVD risk; reassess calcium in 5 to 10 years."
                    .to_string(),
            );
        }
        if score >= STATIN_OVERRIDE_CAC {
            notes.push(
                "Agatston score of 100 or more supports high-intensity statin therapy \
                 regardless of the ASCVD risk band."
                    .to_string(),
            );
        }
    }
    notes
}
