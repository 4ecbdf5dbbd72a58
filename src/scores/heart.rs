//! HEART score for chest pain triage.
//!
//! Five clinician-graded 0-2 components (History, ECG, Age, Risk factors,
//! Troponin) sum to 0-10. Bands at 0-3 / 4-6 / 7-10 carry the published
//! 6-week MACE rates and a disposition recommendation.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType};
use crate::models::inputs::HeartScoreInput;
use crate::models::results::{HeartDetail, ScoreDetail, ScoreReport};

use super::bands::{band, find_band, Band};

struct HeartBand {
    category: RiskCategory,
    /// Published 6-week MACE range for the band.
    mace_six_week: &'static str,
    /// Representative MACE rate used as the report's risk percentage.
    risk_pct: f64,
    recommendations: &'static [&'static str],
}

const HEART_BANDS: &[Band<HeartBand>] = &[
    band(
        0.0,
        HeartBand {
            category: RiskCategory::Low,
            mace_six_week: "1.7%",
            risk_pct: 1.7,
            recommendations: &[
                "Low probability of acute coronary syndrome; discharge with \
                 outpatient follow-up is appropriate.",
                "Provide return precautions; arrange primary care review within \
                 72 hours.",
            ],
        },
    ),
    band(
        4.0,
        HeartBand {
            category: RiskCategory::Moderate,
            mace_six_week: "12-21%",
            risk_pct: 16.6,
            recommendations: &[
                "Admit for observation with serial troponin and ECG.",
                "Non-invasive testing (stress imaging or CT angiography) before \
                 discharge.",
            ],
        },
    ),
    band(
        7.0,
        HeartBand {
            category: RiskCategory::High,
            mace_six_week: ">50%",
            risk_pct: 50.1,
            recommendations: &[
                "Admit; early invasive strategy indicated.",
                "Urgent cardiology consultation for early catheterization.",
                "Start guideline-directed therapy for acute coronary syndrome.",
            ],
        },
    ),
];

const HISTORY_LABELS: [&str; 3] = ["slightly suspicious", "moderately suspicious", "highly suspicious"];
const ECG_LABELS: [&str; 3] = [
    "normal",
    "non-specific repolarisation disturbance",
    "significant ST deviation",
];
const AGE_LABELS: [&str; 3] = ["under 45", "45 to 64", "65 or over"];
const RISK_FACTOR_LABELS: [&str; 3] = [
    "no known risk factors",
    "one or two risk factors",
    "three or more risk factors or known atherosclerotic disease",
];
const TROPONIN_LABELS: [&str; 3] = [
    "at or below the normal limit",
    "one to three times the normal limit",
    "above three times the normal limit",
];

/// Clamp a component to the 0-2 range the score defines.
fn component(value: u8) -> u8 {
    value.min(2)
}

fn component_note(name: &str, labels: &[&str; 3], value: u8) -> String {
    format!("{name}: {} (+{value})", labels[value as usize])
}

/// Sum of the five components, each clamped to 0-2.
pub fn total_points(input: &HeartScoreInput) -> u8 {
    component(input.history)
        + component(input.ecg)
        + component(input.age)
        + component(input.risk_factors)
        + component(input.troponin)
}

/// Full HEART report.
pub fn calculate(input: &HeartScoreInput) -> ScoreReport {
    let history = component(input.history);
    let ecg = component(input.ecg);
    let age = component(input.age);
    let risk_factors = component(input.risk_factors);
    let troponin = component(input.troponin);
    let total = history + ecg + age + risk_factors + troponin;

    let selected = find_band(HEART_BANDS, f64::from(total));

    let notes = vec![
        component_note("History", &HISTORY_LABELS, history),
        component_note("ECG", &ECG_LABELS, ecg),
        component_note("Age", &AGE_LABELS, age),
        component_note("Risk factors", &RISK_FACTOR_LABELS, risk_factors),
        component_note("Troponin", &TROPONIN_LABELS, troponin),
    ];

    ScoreReport {
        score_type: ScoreType::Heart,
        score: f64::from(total),
        risk_percentage: selected.risk_pct,
        category: selected.category,
        recommendations: selected.recommendations.iter().map(|r| (*r).to_string()).collect(),
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Heart(HeartDetail {
            total_points: total,
            mace_six_week: selected.mace_six_week.to_string(),
            clinical_notes: notes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(history: u8, ecg: u8, age: u8, risk_factors: u8, troponin: u8) -> HeartScoreInput {
        HeartScoreInput {
            history,
            ecg,
            age,
            risk_factors,
            troponin,
        }
    }

    #[test]
    fn total_is_literal_component_sum() {
        assert_eq!(total_points(&input(0, 0, 0, 0, 0)), 0);
        assert_eq!(total_points(&input(2, 1, 2, 1, 1)), 7);
        assert_eq!(total_points(&input(2, 2, 2, 2, 2)), 10);
    }

    #[test]
    fn out_of_range_components_clamp_to_two() {
        assert_eq!(total_points(&input(5, 0, 0, 0, 0)), 2);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(calculate(&input(1, 1, 1, 0, 0)).category, RiskCategory::Low);
        assert_eq!(calculate(&input(1, 1, 1, 1, 0)).category, RiskCategory::Moderate);
        assert_eq!(calculate(&input(2, 2, 2, 0, 0)).category, RiskCategory::Moderate);
        assert_eq!(calculate(&input(2, 2, 2, 1, 0)).category, RiskCategory::High);
    }

    #[test]
    fn high_score_recommends_urgent_invasive_management() {
        let report = calculate(&input(2, 1, 2, 1, 1));
        assert_eq!(report.score, 7.0);
        assert_eq!(report.category, RiskCategory::High);
        assert!(report.risk_percentage > 50.0);
        let joined = report.recommendations.join("\n").to_lowercase();
        assert!(joined.contains("urgent"));
        assert!(joined.contains("invasive"));
    }

    #[test]
    fn low_band_allows_discharge() {
        let report = calculate(&input(0, 0, 1, 1, 0));
        assert_eq!(report.category, RiskCategory::Low);
        assert_eq!(report.risk_percentage, 1.7);
        assert!(report.recommendations[0].contains("discharge"));
    }

    #[test]
    fn notes_break_down_every_component() {
        let report = calculate(&input(2, 1, 2, 1, 1));
        match report.detail {
            ScoreDetail::Heart(ref d) => {
                assert_eq!(d.clinical_notes.len(), 5);
                assert_eq!(d.clinical_notes[0], "History: highly suspicious (+2)");
                assert_eq!(d.clinical_notes[4], "Troponin: one to three times the normal limit (+1)");
                assert_eq!(d.mace_six_week, ">50%");
            }
            ref other => panic!("wrong detail variant: {other:?}"),
        }
    }
}
