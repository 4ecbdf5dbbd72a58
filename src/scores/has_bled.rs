//! HAS-BLED major-bleed risk during anticoagulation.
//!
//! Eight independent one-point factors. The annual bleed-rate table is
//! published for scores 0-5; higher totals clamp to the last row. The
//! score guides correction of modifiable factors and monitoring intensity;
//! it is never grounds to categorically deny anticoagulation.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType};
use crate::models::inputs::HasBledInput;
use crate::models::results::{HasBledDetail, ScoreDetail, ScoreReport};

/// Published annual major-bleed rates by score, indexed by the capped
/// total. The dip at score 1 is as published.
const ANNUAL_BLEED_RISK_PCT: [f64; 6] = [1.13, 1.02, 1.88, 3.74, 8.70, 12.50];

/// Sum of the HAS-BLED points.
pub fn total_points(input: &HasBledInput) -> u8 {
    [
        input.has_hypertension,
        input.has_renal_disease,
        input.has_liver_disease,
        input.has_stroke_history,
        input.has_bleeding_history,
        input.has_labile_inr,
        input.age_over_65,
        input.uses_drugs_or_alcohol,
    ]
    .iter()
    .filter(|&&flag| flag)
    .count() as u8
}

fn factor_notes(input: &HasBledInput) -> Vec<String> {
    let factors: [(bool, &str); 8] = [
        (input.has_hypertension, "Uncontrolled hypertension"),
        (input.has_renal_disease, "Renal disease"),
        (input.has_liver_disease, "Liver disease"),
        (input.has_stroke_history, "Prior stroke"),
        (input.has_bleeding_history, "Bleeding history or predisposition"),
        (input.has_labile_inr, "Labile INR"),
        (input.age_over_65, "Age over 65"),
        (
            input.uses_drugs_or_alcohol,
            "Antiplatelet or NSAID use, or alcohol excess",
        ),
    ];
    factors
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, label)| format!("{label} (+1)"))
        .collect()
}

/// Full HAS-BLED report.
pub fn calculate(input: &HasBledInput) -> ScoreReport {
    let total = total_points(input);
    let capped = usize::from(total).min(ANNUAL_BLEED_RISK_PCT.len() - 1);
    let bleed_risk = ANNUAL_BLEED_RISK_PCT[capped];

    let category = match total {
        0 | 1 => RiskCategory::Low,
        2 => RiskCategory::Moderate,
        _ => RiskCategory::High,
    };

    let recommendations = if total <= 2 {
        vec![
            "Bleeding risk acceptable; anticoagulation need not be withheld on \
             bleeding grounds."
                .to_string(),
            "Routine monitoring of blood pressure, renal function and INR."
                .to_string(),
        ]
    } else {
        vec![
            "Elevated bleeding risk; correct modifiable factors (blood pressure, \
             INR stability, antiplatelet and NSAID use, alcohol intake)."
                .to_string(),
            "Intensify follow-up; an elevated score alone should not withhold \
             anticoagulation when stroke risk is high."
                .to_string(),
        ]
    };

    ScoreReport {
        score_type: ScoreType::HasBled,
        score: f64::from(total),
        risk_percentage: bleed_risk,
        category,
        recommendations,
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::HasBled(HasBledDetail {
            total_points: total,
            annual_bleed_risk_pct: bleed_risk,
            clinical_notes: factor_notes(input),
        }),
    }
}
