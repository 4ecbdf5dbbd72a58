//! CHA2DS2-VASc stroke risk in atrial fibrillation.
//!
//! Additive point score mapped through the published annual stroke-rate
//! table. Anticoagulation guidance distinguishes a single point earned by
//! female sex alone from a point earned by any other factor.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType, Sex};
use crate::models::inputs::ChadsVascInput;
use crate::models::results::{ChadsVascDetail, ScoreDetail, ScoreReport};

/// Published annual stroke rates by score. Indexed by the capped score;
/// the dips at 7 and 8 are as published (small validation cohorts).
const ANNUAL_STROKE_RISK_PCT: [f64; 10] = [0.0, 1.3, 2.2, 3.2, 4.0, 6.7, 9.8, 9.6, 6.7, 15.2];

/// Sum of the CHA2DS2-VASc points.
pub fn total_points(input: &ChadsVascInput) -> u8 {
    let mut points = 0;
    if input.has_chf {
        points += 1;
    }
    if input.has_hypertension {
        points += 1;
    }
    if input.age >= 75 {
        points += 2;
    } else if input.age >= 65 {
        points += 1;
    }
    if input.has_diabetes {
        points += 1;
    }
    if input.has_stroke_history {
        points += 2;
    }
    if input.has_vascular_disease {
        points += 1;
    }
    if input.sex == Sex::Female {
        points += 1;
    }
    points
}

/// Full CHA2DS2-VASc report.
pub fn calculate(input: &ChadsVascInput) -> ScoreReport {
    let total = total_points(input);
    let capped = usize::from(total).min(ANNUAL_STROKE_RISK_PCT.len() - 1);
    let stroke_risk = ANNUAL_STROKE_RISK_PCT[capped];

    let sex_point_only = total == 1 && input.sex == Sex::Female;

    let mut notes = Vec::new();
    if input.has_chf {
        notes.push("Congestive heart failure (+1)".to_string());
    }
    if input.has_hypertension {
        notes.push("Hypertension (+1)".to_string());
    }
    if input.age >= 75 {
        notes.push("Age 75 or over (+2)".to_string());
    } else if input.age >= 65 {
        notes.push("Age 65 to 74 (+1)".to_string());
    }
    if input.has_diabetes {
        notes.push("Diabetes mellitus (+1)".to_string());
    }
    if input.has_stroke_history {
        notes.push("Prior stroke or TIA (+2)".to_string());
    }
    if input.has_vascular_disease {
        notes.push("Vascular disease (+1)".to_string());
    }
    if input.sex == Sex::Female {
        notes.push("Female sex (+1)".to_string());
    }

    let (category, recommendations) = if total == 0 || sex_point_only {
        let mut recs = vec!["No anticoagulation indicated at this score.".to_string()];
        if sex_point_only {
            recs.push(
                "The single point derives from female sex alone; manage as low risk."
                    .to_string(),
            );
        }
        recs.push("Reassess when new risk factors appear.".to_string());
        (RiskCategory::Low, recs)
    } else if total == 1 {
        (
            RiskCategory::Moderate,
            vec![
                "Consider oral anticoagulation after discussing stroke and bleeding risk."
                    .to_string(),
                "A direct oral anticoagulant is preferred over warfarin when \
                 anticoagulation is chosen."
                    .to_string(),
            ],
        )
    } else {
        (
            RiskCategory::High,
            vec![
                "Oral anticoagulation recommended.".to_string(),
                "Prefer a direct oral anticoagulant over warfarin in the absence of \
                 contraindications."
                    .to_string(),
                "Assess bleeding risk to identify modifiable factors before starting."
                    .to_string(),
            ],
        )
    };

    ScoreReport {
        score_type: ScoreType::ChadsVasc,
        score: f64::from(total),
        risk_percentage: stroke_risk,
        category,
        recommendations,
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::ChadsVasc(ChadsVascDetail {
            total_points: total,
            annual_stroke_risk_pct: stroke_risk,
            clinical_notes: notes,
        }),
    }
}
