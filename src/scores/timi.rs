//! TIMI risk score for unstable angina / NSTEMI.
//!
//! Seven independent one-point predictors map the total to the published
//! 14-day composite event rate (death, MI, urgent revascularization) and a
//! management strategy tier.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType};
use crate::models::inputs::TimiRiskInput;
use crate::models::results::{ScoreDetail, ScoreReport, TimiDetail};

/// Published 14-day event rates indexed by score (0-7).
const EVENT_RISK_14_DAY_PCT: [f64; 8] = [4.7, 4.7, 8.3, 13.2, 19.9, 26.2, 40.9, 40.9];

/// Sum of the TIMI predictors.
pub fn total_points(input: &TimiRiskInput) -> u8 {
    [
        input.age_over_65,
        input.has_three_cad_risk_factors,
        input.has_known_cad,
        input.uses_aspirin,
        input.has_severe_angina,
        input.has_st_deviation,
        input.has_elevated_markers,
    ]
    .iter()
    .filter(|&&flag| flag)
    .count() as u8
}

fn factor_notes(input: &TimiRiskInput) -> Vec<String> {
    let factors: [(bool, &str); 7] = [
        (input.age_over_65, "Age 65 or over"),
        (input.has_three_cad_risk_factors, "Three or more CAD risk factors"),
        (input.has_known_cad, "Known coronary stenosis of 50% or more"),
        (input.uses_aspirin, "Aspirin use in the last 7 days"),
        (input.has_severe_angina, "Severe angina in the last 24 hours"),
        (input.has_st_deviation, "ST deviation of 0.5 mm or more"),
        (input.has_elevated_markers, "Elevated cardiac markers"),
    ];
    factors
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, label)| format!("{label} (+1)"))
        .collect()
}

/// Full TIMI report.
pub fn calculate(input: &TimiRiskInput) -> ScoreReport {
    let total = total_points(input);
    let event_risk = EVENT_RISK_14_DAY_PCT[usize::from(total).min(7)];

    let (category, recommendations) = match total {
        0..=2 => (
            RiskCategory::Low,
            vec![
                "Conservative strategy: medical management with ischemia-guided \
                 escalation."
                    .to_string(),
                "Serial ECG and troponin; stress testing before discharge."
                    .to_string(),
            ],
        ),
        3 | 4 => (
            RiskCategory::Moderate,
            vec![
                "Early invasive strategy: angiography within 24 to 72 hours."
                    .to_string(),
                "Start dual antiplatelet therapy and anticoagulation per protocol."
                    .to_string(),
            ],
        ),
        _ => (
            RiskCategory::High,
            vec![
                "Urgent invasive strategy: angiography as soon as feasible."
                    .to_string(),
                "Aggressive medical stabilization while awaiting catheterization."
                    .to_string(),
            ],
        ),
    };

    ScoreReport {
        score_type: ScoreType::Timi,
        score: f64::from(total),
        risk_percentage: event_risk,
        category,
        recommendations,
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Timi(TimiDetail {
            total_points: total,
            event_risk_14_day_pct: event_risk,
            clinical_notes: factor_notes(input),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> TimiRiskInput {
        TimiRiskInput {
            age_over_65: false,
            has_three_cad_risk_factors: false,
            has_known_cad: false,
            uses_aspirin: false,
            has_severe_angina: false,
            has_st_deviation: false,
            has_elevated_markers: false,
        }
    }

    #[test]
    fn total_is_literal_flag_count() {
        assert_eq!(total_points(&empty()), 0);

        let mut four = empty();
        four.age_over_65 = true;
        four.uses_aspirin = true;
        four.has_st_deviation = true;
        four.has_elevated_markers = true;
        assert_eq!(total_points(&four), 4);
    }

    #[test]
    fn published_event_rates_by_score() {
        assert_eq!(calculate(&empty()).risk_percentage, 4.7);

        let mut two = empty();
        two.age_over_65 = true;
        two.uses_aspirin = true;
        assert_eq!(calculate(&two).risk_percentage, 8.3);

        let mut five = empty();
        five.age_over_65 = true;
        five.has_three_cad_risk_factors = true;
        five.has_known_cad = true;
        five.has_severe_angina = true;
        five.has_st_deviation = true;
        assert_eq!(calculate(&five).risk_percentage, 26.2);
    }

    #[test]
    fn strategy_tiers() {
        let mut two = empty();
        two.age_over_65 = true;
        two.uses_aspirin = true;
        let low = calculate(&two);
        assert_eq!(low.category, RiskCategory::Low);
        assert!(low.recommendations[0].contains("Conservative"));

        let mut three = two.clone();
        three.has_st_deviation = true;
        let moderate = calculate(&three);
        assert_eq!(moderate.category, RiskCategory::Moderate);
        assert!(moderate.recommendations[0].contains("Early invasive"));

        let mut six = three.clone();
        six.has_known_cad = true;
        six.has_severe_angina = true;
        six.has_elevated_markers = true;
        let high = calculate(&six);
        assert_eq!(high.score, 6.0);
        assert_eq!(high.risk_percentage, 40.9);
        assert_eq!(high.category, RiskCategory::High);
        assert!(high.recommendations[0].contains("Urgent invasive"));
    }

    #[test]
    fn notes_name_each_present_factor() {
        let mut some = empty();
        some.has_known_cad = true;
        some.has_elevated_markers = true;
        let report = calculate(&some);
        match report.detail {
            ScoreDetail::Timi(ref d) => {
                assert_eq!(
                    d.clinical_notes,
                    vec![
                        "Known coronary stenosis of 50% or more (+1)".to_string(),
                        "Elevated cardiac markers (+1)".to_string(),
                    ]
                );
            }
            ref other => panic!("wrong detail variant: {other:?}"),
        }
    }
}
