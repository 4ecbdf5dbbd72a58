//! Framingham 10-year coronary risk, ATP III point tables.
//!
//! Five independently tabulated contributions (age, total cholesterol,
//! smoking, HDL, systolic BP) sum to a point total that maps through a
//! sex-specific table to a 10-year risk percentage. Tables are transcribed
//! from the NCEP ATP III risk assessment worksheets.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType, Sex};
use crate::models::patient::PatientRiskData;
use crate::models::results::{FraminghamDetail, ScoreDetail, ScoreReport};

use super::bands::{band, clamp_percentage, find_band, Band};
use super::recommendations::risk_factor_guidance;

// ---------------------------------------------------------------------------
// Point tables
// ---------------------------------------------------------------------------

const MALE_AGE_POINTS: &[Band<i32>] = &[
    band(20.0, -9),
    band(35.0, -4),
    band(40.0, 0),
    band(45.0, 3),
    band(50.0, 6),
    band(55.0, 8),
    band(60.0, 10),
    band(65.0, 11),
    band(70.0, 12),
    band(75.0, 13),
];

const FEMALE_AGE_POINTS: &[Band<i32>] = &[
    band(20.0, -7),
    band(35.0, -3),
    band(40.0, 0),
    band(45.0, 3),
    band(50.0, 6),
    band(55.0, 8),
    band(60.0, 10),
    band(65.0, 12),
    band(70.0, 14),
    band(75.0, 16),
];

// Cholesterol points decay with age: outer bands select the age decade,
// inner bands the total-cholesterol range (mg/dL).
const MALE_CHOLESTEROL_POINTS: &[Band<&[Band<i32>]>] = &[
    band(
        20.0,
        &[band(0.0, 0), band(160.0, 4), band(200.0, 7), band(240.0, 9), band(280.0, 11)],
    ),
    band(
        40.0,
        &[band(0.0, 0), band(160.0, 3), band(200.0, 5), band(240.0, 6), band(280.0, 8)],
    ),
    band(
        50.0,
        &[band(0.0, 0), band(160.0, 2), band(200.0, 3), band(240.0, 4), band(280.0, 5)],
    ),
    band(
        60.0,
        &[band(0.0, 0), band(160.0, 1), band(200.0, 1), band(240.0, 2), band(280.0, 3)],
    ),
    band(
        70.0,
        &[band(0.0, 0), band(160.0, 0), band(200.0, 0), band(240.0, 1), band(280.0, 1)],
    ),
];

const FEMALE_CHOLESTEROL_POINTS: &[Band<&[Band<i32>]>] = &[
    band(
        20.0,
        &[band(0.0, 0), band(160.0, 4), band(200.0, 8), band(240.0, 11), band(280.0, 13)],
    ),
    band(
        40.0,
        &[band(0.0, 0), band(160.0, 3), band(200.0, 6), band(240.0, 8), band(280.0, 10)],
    ),
    band(
        50.0,
        &[band(0.0, 0), band(160.0, 2), band(200.0, 4), band(240.0, 5), band(280.0, 7)],
    ),
    band(
        60.0,
        &[band(0.0, 0), band(160.0, 1), band(200.0, 2), band(240.0, 3), band(280.0, 4)],
    ),
    band(
        70.0,
        &[band(0.0, 0), band(160.0, 1), band(200.0, 1), band(240.0, 2), band(280.0, 2)],
    ),
];

const MALE_SMOKING_POINTS: &[Band<i32>] = &[
    band(20.0, 8),
    band(40.0, 5),
    band(50.0, 3),
    band(60.0, 1),
    band(70.0, 1),
];

const FEMALE_SMOKING_POINTS: &[Band<i32>] = &[
    band(20.0, 9),
    band(40.0, 7),
    band(50.0, 4),
    band(60.0, 2),
    band(70.0, 1),
];

// HDL points are shared by both sexes.
const HDL_POINTS: &[Band<i32>] = &[band(0.0, 2), band(40.0, 1), band(50.0, 0), band(60.0, -1)];

const MALE_SBP_UNTREATED: &[Band<i32>] =
    &[band(0.0, 0), band(120.0, 0), band(130.0, 1), band(140.0, 1), band(160.0, 2)];
const MALE_SBP_TREATED: &[Band<i32>] =
    &[band(0.0, 0), band(120.0, 1), band(130.0, 2), band(140.0, 2), band(160.0, 3)];
const FEMALE_SBP_UNTREATED: &[Band<i32>] =
    &[band(0.0, 0), band(120.0, 1), band(130.0, 2), band(140.0, 3), band(160.0, 4)];
const FEMALE_SBP_TREATED: &[Band<i32>] =
    &[band(0.0, 0), band(120.0, 3), band(130.0, 4), band(140.0, 5), band(160.0, 6)];

// Point total to 10-year risk percentage. Totals beyond either end clamp
// to the nearest tabulated risk.
const MALE_POINTS_TO_RISK: &[Band<f64>] = &[
    band(f64::NEG_INFINITY, 1.0),
    band(5.0, 2.0),
    band(7.0, 3.0),
    band(8.0, 4.0),
    band(9.0, 5.0),
    band(10.0, 6.0),
    band(11.0, 8.0),
    band(12.0, 10.0),
    band(13.0, 12.0),
    band(14.0, 16.0),
    band(15.0, 20.0),
    band(16.0, 25.0),
    band(17.0, 30.0),
];

const FEMALE_POINTS_TO_RISK: &[Band<f64>] = &[
    band(f64::NEG_INFINITY, 1.0),
    band(13.0, 2.0),
    band(15.0, 3.0),
    band(16.0, 4.0),
    band(17.0, 5.0),
    band(18.0, 6.0),
    band(19.0, 8.0),
    band(20.0, 11.0),
    band(21.0, 14.0),
    band(22.0, 17.0),
    band(23.0, 22.0),
    band(24.0, 27.0),
    band(25.0, 30.0),
];

const CATEGORY_BANDS: &[Band<RiskCategory>] = &[
    band(0.0, RiskCategory::Low),
    band(5.0, RiskCategory::Moderate),
    band(10.0, RiskCategory::High),
    band(20.0, RiskCategory::VeryHigh),
];

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Sum the five point contributions for a patient.
pub fn total_points(data: &PatientRiskData) -> i32 {
    let age = f64::from(data.age);

    let (age_table, chol_table, smoking_table) = match data.sex {
        Sex::Male => (MALE_AGE_POINTS, MALE_CHOLESTEROL_POINTS, MALE_SMOKING_POINTS),
        Sex::Female => (FEMALE_AGE_POINTS, FEMALE_CHOLESTEROL_POINTS, FEMALE_SMOKING_POINTS),
    };
    let sbp_table = match (data.sex, data.on_bp_medication) {
        (Sex::Male, false) => MALE_SBP_UNTREATED,
        (Sex::Male, true) => MALE_SBP_TREATED,
        (Sex::Female, false) => FEMALE_SBP_UNTREATED,
        (Sex::Female, true) => FEMALE_SBP_TREATED,
    };

    let age_points = *find_band(age_table, age);
    let chol_points = *find_band(*find_band(chol_table, age), data.total_cholesterol);
    let smoking_points = if data.is_smoker {
        *find_band(smoking_table, age)
    } else {
        0
    };
    let hdl_points = *find_band(HDL_POINTS, data.hdl_cholesterol);
    let sbp_points = *find_band(sbp_table, data.systolic_bp);

    age_points + chol_points + smoking_points + hdl_points + sbp_points
}

/// Map a point total to the tabulated 10-year risk percentage.
pub fn ten_year_risk_pct(sex: Sex, points: i32) -> f64 {
    let table = match sex {
        Sex::Male => MALE_POINTS_TO_RISK,
        Sex::Female => FEMALE_POINTS_TO_RISK,
    };
    clamp_percentage(*find_band(table, f64::from(points)))
}

/// Vascular age estimate: 30 plus two years per point, never younger than
/// the patient and never above 85.
fn heart_age(age: u32, points: i32) -> u32 {
    let raw = 30 + 2 * points;
    let upper = 85.max(age as i32);
    raw.clamp(age as i32, upper) as u32
}

/// Full Framingham report for a patient.
pub fn calculate(data: &PatientRiskData) -> ScoreReport {
    let points = total_points(data);
    let risk_pct = ten_year_risk_pct(data.sex, points);
    let category = *find_band(CATEGORY_BANDS, risk_pct);
    let recommendations = risk_factor_guidance(data, category, risk_pct).into_vec();

    ScoreReport {
        score_type: ScoreType::Framingham,
        score: f64::from(points),
        risk_percentage: risk_pct,
        category,
        recommendations,
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Framingham(FraminghamDetail {
            total_points: points,
            ten_year_risk_pct: risk_pct,
            heart_age: heart_age(data.age, points),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(age: u32, sex: Sex, chol: f64, hdl: f64, sbp: f64) -> PatientRiskData {
        PatientRiskData {
            age,
            sex,
            race: None,
            total_cholesterol: chol,
            hdl_cholesterol: hdl,
            ldl_cholesterol: None,
            systolic_bp: sbp,
            diastolic_bp: None,
            is_smoker: false,
            has_diabetes: false,
            on_bp_medication: false,
            has_hypertension: None,
            family_history_cvd: None,
            bmi: None,
        }
    }

    // --- Point arithmetic against the ATP III worksheets ---

    #[test]
    fn young_healthy_male_point_contributions_cancel() {
        // Age 35: -4, chol 180 at 20-39: +4, HDL 55: 0, SBP 120 untreated: 0.
        let data = patient(35, Sex::Male, 180.0, 55.0, 120.0);
        assert_eq!(total_points(&data), 0);
    }

    #[test]
    fn male_point_sum_with_all_contributions() {
        // Age 61 (+10), chol 180 at 60-69 (+1), smoker at 60-69 (+1),
        // HDL 47 (+1), SBP 124 untreated (0) = 13 points.
        let mut data = patient(61, Sex::Male, 180.0, 47.0, 124.0);
        data.is_smoker = true;
        assert_eq!(total_points(&data), 13);
        assert_eq!(ten_year_risk_pct(Sex::Male, 13), 12.0);
    }

    #[test]
    fn female_point_sum_with_all_contributions() {
        // Age 61 (+10), chol 180 at 60-69 (+1), smoker at 60-69 (+2),
        // HDL 47 (+1), SBP 124 untreated (+1) = 15 points -> 3%.
        let mut data = patient(61, Sex::Female, 180.0, 47.0, 124.0);
        data.is_smoker = true;
        assert_eq!(total_points(&data), 15);
        assert_eq!(ten_year_risk_pct(Sex::Female, 15), 3.0);
    }

    #[test]
    fn treated_bp_scores_higher_than_untreated() {
        let untreated = patient(55, Sex::Female, 200.0, 50.0, 145.0);
        let mut treated = untreated.clone();
        treated.on_bp_medication = true;
        assert!(total_points(&treated) > total_points(&untreated));
    }

    #[test]
    fn high_hdl_subtracts_a_point() {
        let low_hdl = patient(50, Sex::Male, 200.0, 35.0, 120.0);
        let high_hdl = patient(50, Sex::Male, 200.0, 65.0, 120.0);
        assert_eq!(total_points(&low_hdl) - total_points(&high_hdl), 3);
    }

    // --- Risk table lookups ---

    #[test]
    fn points_to_risk_clamps_at_both_ends() {
        assert_eq!(ten_year_risk_pct(Sex::Male, -20), 1.0);
        assert_eq!(ten_year_risk_pct(Sex::Male, 30), 30.0);
        assert_eq!(ten_year_risk_pct(Sex::Female, 8), 1.0);
        assert_eq!(ten_year_risk_pct(Sex::Female, 40), 30.0);
    }

    #[test]
    fn female_risk_table_differs_from_male() {
        assert_eq!(ten_year_risk_pct(Sex::Male, 14), 16.0);
        assert_eq!(ten_year_risk_pct(Sex::Female, 14), 2.0);
    }

    // --- Reports ---

    #[test]
    fn young_healthy_male_is_low_risk() {
        let report = calculate(&patient(35, Sex::Male, 180.0, 55.0, 120.0));
        assert_eq!(report.category, RiskCategory::Low);
        assert!(report.risk_percentage < 5.0);
    }

    #[test]
    fn older_smoker_with_multiple_factors_is_very_high_risk() {
        let mut data = patient(65, Sex::Male, 280.0, 35.0, 160.0);
        data.is_smoker = true;
        data.has_diabetes = true;
        data.on_bp_medication = true;
        let report = calculate(&data);
        assert_eq!(report.category, RiskCategory::VeryHigh);
        assert!(report.risk_percentage > 20.0);
        let joined = report.recommendations.join("\n");
        assert!(joined.contains("Smoking cessation"));
        assert!(joined.contains("cardiology"));
    }

    #[test]
    fn risk_is_monotone_in_age_cholesterol_bp_and_smoking() {
        let base = patient(45, Sex::Male, 200.0, 45.0, 130.0);
        let base_risk = calculate(&base).risk_percentage;

        let mut older = base.clone();
        older.age = 60;
        assert!(calculate(&older).risk_percentage >= base_risk);

        let mut fattier = base.clone();
        fattier.total_cholesterol = 280.0;
        assert!(calculate(&fattier).risk_percentage >= base_risk);

        let mut pressured = base.clone();
        pressured.systolic_bp = 170.0;
        assert!(calculate(&pressured).risk_percentage >= base_risk);

        let mut smoking = base.clone();
        smoking.is_smoker = true;
        assert!(calculate(&smoking).risk_percentage >= base_risk);

        let mut better_hdl = base.clone();
        better_hdl.hdl_cholesterol = 65.0;
        assert!(calculate(&better_hdl).risk_percentage <= base_risk);
    }

    #[test]
    fn heart_age_never_below_actual_age() {
        // Age 35, -5 total points: raw estimate 20 clamps up to 35.
        let young = calculate(&patient(35, Sex::Male, 150.0, 65.0, 110.0));
        match young.detail {
            ScoreDetail::Framingham(ref d) => assert_eq!(d.heart_age, 35),
            ref other => panic!("wrong detail variant: {other:?}"),
        }
    }

    #[test]
    fn heart_age_tracks_points_and_stays_under_cap() {
        // Worst tabulated female: 27 points, estimate 30 + 54 = 84.
        let mut worst = patient(75, Sex::Female, 300.0, 30.0, 180.0);
        worst.is_smoker = true;
        worst.on_bp_medication = true;
        let report = calculate(&worst);
        match report.detail {
            ScoreDetail::Framingham(ref d) => {
                assert_eq!(d.heart_age, 84);
                assert!(d.heart_age <= 85);
            }
            ref other => panic!("wrong detail variant: {other:?}"),
        }
    }

    #[test]
    fn risk_percentage_always_within_bounds() {
        for age in [20, 35, 50, 65, 79] {
            for chol in [120.0, 200.0, 320.0] {
                for sbp in [100.0, 140.0, 200.0] {
                    for sex in [Sex::Male, Sex::Female] {
                        let mut data = patient(age, sex, chol, 45.0, sbp);
                        data.is_smoker = age % 2 == 1;
                        let report = calculate(&data);
                        assert!((0.0..=100.0).contains(&report.risk_percentage));
                    }
                }
            }
        }
    }
}
