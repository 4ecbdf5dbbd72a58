//! ASCVD 10-year risk, 2013 ACC/AHA Pooled Cohort Equations.
//!
//! A log-linear hazard model with four coefficient sets keyed by sex and
//! race. The equations are validated for ages 40-79; outside that window
//! the calculator returns a sentinel report (score -1, explanatory message)
//! rather than an error, so composed call sites never have to branch on a
//! failure path.

use chrono::Utc;

use crate::models::enums::{Race, RiskCategory, ScoreType, Sex};
use crate::models::patient::PatientRiskData;
use crate::models::results::{AscvdDetail, ScoreDetail, ScoreReport};

use super::bands::{band, clamp_percentage, find_band, Band};
use super::framingham;
use super::recommendations::{risk_factor_guidance, GuidanceTemplates};

/// Validated age window for the Pooled Cohort Equations.
pub const MIN_AGE: u32 = 40;
pub const MAX_AGE: u32 = 79;

/// Sentinel score reported when age falls outside the validated window.
pub const NOT_APPLICABLE_SCORE: f64 = -1.0;

// ---------------------------------------------------------------------------
// Pooled Cohort coefficient sets
// ---------------------------------------------------------------------------

/// One sex/race coefficient set. Terms absent from a published set are zero.
struct PceCoefficients {
    ln_age: f64,
    ln_age_squared: f64,
    ln_total_chol: f64,
    ln_age_x_total_chol: f64,
    ln_hdl: f64,
    ln_age_x_hdl: f64,
    ln_sbp_treated: f64,
    ln_age_x_sbp_treated: f64,
    ln_sbp_untreated: f64,
    ln_age_x_sbp_untreated: f64,
    smoker: f64,
    ln_age_x_smoker: f64,
    diabetes: f64,
    /// Mean of the coefficient-value products in the derivation cohort.
    mean_terms: f64,
    /// Baseline 10-year survival.
    baseline_survival: f64,
}

const WHITE_MALE: PceCoefficients = PceCoefficients {
    ln_age: 12.344,
    ln_age_squared: 0.0,
    ln_total_chol: 11.853,
    ln_age_x_total_chol: -2.664,
    ln_hdl: -7.990,
    ln_age_x_hdl: 1.769,
    ln_sbp_treated: 1.797,
    ln_age_x_sbp_treated: 0.0,
    ln_sbp_untreated: 1.764,
    ln_age_x_sbp_untreated: 0.0,
    smoker: 7.837,
    ln_age_x_smoker: -1.795,
    diabetes: 0.658,
    mean_terms: 61.18,
    baseline_survival: 0.9144,
};

const WHITE_FEMALE: PceCoefficients = PceCoefficients {
    ln_age: -29.799,
    ln_age_squared: 4.884,
    ln_total_chol: 13.540,
    ln_age_x_total_chol: -3.114,
    ln_hdl: -13.578,
    ln_age_x_hdl: 3.149,
    ln_sbp_treated: 2.019,
    ln_age_x_sbp_treated: 0.0,
    ln_sbp_untreated: 1.957,
    ln_age_x_sbp_untreated: 0.0,
    smoker: 7.574,
    ln_age_x_smoker: -1.665,
    diabetes: 0.661,
    mean_terms: -29.18,
    baseline_survival: 0.9665,
};

const AFRICAN_AMERICAN_MALE: PceCoefficients = PceCoefficients {
    ln_age: 2.469,
    ln_age_squared: 0.0,
    ln_total_chol: 0.302,
    ln_age_x_total_chol: 0.0,
    ln_hdl: -0.307,
    ln_age_x_hdl: 0.0,
    ln_sbp_treated: 1.916,
    ln_age_x_sbp_treated: 0.0,
    ln_sbp_untreated: 1.809,
    ln_age_x_sbp_untreated: 0.0,
    smoker: 0.549,
    ln_age_x_smoker: 0.0,
    diabetes: 0.645,
    mean_terms: 19.54,
    baseline_survival: 0.8954,
};

const AFRICAN_AMERICAN_FEMALE: PceCoefficients = PceCoefficients {
    ln_age: 17.114,
    ln_age_squared: 0.0,
    ln_total_chol: 0.940,
    ln_age_x_total_chol: 0.0,
    ln_hdl: -18.920,
    ln_age_x_hdl: 4.475,
    ln_sbp_treated: 29.291,
    ln_age_x_sbp_treated: -6.432,
    ln_sbp_untreated: 27.820,
    ln_age_x_sbp_untreated: -6.087,
    smoker: 0.691,
    ln_age_x_smoker: 0.0,
    diabetes: 0.874,
    mean_terms: 86.61,
    baseline_survival: 0.9533,
};

const CATEGORY_BANDS: &[Band<RiskCategory>] = &[
    band(0.0, RiskCategory::Low),
    band(5.0, RiskCategory::Borderline),
    band(7.5, RiskCategory::Moderate),
    band(20.0, RiskCategory::High),
];

fn coefficients_for(sex: Sex, race: Option<Race>) -> &'static PceCoefficients {
    // Missing race data falls back to the white set.
    match (sex, race.unwrap_or(Race::White)) {
        (Sex::Male, Race::White) => &WHITE_MALE,
        (Sex::Female, Race::White) => &WHITE_FEMALE,
        (Sex::Male, Race::AfricanAmerican) => &AFRICAN_AMERICAN_MALE,
        (Sex::Female, Race::AfricanAmerican) => &AFRICAN_AMERICAN_FEMALE,
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

fn log_hazard_sum(c: &PceCoefficients, data: &PatientRiskData) -> f64 {
    let ln_age = f64::from(data.age).ln();
    let ln_tc = data.total_cholesterol.ln();
    let ln_hdl = data.hdl_cholesterol.ln();
    let ln_sbp = data.systolic_bp.ln();
    let smoker = if data.is_smoker { 1.0 } else { 0.0 };
    let diabetes = if data.has_diabetes { 1.0 } else { 0.0 };
    let (sbp, age_x_sbp) = if data.on_bp_medication {
        (c.ln_sbp_treated, c.ln_age_x_sbp_treated)
    } else {
        (c.ln_sbp_untreated, c.ln_age_x_sbp_untreated)
    };

    c.ln_age * ln_age
        + c.ln_age_squared * ln_age * ln_age
        + c.ln_total_chol * ln_tc
        + c.ln_age_x_total_chol * ln_age * ln_tc
        + c.ln_hdl * ln_hdl
        + c.ln_age_x_hdl * ln_age * ln_hdl
        + sbp * ln_sbp
        + age_x_sbp * ln_age * ln_sbp
        + c.smoker * smoker
        + c.ln_age_x_smoker * ln_age * smoker
        + c.diabetes * diabetes
}

/// Pooled Cohort 10-year risk percentage, clamped into [0, 100].
pub fn ten_year_risk_pct(data: &PatientRiskData) -> f64 {
    let c = coefficients_for(data.sex, data.race);
    let sum = log_hazard_sum(c, data);
    let risk = 1.0 - c.baseline_survival.powf((sum - c.mean_terms).exp());
    clamp_percentage(risk * 100.0)
}

/// Additive lifetime-risk heuristic: 30% baseline plus penalties for the
/// major modifiable factors, capped at 80%. Not the Pooled Cohort method.
pub fn lifetime_risk_pct(data: &PatientRiskData) -> f64 {
    let mut risk: f64 = 30.0;
    if data.is_smoker {
        risk += 10.0;
    }
    if data.has_diabetes {
        risk += 15.0;
    }
    if data.systolic_bp > 140.0 {
        risk += 10.0;
    }
    if data.total_cholesterol > 240.0 {
        risk += 5.0;
    }
    if data.hdl_cholesterol < 40.0 {
        risk += 5.0;
    }
    risk.min(80.0)
}

/// Framingham 10-year risk recomputed at ideal reference values
/// (cholesterol 170, HDL 60, systolic 110, non-smoker). Diabetes is left as
/// found since it is not a modifiable reference value.
pub fn optimal_risk_pct(data: &PatientRiskData) -> f64 {
    let mut ideal = data.clone();
    ideal.total_cholesterol = 170.0;
    ideal.hdl_cholesterol = 60.0;
    ideal.systolic_bp = 110.0;
    ideal.is_smoker = false;
    ideal.on_bp_medication = false;
    let points = framingham::total_points(&ideal);
    framingham::ten_year_risk_pct(ideal.sex, points)
}

fn statin_guidance(risk_pct: f64, ldl: Option<f64>) -> Vec<String> {
    let mut guidance = Vec::new();
    if risk_pct >= 20.0 {
        guidance.push(GuidanceTemplates::statin_high_intensity());
    } else if risk_pct >= 7.5 {
        guidance.push(GuidanceTemplates::statin_moderate_to_high());
    } else if risk_pct >= 5.0 {
        guidance.push(GuidanceTemplates::statin_shared_decision());
    }
    if let Some(ldl) = ldl {
        if risk_pct >= 20.0 && ldl > 70.0 {
            guidance.push(GuidanceTemplates::ldl_target(ldl, 70));
        } else if risk_pct >= 7.5 && ldl > 100.0 {
            guidance.push(GuidanceTemplates::ldl_target(ldl, 100));
        }
    }
    guidance
}

/// Full ASCVD report for a patient.
pub fn calculate(data: &PatientRiskData) -> ScoreReport {
    if !(MIN_AGE..=MAX_AGE).contains(&data.age) {
        return not_applicable(data);
    }

    let risk_pct = ten_year_risk_pct(data);
    let category = *find_band(CATEGORY_BANDS, risk_pct);

    let mut recommendations = risk_factor_guidance(data, category, risk_pct);
    recommendations.extend(statin_guidance(risk_pct, data.ldl_cholesterol));

    ScoreReport {
        score_type: ScoreType::Ascvd,
        score: risk_pct,
        risk_percentage: risk_pct,
        category,
        recommendations: recommendations.into_vec(),
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Ascvd(AscvdDetail {
            applicable: true,
            lifetime_risk_pct: lifetime_risk_pct(data),
            optimal_risk_pct: optimal_risk_pct(data),
        }),
    }
}

fn not_applicable(data: &PatientRiskData) -> ScoreReport {
    ScoreReport {
        score_type: ScoreType::Ascvd,
        score: NOT_APPLICABLE_SCORE,
        risk_percentage: 0.0,
        category: RiskCategory::Low,
        recommendations: vec![
            format!(
                "ASCVD risk is validated for ages {MIN_AGE}-{MAX_AGE}; not calculated for age {}.",
                data.age
            ),
            GuidanceTemplates::healthy_living(),
        ],
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Ascvd(AscvdDetail {
            applicable: false,
            lifetime_risk_pct: lifetime_risk_pct(data),
            optimal_risk_pct: optimal_risk_pct(data),
        }),
    }
}
