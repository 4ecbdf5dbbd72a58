//! Coronary artery calcium (Agatston) interpretation.
//!
//! Six fixed Agatston bands map to a risk category, a reference 10-year
//! MACE rate and an escalating recommendation list. A supplied population
//! percentile can upgrade a low interpretation and adds notes at the
//! extremes; the companion [`estimate_percentile`] helper is a simplified
//! log-normal approximation for callers whose imaging report lacks one.

use chrono::Utc;

use crate::models::enums::{Race, RiskCategory, ScoreType, Sex};
use crate::models::inputs::CacScoreInput;
use crate::models::results::{CacDetail, ScoreDetail, ScoreReport};

use super::bands::{band, find_band, Band};

// ---------------------------------------------------------------------------
// Agatston bands
// ---------------------------------------------------------------------------

struct AgatstonBand {
    label: &'static str,
    category: RiskCategory,
    /// Reference 10-year MACE rate for the band.
    mace_ten_year_pct: f64,
    recommendations: &'static [&'static str],
}

const AGATSTON_BANDS: &[Band<AgatstonBand>] = &[
    band(
        0.0,
        AgatstonBand {
            label: "no detectable calcified plaque",
            category: RiskCategory::VeryLow,
            mace_ten_year_pct: 1.1,
            recommendations: &[
                "No coronary calcium detected; no systematic statin therapy indicated.",
                "Maintain lifestyle measures; reassess calcium score in 5 to 10 years.",
            ],
        },
    ),
    band(
        1.0,
        AgatstonBand {
            label: "minimal calcified plaque",
            category: RiskCategory::Low,
            mace_ten_year_pct: 1.9,
            recommendations: &[
                "Minimal plaque burden; emphasize lifestyle risk-factor control.",
                "Consider moderate-intensity statin if risk enhancers are present.",
                "Reassess calcium score in 3 to 5 years.",
            ],
        },
    ),
    band(
        11.0,
        AgatstonBand {
            label: "mild calcified plaque",
            category: RiskCategory::Moderate,
            mace_ten_year_pct: 4.6,
            recommendations: &[
                "Moderate-intensity statin therapy is reasonable.",
                "Treat to an LDL target below 100 mg/dL.",
                "Reinforce blood pressure and glycemic control.",
            ],
        },
    ),
    band(
        101.0,
        AgatstonBand {
            label: "moderate calcified plaque",
            category: RiskCategory::High,
            mace_ten_year_pct: 9.9,
            recommendations: &[
                "Moderate- to high-intensity statin therapy indicated.",
                "Treat to an LDL target below 100 mg/dL.",
                "Consider low-dose aspirin after weighing bleeding risk.",
                "Functional testing if symptoms are present.",
            ],
        },
    ),
    band(
        401.0,
        AgatstonBand {
            label: "extensive calcified plaque",
            category: RiskCategory::VeryHigh,
            mace_ten_year_pct: 16.4,
            recommendations: &[
                "High-intensity statin therapy indicated.",
                "Treat to an LDL target below 70 mg/dL.",
                "Consider low-dose aspirin after weighing bleeding risk.",
                "Consider stress imaging to assess for silent ischemia.",
            ],
        },
    ),
    band(
        1001.0,
        AgatstonBand {
            label: "severe calcified plaque",
            category: RiskCategory::VeryHigh,
            mace_ten_year_pct: 26.2,
            recommendations: &[
                "High-intensity statin therapy indicated.",
                "Treat to an LDL target below 70 mg/dL.",
                "Consider low-dose aspirin after weighing bleeding risk.",
                "Cardiology referral; angiography if symptomatic or ischemia is \
                 demonstrated on functional testing.",
            ],
        },
    ),
];

/// Percentile at or above which a low interpretation is upgraded.
const UPGRADE_PERCENTILE: f64 = 75.0;

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// Interpret an Agatston score into a banded report.
pub fn interpret(input: &CacScoreInput) -> ScoreReport {
    let score = input.agatston_score.max(0.0);
    let selected = find_band(AGATSTON_BANDS, score);

    let mut category = selected.category;
    let mut notes = vec![format!(
        "Agatston {score:.0}: {} (reference 10-year MACE {:.1}%).",
        selected.label, selected.mace_ten_year_pct
    )];
    let mut recommendations: Vec<String> =
        selected.recommendations.iter().map(|r| (*r).to_string()).collect();

    if let Some(pct) = input.percentile {
        if pct >= UPGRADE_PERCENTILE {
            if category == RiskCategory::Low {
                category = RiskCategory::Moderate;
                recommendations.push(
                    "Percentile-adjusted interpretation: manage as intermediate risk \
                     despite the low absolute score."
                        .to_string(),
                );
            }
            notes.push(format!(
                "Score is at the {pct:.0}th percentile for age and sex; plaque burden \
                 is high relative to peers."
            ));
        } else if pct < 25.0 {
            notes.push(format!(
                "Score is at the {pct:.0}th percentile for age and sex; plaque burden \
                 is low relative to peers."
            ));
        }
    }

    if score > 0.0 && input.age < 45 {
        notes.push(
            "Any coronary calcium before age 45 indicates premature atherosclerosis; \
             aggressive risk-factor control advised."
                .to_string(),
        );
    }
    if score == 0.0 && input.age > 75 {
        notes.push(
            "Absence of coronary calcium after age 75 carries a favorable prognosis."
                .to_string(),
        );
    }

    ScoreReport {
        score_type: ScoreType::Cac,
        score,
        risk_percentage: selected.mace_ten_year_pct,
        category,
        recommendations,
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Cac(CacDetail {
            agatston_score: score,
            percentile: input.percentile,
            mace_ten_year_pct: selected.mace_ten_year_pct,
            clinical_notes: notes,
        }),
    }
}

// ---------------------------------------------------------------------------
// Percentile estimator
// ---------------------------------------------------------------------------

/// Estimate the population percentile of an Agatston score from
/// demographics.
///
/// A simplified log-normal model: the expected log-score location rises
/// with age, women lag men by roughly eight years, and African-American
/// cohorts carry a slightly lower median burden. The normal CDF is
/// approximated by the logistic function. This is a coarse screening aid,
/// not a substitute for a cohort-derived percentile from the imaging
/// report.
pub fn estimate_percentile(agatston_score: f64, age: u32, sex: Sex, race: Option<Race>) -> f64 {
    const SLOPE_PER_YEAR: f64 = 0.11;
    const ONSET_AGE: f64 = 35.0;
    const FEMALE_LAG_YEARS: f64 = 8.0;
    const AFRICAN_AMERICAN_LOCATION: f64 = 0.85;
    const SIGMA: f64 = 1.6;

    let effective_age = match sex {
        Sex::Male => f64::from(age),
        Sex::Female => f64::from(age) - FEMALE_LAG_YEARS,
    };
    let mut location = SLOPE_PER_YEAR * (effective_age - ONSET_AGE).max(0.0);
    if race == Some(Race::AfricanAmerican) {
        location *= AFRICAN_AMERICAN_LOCATION;
    }

    let z = ((agatston_score.max(0.0) + 1.0).ln() - location) / SIGMA;
    let cdf = 1.0 / (1.0 + (-1.702 * z).exp());
    (cdf * 100.0).clamp(0.0, 100.0)
}
