//! GRACE in-hospital mortality score for acute coronary syndrome.
//!
//! Weighted contributions from age, heart rate, systolic BP (inverse),
//! creatinine and Killip class, plus fixed additions for cardiac arrest,
//! ST deviation and elevated markers. The continuous total maps through an
//! ordered threshold table to an in-hospital mortality estimate and a
//! three-tier management strategy.

use chrono::Utc;

use crate::models::enums::{RiskCategory, ScoreType};
use crate::models::inputs::GraceScoreInput;
use crate::models::results::{GraceDetail, ScoreDetail, ScoreReport};

use super::bands::{band, find_band, Band};

// ---------------------------------------------------------------------------
// Point tables
// ---------------------------------------------------------------------------

const AGE_POINTS: &[Band<u32>] = &[
    band(0.0, 0),
    band(30.0, 8),
    band(40.0, 25),
    band(50.0, 41),
    band(60.0, 58),
    band(70.0, 75),
    band(80.0, 91),
    band(90.0, 100),
];

const HEART_RATE_POINTS: &[Band<u32>] = &[
    band(0.0, 0),
    band(50.0, 3),
    band(70.0, 9),
    band(90.0, 15),
    band(110.0, 24),
    band(150.0, 38),
    band(200.0, 46),
];

// Lower pressure scores higher.
const SBP_POINTS: &[Band<u32>] = &[
    band(0.0, 58),
    band(80.0, 53),
    band(100.0, 43),
    band(120.0, 34),
    band(140.0, 24),
    band(160.0, 10),
    band(200.0, 0),
];

const CREATININE_POINTS: &[Band<u32>] = &[
    band(0.0, 1),
    band(0.4, 4),
    band(0.8, 7),
    band(1.2, 10),
    band(1.6, 13),
    band(2.0, 21),
    band(4.0, 28),
];

const CARDIAC_ARREST_POINTS: u32 = 39;
const ST_DEVIATION_POINTS: u32 = 28;
const ELEVATED_MARKERS_POINTS: u32 = 14;

struct GraceBand {
    category: RiskCategory,
    mortality_pct: f64,
    recommendations: &'static [&'static str],
}

const GRACE_BANDS: &[Band<GraceBand>] = &[
    band(
        0.0,
        GraceBand {
            category: RiskCategory::Low,
            mortality_pct: 0.9,
            recommendations: &[
                "Low risk; non-invasive evaluation and medical management are \
                 appropriate.",
                "Early discharge with outpatient follow-up may be considered.",
            ],
        },
    ),
    band(
        109.0,
        GraceBand {
            category: RiskCategory::Moderate,
            mortality_pct: 2.9,
            recommendations: &[
                "Intermediate risk; invasive evaluation within 72 hours.",
                "Continuous monitoring with serial cardiac markers.",
            ],
        },
    ),
    band(
        141.0,
        GraceBand {
            category: RiskCategory::High,
            mortality_pct: 7.5,
            recommendations: &[
                "High risk; urgent invasive strategy.",
                "Manage in a unit with catheterization capability.",
            ],
        },
    ),
    band(
        169.0,
        GraceBand {
            category: RiskCategory::High,
            mortality_pct: 14.0,
            recommendations: &[
                "High risk; urgent invasive strategy.",
                "Manage in a unit with catheterization capability.",
            ],
        },
    ),
    band(
        197.0,
        GraceBand {
            category: RiskCategory::VeryHigh,
            mortality_pct: 24.0,
            recommendations: &[
                "Very high risk; urgent invasive strategy.",
                "Intensive care monitoring; involve the heart team early.",
            ],
        },
    ),
];

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Sum of the banded contributions and fixed additions.
pub fn total_points(input: &GraceScoreInput) -> u32 {
    let mut points = *find_band(AGE_POINTS, f64::from(input.age))
        + *find_band(HEART_RATE_POINTS, input.heart_rate)
        + *find_band(SBP_POINTS, input.systolic_bp)
        + *find_band(CREATININE_POINTS, input.creatinine)
        + input.killip_class.grace_points();
    if input.cardiac_arrest_at_admission {
        points += CARDIAC_ARREST_POINTS;
    }
    if input.st_segment_deviation {
        points += ST_DEVIATION_POINTS;
    }
    if input.elevated_cardiac_markers {
        points += ELEVATED_MARKERS_POINTS;
    }
    points
}

/// Full GRACE report.
pub fn calculate(input: &GraceScoreInput) -> ScoreReport {
    let age_pts = *find_band(AGE_POINTS, f64::from(input.age));
    let hr_pts = *find_band(HEART_RATE_POINTS, input.heart_rate);
    let sbp_pts = *find_band(SBP_POINTS, input.systolic_bp);
    let creat_pts = *find_band(CREATININE_POINTS, input.creatinine);
    let killip_pts = input.killip_class.grace_points();

    let mut total = age_pts + hr_pts + sbp_pts + creat_pts + killip_pts;
    let mut notes = vec![
        format!("Age {}: +{age_pts}", input.age),
        format!("Heart rate {:.0} bpm: +{hr_pts}", input.heart_rate),
        format!("Systolic BP {:.0} mmHg: +{sbp_pts}", input.systolic_bp),
        format!("Creatinine {:.2} mg/dL: +{creat_pts}", input.creatinine),
        format!(
            "Killip class {}: +{killip_pts}",
            input.killip_class.as_u8()
        ),
    ];
    if input.cardiac_arrest_at_admission {
        total += CARDIAC_ARREST_POINTS;
        notes.push(format!("Cardiac arrest at admission: +{CARDIAC_ARREST_POINTS}"));
    }
    if input.st_segment_deviation {
        total += ST_DEVIATION_POINTS;
        notes.push(format!("ST-segment deviation: +{ST_DEVIATION_POINTS}"));
    }
    if input.elevated_cardiac_markers {
        total += ELEVATED_MARKERS_POINTS;
        notes.push(format!("Elevated cardiac markers: +{ELEVATED_MARKERS_POINTS}"));
    }

    let selected = find_band(GRACE_BANDS, f64::from(total));

    ScoreReport {
        score_type: ScoreType::Grace,
        score: f64::from(total),
        risk_percentage: selected.mortality_pct,
        category: selected.category,
        recommendations: selected.recommendations.iter().map(|r| (*r).to_string()).collect(),
        calculated_at: Utc::now().naive_utc(),
        detail: ScoreDetail::Grace(GraceDetail {
            total_points: total,
            in_hospital_mortality_pct: selected.mortality_pct,
            clinical_notes: notes,
        }),
    }
}
