use serde::{Deserialize, Serialize};

use super::enums::{KillipClass, Race, Sex};

/// Input for coronary artery calcium scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacScoreInput {
    /// Agatston score from the CT read, in Agatston units.
    pub agatston_score: f64,
    /// Calcium volume in mm3, when the report includes it.
    pub volume_score: Option<f64>,
    /// Calcium mass in mg, when the report includes it.
    pub mass_score: Option<f64>,
    pub age: u32,
    pub sex: Sex,
    pub race: Option<Race>,
    /// Population percentile when the imaging report supplies one.
    pub percentile: Option<f64>,
}

impl CacScoreInput {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.agatston_score < 0.0 {
            errors.push(format!(
                "Agatston score {} cannot be negative",
                self.agatston_score
            ));
        }
        if !(18..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [18, 120]", self.age));
        }
        if let Some(pct) = self.percentile {
            if !(0.0..=100.0).contains(&pct) {
                errors.push(format!("Percentile {pct} out of range [0, 100]"));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// The five HEART components, each graded 0-2 by the assessing clinician.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartScoreInput {
    /// History: 0 slightly suspicious, 1 moderately, 2 highly suspicious.
    pub history: u8,
    /// ECG: 0 normal, 1 non-specific repolarisation, 2 significant ST deviation.
    pub ecg: u8,
    /// Age: 0 under 45, 1 for 45-64, 2 for 65 and over.
    pub age: u8,
    /// Risk factors: 0 none, 1 for one or two, 2 for three or more (or known
    /// atherosclerotic disease).
    pub risk_factors: u8,
    /// Troponin: 0 at or under the normal limit, 1 for 1-3x, 2 over 3x.
    pub troponin: u8,
}

impl HeartScoreInput {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("history", self.history),
            ("ecg", self.ecg),
            ("age", self.age),
            ("risk_factors", self.risk_factors),
            ("troponin", self.troponin),
        ] {
            if value > 2 {
                errors.push(format!("HEART component {name} is {value}, must be 0-2"));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Risk factors for the CHA2DS2-VASc atrial fibrillation stroke score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChadsVascInput {
    pub age: u32,
    pub sex: Sex,
    pub has_chf: bool,
    pub has_hypertension: bool,
    pub has_diabetes: bool,
    /// Prior stroke, TIA or systemic thromboembolism.
    pub has_stroke_history: bool,
    /// Prior MI, peripheral artery disease or aortic plaque.
    pub has_vascular_disease: bool,
}

impl ChadsVascInput {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if (18..=120).contains(&self.age) {
            Ok(())
        } else {
            Err(vec![format!("Age {} out of range [18, 120]", self.age)])
        }
    }
}

/// Risk factors for the HAS-BLED major-bleed score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasBledInput {
    pub has_hypertension: bool,
    /// Dialysis, transplant or creatinine over 2.26 mg/dL.
    pub has_renal_disease: bool,
    /// Cirrhosis or bilirubin over 2x with transaminases over 3x normal.
    pub has_liver_disease: bool,
    pub has_stroke_history: bool,
    /// Prior major bleed or predisposition to bleeding.
    pub has_bleeding_history: bool,
    /// Unstable or high INRs, under 60% time in therapeutic range.
    pub has_labile_inr: bool,
    pub age_over_65: bool,
    /// Antiplatelets, NSAIDs, or 8 or more alcoholic drinks a week.
    pub uses_drugs_or_alcohol: bool,
}

/// The seven TIMI variables for UA/NSTEMI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimiRiskInput {
    pub age_over_65: bool,
    /// Three or more of: family history, hypertension, hypercholesterolaemia,
    /// diabetes, active smoking.
    pub has_three_cad_risk_factors: bool,
    /// Prior stenosis of 50% or more.
    pub has_known_cad: bool,
    pub uses_aspirin: bool,
    /// Two or more anginal episodes in the last 24 hours.
    pub has_severe_angina: bool,
    /// ST deviation of 0.5 mm or more on presentation.
    pub has_st_deviation: bool,
    pub has_elevated_markers: bool,
}

/// Admission variables for the GRACE ACS score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraceScoreInput {
    pub age: u32,
    /// Heart rate in beats per minute.
    pub heart_rate: f64,
    /// Systolic blood pressure in mmHg.
    pub systolic_bp: f64,
    /// Serum creatinine in mg/dL.
    pub creatinine: f64,
    pub killip_class: KillipClass,
    pub cardiac_arrest_at_admission: bool,
    pub st_segment_deviation: bool,
    pub elevated_cardiac_markers: bool,
}

impl GraceScoreInput {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if !(18..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [18, 120]", self.age));
        }
        if !(20.0..=300.0).contains(&self.heart_rate) {
            errors.push(format!(
                "Heart rate {} bpm out of range [20, 300]",
                self.heart_rate
            ));
        }
        if !(40.0..=300.0).contains(&self.systolic_bp) {
            errors.push(format!(
                "Systolic BP {} mmHg out of range [40, 300]",
                self.systolic_bp
            ));
        }
        if !(0.1..=20.0).contains(&self.creatinine) {
            errors.push(format!(
                "Creatinine {} mg/dL out of range [0.1, 20]",
                self.creatinine
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
