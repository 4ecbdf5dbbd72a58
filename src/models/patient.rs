use serde::{Deserialize, Serialize};

use super::enums::{Race, Sex};

/// Lipid, blood-pressure and demographic input shared by the Framingham and
/// ASCVD calculators.
///
/// Units: cholesterol in mg/dL, blood pressure in mmHg, age in whole years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRiskData {
    /// Age in years. ASCVD is defined for 40-79; Framingham tables start at 20.
    pub age: u32,
    pub sex: Sex,
    /// Race for ASCVD coefficient selection. Absent race uses the white set.
    pub race: Option<Race>,
    /// Total cholesterol in mg/dL.
    pub total_cholesterol: f64,
    /// HDL cholesterol in mg/dL.
    pub hdl_cholesterol: f64,
    /// LDL cholesterol in mg/dL, when a full panel is available.
    pub ldl_cholesterol: Option<f64>,
    /// Systolic blood pressure in mmHg.
    pub systolic_bp: f64,
    pub diastolic_bp: Option<f64>,
    pub is_smoker: bool,
    pub has_diabetes: bool,
    /// Currently on antihypertensive treatment.
    pub on_bp_medication: bool,
    pub has_hypertension: Option<bool>,
    pub family_history_cvd: Option<bool>,
    pub bmi: Option<f64>,
}

impl PatientRiskData {
    /// Validate that required values are positive and within plausible
    /// clinical ranges.
    ///
    /// The calculators never call this themselves (they clamp instead, so
    /// composed call sites keep working); hosting layers run it at the API
    /// boundary.
    ///
    /// # Errors
    /// Returns every violation found, as human-readable strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(18..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [18, 120]", self.age));
        }
        if !(70.0..=500.0).contains(&self.total_cholesterol) {
            errors.push(format!(
                "Total cholesterol {} mg/dL out of range [70, 500]",
                self.total_cholesterol
            ));
        }
        if !(10.0..=150.0).contains(&self.hdl_cholesterol) {
            errors.push(format!(
                "HDL cholesterol {} mg/dL out of range [10, 150]",
                self.hdl_cholesterol
            ));
        }
        if let Some(ldl) = self.ldl_cholesterol {
            if !(20.0..=400.0).contains(&ldl) {
                errors.push(format!("LDL cholesterol {ldl} mg/dL out of range [20, 400]"));
            }
        }
        if !(60.0..=260.0).contains(&self.systolic_bp) {
            errors.push(format!(
                "Systolic BP {} mmHg out of range [60, 260]",
                self.systolic_bp
            ));
        }
        if let Some(dbp) = self.diastolic_bp {
            if !(30.0..=160.0).contains(&dbp) {
                errors.push(format!("Diastolic BP {dbp} mmHg out of range [30, 160]"));
            }
        }
        if let Some(bmi) = self.bmi {
            if !(10.0..=80.0).contains(&bmi) {
                errors.push(format!("BMI {bmi} out of range [10, 80]"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
