//! Shared recommendation layer for the lipid-panel calculators.
//!
//! Framingham and ASCVD emit the same risk-factor guidance; both call
//! [`risk_factor_guidance`] so the wording stays in one place. Text is
//! clinician-facing and action-oriented, one sentence per recommendation.

use crate::models::enums::RiskCategory;
use crate::models::patient::PatientRiskData;

// ---------------------------------------------------------------------------
// RecommendationSet
// ---------------------------------------------------------------------------

/// Ordered recommendation collector that silently drops exact duplicates.
#[derive(Debug, Default)]
pub struct RecommendationSet {
    items: Vec<String>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless the identical text is already present.
    pub fn push(&mut self, text: String) {
        if !self.items.contains(&text) {
            self.items.push(text);
        }
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, texts: I) {
        for text in texts {
            self.push(text);
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GuidanceTemplates
// ---------------------------------------------------------------------------

/// Recommendation text builder shared across calculators.
pub struct GuidanceTemplates;

impl GuidanceTemplates {
    pub fn smoking_cessation() -> String {
        "Smoking cessation is the single most effective risk reduction; \
         offer counselling and pharmacologic support."
            .to_string()
    }

    pub fn cholesterol_reduction(total_cholesterol: f64) -> String {
        format!(
            "Total cholesterol {total_cholesterol:.0} mg/dL is elevated; \
             advise dietary changes and discuss statin therapy."
        )
    }

    pub fn raise_hdl(hdl: f64) -> String {
        format!(
            "HDL {hdl:.0} mg/dL is low; regular aerobic exercise can raise \
             HDL cholesterol."
        )
    }

    pub fn blood_pressure_control(systolic: f64) -> String {
        format!(
            "Blood pressure control indicated (systolic {systolic:.0} mmHg); \
             review antihypertensive therapy and sodium intake."
        )
    }

    pub fn glycemic_control() -> String {
        "Diabetes present; optimize glycemic control and screen for \
         end-organ complications."
            .to_string()
    }

    pub fn weight_management(bmi: f64) -> String {
        format!("BMI {bmi:.1} is above target; recommend structured weight management.")
    }

    pub fn healthy_living() -> String {
        "Maintain a heart-healthy diet, regular physical activity and \
         routine risk-factor screening."
            .to_string()
    }

    pub fn cardiology_referral() -> String {
        "Elevated overall risk; refer to cardiology for further evaluation.".to_string()
    }

    pub fn aspirin_consideration() -> String {
        "Ten-year risk exceeds 20%; consider low-dose aspirin after \
         weighing bleeding risk."
            .to_string()
    }

    // --- ASCVD statin guidance ---

    pub fn statin_high_intensity() -> String {
        "High-intensity statin therapy indicated.".to_string()
    }

    pub fn statin_moderate_to_high() -> String {
        "Moderate- to high-intensity statin therapy recommended.".to_string()
    }

    pub fn statin_shared_decision() -> String {
        "Borderline risk; discuss statin therapy in a shared decision \
         conversation, considering risk enhancers."
            .to_string()
    }

    pub fn ldl_target(current_ldl: f64, target: u32) -> String {
        format!(
            "LDL {current_ldl:.0} mg/dL; treat to an LDL target below {target} mg/dL."
        )
    }
}

// ---------------------------------------------------------------------------
// Shared rule layer
// ---------------------------------------------------------------------------

/// Risk-factor and category driven guidance used by both lipid-panel
/// calculators.
///
/// Rules fire independently for each factor present; the baseline
/// healthy-living message is always included so even a clean panel gets
/// one actionable line. `risk_pct` gates the aspirin add-on.
pub fn risk_factor_guidance(
    data: &PatientRiskData,
    category: RiskCategory,
    risk_pct: f64,
) -> RecommendationSet {
    let mut set = RecommendationSet::new();

    if data.is_smoker {
        set.push(GuidanceTemplates::smoking_cessation());
    }
    if data.total_cholesterol > 240.0 {
        set.push(GuidanceTemplates::cholesterol_reduction(data.total_cholesterol));
    }
    if data.hdl_cholesterol < 40.0 {
        set.push(GuidanceTemplates::raise_hdl(data.hdl_cholesterol));
    }
    if data.systolic_bp >= 140.0 || data.has_hypertension == Some(true) {
        set.push(GuidanceTemplates::blood_pressure_control(data.systolic_bp));
    }
    if data.has_diabetes {
        set.push(GuidanceTemplates::glycemic_control());
    }
    if let Some(bmi) = data.bmi {
        if bmi > 25.0 {
            set.push(GuidanceTemplates::weight_management(bmi));
        }
    }

    set.push(GuidanceTemplates::healthy_living());

    if category >= RiskCategory::High {
        set.push(GuidanceTemplates::cardiology_referral());
    }
    if risk_pct > 20.0 {
        set.push(GuidanceTemplates::aspirin_consideration());
    }

    set
}
