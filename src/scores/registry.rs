//! Score-type dispatch over JSON payloads.
//!
//! Hosting layers hand over a score-type tag and an untyped JSON body; the
//! registry deserializes the matching input record, runs its validation, and
//! routes to the calculator. Payload shapes are the serde forms of the input
//! records in [`crate::models`]; the comprehensive payload wraps optional
//! `risk_data` and `cac` objects.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::enums::ScoreType;
use crate::models::inputs::{
    CacScoreInput, ChadsVascInput, GraceScoreInput, HasBledInput, HeartScoreInput, TimiRiskInput,
};
use crate::models::patient::PatientRiskData;
use crate::models::results::ScoreReport;

use super::{
    ascvd, cac, chads_vasc, composer, framingham, grace, has_bled, heart, timi, ScoreError,
};

/// Every score type the registry can route.
pub const SUPPORTED_TYPES: &[ScoreType] = &[
    ScoreType::Framingham,
    ScoreType::Ascvd,
    ScoreType::Cac,
    ScoreType::Heart,
    ScoreType::ChadsVasc,
    ScoreType::HasBled,
    ScoreType::Timi,
    ScoreType::Grace,
    ScoreType::Comprehensive,
];

#[derive(Debug, Deserialize)]
struct ComprehensivePayload {
    #[serde(default)]
    risk_data: Option<PatientRiskData>,
    #[serde(default)]
    cac: Option<CacScoreInput>,
}

/// Deserialize, validate, and compute one score.
pub fn compute(score_type: ScoreType, payload: &Value) -> Result<ScoreReport, ScoreError> {
    let report = match score_type {
        ScoreType::Framingham => {
            let data: PatientRiskData = parse(score_type, payload)?;
            checked(score_type, data.validate())?;
            framingham::calculate(&data)
        }
        ScoreType::Ascvd => {
            let data: PatientRiskData = parse(score_type, payload)?;
            checked(score_type, data.validate())?;
            ascvd::calculate(&data)
        }
        ScoreType::Cac => {
            let input: CacScoreInput = parse(score_type, payload)?;
            checked(score_type, input.validate())?;
            cac::interpret(&input)
        }
        ScoreType::Heart => {
            let input: HeartScoreInput = parse(score_type, payload)?;
            checked(score_type, input.validate())?;
            heart::calculate(&input)
        }
        ScoreType::ChadsVasc => {
            let input: ChadsVascInput = parse(score_type, payload)?;
            checked(score_type, input.validate())?;
            chads_vasc::calculate(&input)
        }
        ScoreType::HasBled => {
            let input: HasBledInput = parse(score_type, payload)?;
            has_bled::calculate(&input)
        }
        ScoreType::Timi => {
            let input: TimiRiskInput = parse(score_type, payload)?;
            timi::calculate(&input)
        }
        ScoreType::Grace => {
            let input: GraceScoreInput = parse(score_type, payload)?;
            checked(score_type, input.validate())?;
            grace::calculate(&input)
        }
        ScoreType::Comprehensive => {
            let input: ComprehensivePayload = parse(score_type, payload)?;
            if let Some(ref data) = input.risk_data {
                checked(score_type, data.validate())?;
            }
            if let Some(ref cac_input) = input.cac {
                checked(score_type, cac_input.validate())?;
            }
            composer::compose(input.risk_data.as_ref(), input.cac.as_ref())
        }
    };

    tracing::debug!(
        score_type = score_type.as_str(),
        score = report.score,
        category = report.category.as_str(),
        "Score computed"
    );
    Ok(report)
}

/// Route by the string tag hosting layers carry (e.g. `"chads_vasc"`).
pub fn compute_by_name(name: &str, payload: &Value) -> Result<ScoreReport, ScoreError> {
    let score_type: ScoreType = name
        .parse()
        .map_err(|_| ScoreError::UnknownScoreType(name.to_string()))?;
    compute(score_type, payload)
}

fn parse<T: DeserializeOwned>(score_type: ScoreType, payload: &Value) -> Result<T, ScoreError> {
    serde_json::from_value(payload.clone()).map_err(|source| ScoreError::MalformedPayload {
        score_type: score_type.as_str(),
        source,
    })
}

fn checked(score_type: ScoreType, result: Result<(), Vec<String>>) -> Result<(), ScoreError> {
    result.map_err(|problems| ScoreError::InvalidInput {
        score_type: score_type.as_str(),
        problems,
    })
}
