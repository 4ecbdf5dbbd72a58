pub mod enums;
pub mod inputs;
pub mod measurement;
pub mod patient;
pub mod results;

pub use enums::{KillipClass, Race, RiskCategory, ScoreType, Sex};
pub use inputs::{
    CacScoreInput, ChadsVascInput, GraceScoreInput, HasBledInput, HeartScoreInput, TimiRiskInput,
};
pub use measurement::StoredMeasurement;
pub use patient::PatientRiskData;
pub use results::{
    AscvdDetail, CacDetail, ChadsVascDetail, ComprehensiveDetail, FraminghamDetail, GraceDetail,
    HasBledDetail, HeartDetail, ScoreDetail, ScoreReport, TimiDetail,
};
