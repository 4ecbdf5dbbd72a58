use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Sex {
    Male => "male",
    Female => "female",
});

str_enum!(Race {
    White => "white",
    AfricanAmerican => "african_american",
});

str_enum!(ScoreType {
    Framingham => "framingham",
    Ascvd => "ascvd",
    Cac => "cac",
    Heart => "heart",
    ChadsVasc => "chads_vasc",
    HasBled => "has_bled",
    Timi => "timi",
    Grace => "grace",
    Comprehensive => "comprehensive",
});

/// Risk category shared by every calculator. Ordinal: a later variant always
/// means more risk than an earlier one; each calculator uses its own subset
/// and thresholds. Clinical prose says "intermediate" where this enum says
/// `Moderate` (ASCVD 7.5–20%, HEART 4–6, TIMI 3–4, GRACE mid tier).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    VeryLow,
    Low,
    Borderline,
    Moderate,
    High,
    VeryHigh,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Borderline => "borderline",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    /// Short human-readable description for reports and logs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very low risk",
            Self::Low => "Low risk",
            Self::Borderline => "Borderline risk",
            Self::Moderate => "Moderate (intermediate) risk",
            Self::High => "High risk",
            Self::VeryHigh => "Very high risk",
        }
    }
}

impl std::str::FromStr for RiskCategory {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_low" => Ok(Self::VeryLow),
            "low" => Ok(Self::Low),
            "borderline" => Ok(Self::Borderline),
            // "intermediate" appears in older stored rows and clinical JSON.
            "moderate" | "intermediate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            "very_high" => Ok(Self::VeryHigh),
            _ => Err(DatabaseError::InvalidEnum {
                field: "RiskCategory".into(),
                value: s.into(),
            }),
        }
    }
}

/// Killip heart-failure class recorded post-MI, 1 (no failure) through
/// 4 (cardiogenic shock). Serialized as its numeric class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum KillipClass {
    I,
    II,
    III,
    IV,
}

impl KillipClass {
    /// GRACE point contribution for this class.
    pub fn grace_points(&self) -> u32 {
        match self {
            Self::I => 0,
            Self::II => 20,
            Self::III => 39,
            Self::IV => 59,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
        }
    }
}

impl From<KillipClass> for u8 {
    fn from(class: KillipClass) -> u8 {
        class.as_u8()
    }
}

impl TryFrom<u8> for KillipClass {
    type Error = DatabaseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::I),
            2 => Ok(Self::II),
            3 => Ok(Self::III),
            4 => Ok(Self::IV),
            _ => Err(DatabaseError::InvalidEnum {
                field: "KillipClass".into(),
                value: value.to_string(),
            }),
        }
    }
}
