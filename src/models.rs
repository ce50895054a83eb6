use crate::error::{ApiError, ParseParamError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex token accepted in request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    /// Both sexes combined.
    Unisex,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "unisex" => Ok(Sex::Unisex),
            _ => Err(ParseParamError {
                kind: "sex",
                value: s.to_string(),
                expected: "male, female, unisex",
            }),
        }
    }
}

/// Whether the person has diabetes, for the diabetes-adjusted endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiabetesStatus {
    Yes,
    No,
    Unknown,
}

impl DiabetesStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiabetesStatus::Yes => "yes",
            DiabetesStatus::No => "no",
            DiabetesStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DiabetesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiabetesStatus {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(DiabetesStatus::Yes),
            "no" => Ok(DiabetesStatus::No),
            "unknown" => Ok(DiabetesStatus::Unknown),
            _ => Err(ParseParamError {
                kind: "diabetes status",
                value: s.to_string(),
                expected: "yes, no, unknown",
            }),
        }
    }
}

/// Which count to read from a per-country population record.
///
/// The numeric codes (1 = total, 2 = male, 3 = female) are accepted through
/// `TryFrom<u8>` and `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationMode {
    Total,
    Males,
    Females,
}

impl PopulationMode {
    /// JSON key of the count in a population table record.
    pub fn field(&self) -> &'static str {
        match self {
            PopulationMode::Total => "total",
            PopulationMode::Males => "males",
            PopulationMode::Females => "females",
        }
    }
}

impl TryFrom<u8> for PopulationMode {
    type Error = ApiError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PopulationMode::Total),
            2 => Ok(PopulationMode::Males),
            3 => Ok(PopulationMode::Females),
            other => Err(ApiError::InvalidMode(other)),
        }
    }
}

impl FromStr for PopulationMode {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "total" => Ok(PopulationMode::Total),
            "2" | "male" | "males" => Ok(PopulationMode::Males),
            "3" | "female" | "females" => Ok(PopulationMode::Females),
            _ => Err(ParseParamError {
                kind: "population mode",
                value: s.to_string(),
                expected: "1 (total), 2 (male), 3 (female)",
            }),
        }
    }
}

/// One row of a mortality distribution table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityBucket {
    pub age: f64,
    pub mortality_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_parses_tokens_and_displays_lowercase() {
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(Sex::Unisex.to_string(), "unisex");
        let err = "other".parse::<Sex>().unwrap_err();
        assert_eq!(err.kind, "sex");
        assert_eq!(err.value, "other");
    }

    #[test]
    fn diabetes_status_round_trips_through_display() {
        for s in [DiabetesStatus::Yes, DiabetesStatus::No, DiabetesStatus::Unknown] {
            assert_eq!(s.to_string().parse::<DiabetesStatus>().unwrap(), s);
        }
        assert!("maybe".parse::<DiabetesStatus>().is_err());
    }

    #[test]
    fn population_mode_from_numeric_codes() {
        assert_eq!(PopulationMode::try_from(1).unwrap(), PopulationMode::Total);
        assert_eq!(PopulationMode::try_from(2).unwrap().field(), "males");
        assert_eq!(PopulationMode::try_from(3).unwrap().field(), "females");
        assert!(matches!(
            PopulationMode::try_from(4),
            Err(ApiError::InvalidMode(4))
        ));
        assert_eq!("2".parse::<PopulationMode>().unwrap(), PopulationMode::Males);
        assert!("0".parse::<PopulationMode>().is_err());
    }

    #[test]
    fn mortality_bucket_deserializes() {
        let b: MortalityBucket =
            serde_json::from_str(r#"{"age": 50.0, "mortality_percent": 0.42}"#).unwrap();
        assert_eq!(b.age, 50.0);
        assert_eq!(b.mortality_percent, 0.42);
    }
}
