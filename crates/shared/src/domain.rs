use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownSiteCode;

/// Opaque identifier of a recorded heart-sound sample, as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(pub String);

impl SampleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SampleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

/// Body location where a sample was recorded. The wire code is the exact
/// string the inference service was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuscultationSite {
    #[serde(rename = "Apex")]
    Apex,
    #[serde(rename = "LC (Left,Carotid)")]
    LeftCarotid,
    #[serde(rename = "RC (Right,Carotid)")]
    RightCarotid,
    #[serde(rename = "LUA (Left,Upper,Anterior)")]
    LeftUpperAnterior,
    #[serde(rename = "RUA (Right,Upper,Anterior)")]
    RightUpperAnterior,
    #[serde(rename = "LMA (Left,Mid,Anterior)")]
    LeftMidAnterior,
    #[serde(rename = "RMA (Right,Mid,Anterior)")]
    RightMidAnterior,
    #[serde(rename = "LLA (Left,Lower,Anterior)")]
    LeftLowerAnterior,
    #[serde(rename = "RLA (Right,Lower,Anterior)")]
    RightLowerAnterior,
    #[serde(rename = "LLSB (Left,Lower,Sternal Border)")]
    LeftLowerSternalBorder,
    #[serde(rename = "LUSB (Left,Upper,Sternal Border)")]
    LeftUpperSternalBorder,
    #[serde(rename = "RUSB (Right,Upper,Sternal Border)")]
    RightUpperSternalBorder,
}

impl AuscultationSite {
    /// Every site in display order.
    pub const ALL: [AuscultationSite; 12] = [
        AuscultationSite::Apex,
        AuscultationSite::LeftCarotid,
        AuscultationSite::RightCarotid,
        AuscultationSite::LeftUpperAnterior,
        AuscultationSite::RightUpperAnterior,
        AuscultationSite::LeftMidAnterior,
        AuscultationSite::RightMidAnterior,
        AuscultationSite::LeftLowerAnterior,
        AuscultationSite::RightLowerAnterior,
        AuscultationSite::LeftLowerSternalBorder,
        AuscultationSite::LeftUpperSternalBorder,
        AuscultationSite::RightUpperSternalBorder,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AuscultationSite::Apex => "Apex",
            AuscultationSite::LeftCarotid => "LC (Left,Carotid)",
            AuscultationSite::RightCarotid => "RC (Right,Carotid)",
            AuscultationSite::LeftUpperAnterior => "LUA (Left,Upper,Anterior)",
            AuscultationSite::RightUpperAnterior => "RUA (Right,Upper,Anterior)",
            AuscultationSite::LeftMidAnterior => "LMA (Left,Mid,Anterior)",
            AuscultationSite::RightMidAnterior => "RMA (Right,Mid,Anterior)",
            AuscultationSite::LeftLowerAnterior => "LLA (Left,Lower,Anterior)",
            AuscultationSite::RightLowerAnterior => "RLA (Right,Lower,Anterior)",
            AuscultationSite::LeftLowerSternalBorder => "LLSB (Left,Lower,Sternal Border)",
            AuscultationSite::LeftUpperSternalBorder => "LUSB (Left,Upper,Sternal Border)",
            AuscultationSite::RightUpperSternalBorder => "RUSB (Right,Upper,Sternal Border)",
        }
    }
}

impl Default for AuscultationSite {
    fn default() -> Self {
        AuscultationSite::ALL[0]
    }
}

impl fmt::Display for AuscultationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AuscultationSite {
    type Err = UnknownSiteCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuscultationSite::ALL
            .iter()
            .copied()
            .find(|site| site.code() == s)
            .ok_or_else(|| UnknownSiteCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_list_keeps_service_order_and_defaults_to_apex() {
        let codes: Vec<&str> = AuscultationSite::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes.len(), 12);
        assert_eq!(codes[0], "Apex");
        assert_eq!(codes[3], "LUA (Left,Upper,Anterior)");
        assert_eq!(codes[11], "RUSB (Right,Upper,Sternal Border)");
        assert_eq!(AuscultationSite::default(), AuscultationSite::Apex);
    }

    #[test]
    fn parses_site_codes_exactly() {
        assert_eq!(
            "LLSB (Left,Lower,Sternal Border)".parse::<AuscultationSite>(),
            Ok(AuscultationSite::LeftLowerSternalBorder)
        );
        assert_eq!(
            "apex".parse::<AuscultationSite>(),
            Err(UnknownSiteCode("apex".to_string()))
        );
    }

    #[test]
    fn gender_serializes_to_single_letter_codes() {
        assert_eq!(serde_json::to_string(&Gender::Female).expect("json"), "\"F\"");
        assert_eq!(Gender::default(), Gender::Male);
        assert_eq!(Gender::Male.label(), "MALE");
    }
}
