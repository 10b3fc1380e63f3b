use serde::{Deserialize, Serialize};

use crate::domain::{AuscultationSite, Gender, SampleId};

pub const SOUNDS_PATH: &str = "get-sounds";
pub const PREDICT_PATH: &str = "predict";
pub const LISTEN_PATH: &str = "listen";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundsResponse {
    pub sounds: Vec<SampleId>,
}

/// Body of `POST /predict`. Field names match the service's training columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Location")]
    pub location: AuscultationSite,
    #[serde(rename = "Heart Sound ID")]
    pub sample_id: SampleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_id: Option<SampleId>,
}
