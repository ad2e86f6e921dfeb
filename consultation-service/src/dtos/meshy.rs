use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `POST /api/meshy/text-to-3d`. Any extra fields are passed to the
/// provider as generation options.
#[derive(Debug, Deserialize)]
pub struct TextTo3dRequest {
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Body of `POST /api/meshy/image-to-3d`.
#[derive(Debug, Deserialize)]
pub struct ImageTo3dRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}
