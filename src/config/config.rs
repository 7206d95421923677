use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaceMeshConfig {
    pub model_name: String,
    pub timeout: i32,
    pub mean: f32,
    pub scale: f32,
    pub score_threshold: f32,
    pub num_landmarks: usize,
    pub max_faces: i32,
    pub imsize: (i32, i32),
}

impl FaceMeshConfig {
    pub fn new() -> Self {
        FaceMeshConfig {
            model_name: "face_mesh".to_string(),
            timeout: 20,
            mean: 0.0,
            scale: 0.00392156862745098,
            score_threshold: 0.5,
            num_landmarks: 478,
            max_faces: 1,
            imsize: (192, 192),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JawClassifierConfig {
    pub chin_index: usize,
    pub jaw_corner_index: usize,
    pub ear_corner_index: usize,
    pub threshold_blade_max: f32,
    pub threshold_medium: f32,
}

impl JawClassifierConfig {
    pub fn new() -> Self {
        JawClassifierConfig {
            chin_index: 152,
            jaw_corner_index: 365,
            ear_corner_index: 454,
            threshold_blade_max: 125.0,
            threshold_medium: 135.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisionRaterConfig {
    pub model_name: String,
    pub endpoint: String,
    pub timeout: i32,
    pub max_tokens: u32,
}

impl VisionRaterConfig {
    pub fn new() -> Self {
        VisionRaterConfig {
            model_name: "claude-sonnet-4-20250514".to_string(),
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            timeout: 60,
            max_tokens: 512,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifierConfig {
    pub api_base: String,
    pub timeout: i32,
    pub caption: String,
}

impl NotifierConfig {
    pub fn new() -> Self {
        NotifierConfig {
            api_base: "https://api.telegram.org".to_string(),
            timeout: 20,
            caption: "New jawline analysis request".to_string(),
        }
    }
}
