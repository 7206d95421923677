use std::time::Duration;

use anyhow::Error;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

use crate::classifier::classifier::{JawAssessment, JawLevel};
use crate::config::config::VisionRaterConfig;
use crate::utils::image::reencode_jpeg;

const RATING_PROMPT: &str = "Look at the person's jawline in this photo. \
Analyze the sharpness, definition, and gonial angle.\n\n\
Rate the jawline into one of these 3 exact categories:\n\
1. \"Blade/Max \u{2694}\u{FE0F}\" (Extremely sharp, well-defined, angular)\n\
2. \"Medium\" (Visible but average definition)\n\
3. \"Tomato \u{1F345}\" (Soft, rounded, or weak definition)\n\n\
Return ONLY the category name first, followed by a 1-sentence explanation.";

/// Alternative rating strategy: prompt a multimodal model and match the
/// reply text by category substring.
///
/// Non-deterministic by nature; it may disagree with the geometric
/// classifier on the same image, and no reconciliation is attempted.
#[derive(Debug, Clone)]
pub struct VisionRaterClient {
    http: reqwest::Client,
    api_key: String,
    pub model_name: String,
    pub endpoint: String,
    pub max_tokens: u32,
}

impl VisionRaterClient {
    pub fn new(config: VisionRaterConfig, api_key: String) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout as u64))
            .build()?;
        Ok(VisionRaterClient {
            http,
            api_key,
            model_name: config.model_name,
            endpoint: config.endpoint,
            max_tokens: config.max_tokens,
        })
    }

    /// rate sends the image to the vision model and maps its free-text
    /// reply to a jaw level.
    ///
    /// # Arguments
    /// * `image_bytes` - encoded image bytes
    ///
    /// # Returns
    /// * `Result<JawAssessment, Error>`
    pub async fn rate(&self, image_bytes: &[u8]) -> Result<JawAssessment, Error> {
        let jpeg = reencode_jpeg(image_bytes)?;
        let encoded = STANDARD.encode(&jpeg);

        let body = serde_json::json!({
            "model": self.model_name,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image",
                            "source": {
                                "type": "base64",
                                "media_type": "image/jpeg",
                                "data": encoded,
                            },
                        },
                        {"type": "text", "text": RATING_PROMPT},
                    ],
                }
            ],
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::msg(format!(
                "vision_rater_client - model API returned status {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        let text = match payload["content"][0]["text"].as_str() {
            None => {
                return Err(Error::msg(
                    "vision_rater_client - no text content in model response",
                ))
            }
            Some(text) => text,
        };

        let assessment = parse_assessment(text);
        info!(
            "vision rating: {} ({})",
            assessment.level,
            text.lines().next().unwrap_or_default()
        );
        Ok(assessment)
    }
}

/// parse_assessment matches the model reply against the category names,
/// in table order; a reply naming none of them counts as undetected.
fn parse_assessment(text: &str) -> JawAssessment {
    let level = if text.contains("Blade") {
        JawLevel::BladeMax
    } else if text.contains("Medium") {
        JawLevel::Medium
    } else if text.contains("Tomato") {
        JawLevel::Tomato
    } else {
        JawLevel::Undetected
    };

    JawAssessment {
        level,
        angle: None,
        explanation: Some(text.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_category_substring() {
        let a = parse_assessment("Blade/Max \u{2694}\u{FE0F} - razor sharp mandible line.");
        assert_eq!(a.level, JawLevel::BladeMax);

        let a = parse_assessment("Medium. Visible but unremarkable definition.");
        assert_eq!(a.level, JawLevel::Medium);

        let a = parse_assessment("Tomato \u{1F345} - soft and rounded.");
        assert_eq!(a.level, JawLevel::Tomato);
    }

    #[test]
    fn test_parse_keeps_reply_as_explanation() {
        let a = parse_assessment("  Medium. Average definition.\n");
        assert_eq!(a.explanation.as_deref(), Some("Medium. Average definition."));
        assert!(a.angle.is_none());
    }

    #[test]
    fn test_unmatched_reply_is_undetected() {
        let a = parse_assessment("I cannot see a face in this image.");
        assert_eq!(a.level, JawLevel::Undetected);
    }
}
