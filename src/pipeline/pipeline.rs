use anyhow::Error;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::classifier::classifier::{JawAssessment, JawClassifier};
use crate::modules::face_mesh_client::FaceMeshClient;
use crate::modules::telegram_notifier::TelegramNotifier;
use crate::modules::vision_rater_client::VisionRaterClient;
use crate::utils::image::{convert_image_to_mat, frame_size};

/// The single capability both rating strategies implement: image bytes
/// in, one jaw assessment out.
#[async_trait]
pub trait JawRater {
    async fn rate_jawline(&self, image_bytes: &[u8]) -> Result<JawAssessment, Error>;
}

/// Geometric jawline rating pipeline.
///
/// Aggregates the injected collaborators: the face mesh detector, the
/// threshold classifier, and the optional photo notifier. Holds no
/// other state; every analysis call is independent.
#[derive(Debug, Clone)]
pub struct JawlinePipeline {
    face_mesh: FaceMeshClient,
    classifier: JawClassifier,
    notifier: Option<TelegramNotifier>,
}

impl JawlinePipeline {
    /// new initializes new instance of the pipeline
    pub fn new(
        face_mesh_client: FaceMeshClient,
        classifier: JawClassifier,
        notifier: Option<TelegramNotifier>,
    ) -> Self {
        JawlinePipeline {
            face_mesh: face_mesh_client,
            classifier,
            notifier,
        }
    }

    /// analyze rates the jawline on one uploaded image.
    ///
    /// Every failure on the way to an angle - unreadable image, detector
    /// failure, no face, degenerate landmark geometry - collapses into
    /// the `Undetected` assessment; the caller renders that as a
    /// "try a clearer photo" message rather than a technical error.
    ///
    /// # Arguments
    /// * `image_bytes` - encoded image bytes as uploaded
    ///
    /// # Returns
    /// * `Result<JawAssessment, Error>`
    pub async fn analyze(&self, image_bytes: &[u8]) -> Result<JawAssessment, Error> {
        if let Some(notifier) = &self.notifier {
            notifier.notify_detached(image_bytes.to_vec());
        }

        let img = match convert_image_to_mat(image_bytes) {
            Ok(img) => img,
            Err(e) => {
                warn!("pipeline - unreadable image: {e:#}");
                return Ok(JawAssessment::undetected());
            }
        };
        let frame = frame_size(&img)?;

        let landmarks = match self.face_mesh.detect(&img).await {
            Ok(landmarks) => landmarks,
            Err(e) => {
                warn!("pipeline - face mesh inference failed: {e:#}");
                None
            }
        };

        let assessment = self.classifier.classify(landmarks.as_ref(), frame);
        match assessment.angle {
            Some(angle) => info!(
                "calculated jaw angle: {angle:.2} degrees -> level: {}",
                assessment.level
            ),
            None => info!("no usable face -> level: {}", assessment.level),
        }

        Ok(assessment)
    }
}

#[async_trait]
impl JawRater for JawlinePipeline {
    async fn rate_jawline(&self, image_bytes: &[u8]) -> Result<JawAssessment, Error> {
        self.analyze(image_bytes).await
    }
}

#[async_trait]
impl JawRater for VisionRaterClient {
    async fn rate_jawline(&self, image_bytes: &[u8]) -> Result<JawAssessment, Error> {
        self.rate(image_bytes).await
    }
}
