use std::time::Duration;

use anyhow::Error;
use ndarray::Array3;
use opencv::core::{Mat, MatTraitConst, Size, Vec3b};
use opencv::imgproc;
use opencv::imgproc::resize;
use tracing::debug;

use crate::config::config::FaceMeshConfig;
use crate::landmark_client::client::facemesh::MeshRequest;
use crate::landmark_client::client::LandmarkInferenceClient;
use crate::utils::coordinate::LandmarkSet;

/// Client of the external face mesh landmark detector.
///
/// The detector's contract is "image in, landmark set or nothing out":
/// an image with no usable face yields `None`, never an error.
#[derive(Debug, Clone)]
pub struct FaceMeshClient {
    landmark_infer_client: LandmarkInferenceClient,
    pub model_name: String,
    pub timeout: i32,
    pub mean: f32,
    pub scale: f32,
    pub score_threshold: f32,
    pub num_landmarks: usize,
    pub max_faces: i32,
    pub imsize: (i32, i32),
}

impl FaceMeshClient {
    pub fn new(landmark_infer_client: LandmarkInferenceClient, config: FaceMeshConfig) -> Self {
        FaceMeshClient {
            landmark_infer_client,
            model_name: config.model_name,
            timeout: config.timeout,
            mean: config.mean,
            scale: config.scale,
            score_threshold: config.score_threshold,
            num_landmarks: config.num_landmarks,
            max_faces: config.max_faces,
            imsize: config.imsize,
        }
    }

    fn preprocess(&self, img: &Mat) -> Result<Array3<f32>, Error> {
        let mut img_resized = Mat::default();
        resize(
            &img,
            &mut img_resized,
            Size::new(self.imsize.0, self.imsize.1),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;

        let img_shape = img_resized.size()?;

        let mut im_tensor = Array3::<f32>::zeros((
            img_shape.height as usize,
            img_shape.width as usize,
            3usize,
        ));

        // Convert the image to float and normalize it
        for i in 0..3 {
            for y in 0..img_shape.height as usize {
                for x in 0..img_shape.width as usize {
                    let pixel_value = img_resized.at_2d::<Vec3b>(y as i32, x as i32)?[i];
                    im_tensor[[y, x, i]] = (pixel_value as f32 - self.mean) * self.scale;
                }
            }
        }

        Ok(im_tensor)
    }

    /// detect extracts the face mesh landmarks from the input image.
    ///
    /// Returns the landmark set of the best-scored face above the
    /// configured threshold, or `None` when the detector found no
    /// usable face.
    ///
    /// # Arguments
    /// * `img` - RGB OpenCV matrix
    ///
    /// # Returns
    /// * `Result<Option<LandmarkSet>, Error>`
    pub async fn detect(&self, img: &Mat) -> Result<Option<LandmarkSet>, Error> {
        let input_tensor = self.preprocess(img)?;
        let shape: Vec<i64> = vec![1, self.imsize.1 as i64, self.imsize.0 as i64, 3];

        let model_request = MeshRequest {
            model_name: self.model_name.to_owned(),
            shape,
            input_tensor: input_tensor.into_iter().collect(),
            score_threshold: self.score_threshold,
            max_faces: self.max_faces,
        };

        let mut request = tonic::Request::new(model_request);
        request.set_timeout(Duration::from_secs(self.timeout as u64));

        let response = self.landmark_infer_client.detect_mesh(request).await?;

        let face = response
            .faces
            .into_iter()
            .filter(|face| face.score >= self.score_threshold)
            .max_by(|a, b| a.score.total_cmp(&b.score));

        let face = match face {
            None => return Ok(None),
            Some(face) => face,
        };

        if face.landmarks.len() < self.num_landmarks * 3 {
            debug!(
                "face_mesh_client - incomplete mesh: {} values for {} landmarks",
                face.landmarks.len(),
                self.num_landmarks
            );
            return Ok(None);
        }

        Ok(Some(LandmarkSet::from_flat(&face.landmarks, 3)))
    }
}

#[cfg(test)]
mod tests {

    #[tokio::test]
    async fn test_face_mesh_client() {

    }
}
