use anyhow::Error;
use tonic::transport::{Channel, Endpoint};

use facemesh::landmark_detection_client::LandmarkDetectionClient;
use facemesh::{MeshRequest, MeshResponse};

pub mod facemesh {
    tonic::include_proto!("facemesh.v1");
}

/// Thin wrapper around the generated face mesh detection client.
#[derive(Debug, Clone)]
pub struct LandmarkInferenceClient {
    client: LandmarkDetectionClient<Channel>,
}

impl LandmarkInferenceClient {
    /// connect establishes a channel to the landmark detection server.
    ///
    /// # Arguments
    /// * `addr` - server address, e.g. "http://localhost:8001"
    ///
    /// # Returns
    /// * `Result<LandmarkInferenceClient, Error>`
    pub async fn connect(addr: String) -> Result<Self, Error> {
        let channel = Endpoint::from_shared(addr)?.connect().await?;
        Ok(LandmarkInferenceClient {
            client: LandmarkDetectionClient::new(channel),
        })
    }

    /// detect_mesh runs one inference request against the server.
    pub async fn detect_mesh(&self, request: tonic::Request<MeshRequest>) -> Result<MeshResponse, Error> {
        let mut client = self.client.clone();
        let response = client.detect_mesh(request).await?;
        Ok(response.into_inner())
    }
}
