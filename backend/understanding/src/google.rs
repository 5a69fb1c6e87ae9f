//! Google Cloud Vision backend: `images:annotate` over REST.
//!
//! Requests carry either an API key (`?key=`) or an OAuth bearer token minted
//! from a service-account file. The service account is loaded on first use.
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use oravision_config::{VisionAuth, VisionConfig};
use oravision_core::{
    AnalysisResult, DetectedObject, FeatureKind, ImageRef, Label, OravisionError, Vertex,
    VisionBackend,
};
use oravision_logging::redact_sensitive_data;

pub const BACKEND_NAME: &str = "google-vision";
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

enum Credentials {
    ApiKey(String),
    ServiceAccount {
        path: PathBuf,
        account: OnceCell<CustomServiceAccount>,
    },
}

pub struct GoogleVisionBackend {
    client: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
    max_results: u32,
}

impl GoogleVisionBackend {
    /// Authenticate with an API key.
    pub fn new(api_key: impl Into<String>, config: &VisionConfig) -> Result<Self, OravisionError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OravisionError::MissingCredentials);
        }
        Self::build(Credentials::ApiKey(api_key), config)
    }

    /// Authenticate with bearer tokens from a service-account key file.
    pub fn with_service_account(
        path: impl Into<PathBuf>,
        config: &VisionConfig,
    ) -> Result<Self, OravisionError> {
        let credentials = Credentials::ServiceAccount {
            path: path.into(),
            account: OnceCell::new(),
        };
        Self::build(credentials, config)
    }

    pub fn from_auth(auth: VisionAuth, config: &VisionConfig) -> Result<Self, OravisionError> {
        match auth {
            VisionAuth::ApiKey(key) => Self::new(key, config),
            VisionAuth::ServiceAccount(path) => Self::with_service_account(path, config),
        }
    }

    fn build(credentials: Credentials, config: &VisionConfig) -> Result<Self, OravisionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            OravisionError::Other(anyhow::anyhow!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            credentials,
            max_results: config.max_results,
        })
    }

    pub fn uses_service_account(&self) -> bool {
        matches!(self.credentials, Credentials::ServiceAccount { .. })
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, OravisionError> {
        match &self.credentials {
            Credentials::ApiKey(key) => Ok(request.query(&[("key", key.as_str())])),
            Credentials::ServiceAccount { path, account } => {
                let account = account
                    .get_or_try_init(|| async { CustomServiceAccount::from_file(path) })
                    .await
                    .map_err(|e| {
                        OravisionError::Other(anyhow::anyhow!(
                            "loading service account {}: {e}",
                            path.display()
                        ))
                    })?;
                let token = account.token(&[CLOUD_PLATFORM_SCOPE]).await.map_err(|e| {
                    OravisionError::Other(anyhow::anyhow!("fetching access token: {e}"))
                })?;
                Ok(request.bearer_auth(token.as_str()))
            }
        }
    }
}

#[async_trait]
impl VisionBackend for GoogleVisionBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn annotate(
        &self,
        image: &ImageRef,
        features: &[FeatureKind],
    ) -> Result<AnalysisResult, OravisionError> {
        let body = build_request(image, features, self.max_results);
        info!(
            image = %image,
            features = features.len(),
            "[Vision] Annotating image via Google Cloud Vision"
        );

        let request = self.authorize(self.client.post(&self.endpoint)).await?;
        let resp = request.json(&body).send().await.map_err(|e| {
            OravisionError::Other(anyhow::anyhow!(redact_sensitive_data(&e.to_string())))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(OravisionError::VisionApi {
                status: status.as_u16(),
                message: redact_sensitive_data(&message),
            });
        }

        let parsed: AnnotateResponse = resp
            .json()
            .await
            .map_err(|e| OravisionError::Malformed(e.to_string()))?;
        let result = normalize_response(parsed)?;
        debug!(
            labels = result.labels.len(),
            objects = result.objects.len(),
            text_chars = result.text.len(),
            "[Vision] Annotation normalized"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest {
    pub image: WireImage,
    pub features: Vec<WireFeature>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<WireImageSource>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireImageSource {
    pub image_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFeature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub max_results: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    pub full_text_annotation: Option<FullTextAnnotation>,
    #[serde(default)]
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    pub error: Option<WireStatus>,
}

#[derive(Debug, Deserialize)]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Deserialize)]
pub struct FullTextAnnotation {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObjectAnnotation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f32,
    pub bounding_poly: Option<BoundingPoly>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub normalized_vertices: Vec<Vertex>,
}

#[derive(Debug, Deserialize)]
pub struct WireStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Build the single-image request body.
pub fn build_request(
    image: &ImageRef,
    features: &[FeatureKind],
    max_results: u32,
) -> AnnotateRequest {
    let image = match image {
        ImageRef::Remote(url) => WireImage {
            content: None,
            source: Some(WireImageSource { image_uri: url.clone() }),
        },
        ImageRef::Inline { data, .. } => WireImage {
            content: Some(data.clone()),
            source: None,
        },
    };
    AnnotateRequest {
        requests: vec![AnnotateImageRequest {
            image,
            features: features
                .iter()
                .map(|&kind| WireFeature { kind, max_results })
                .collect(),
        }],
    }
}

/// Map the first image response into an [`AnalysisResult`].
///
/// Text comes from the first text annotation (the full block), falling back
/// to `fullTextAnnotation`. A per-image `error` is surfaced as an API error.
pub fn normalize_response(resp: AnnotateResponse) -> Result<AnalysisResult, OravisionError> {
    let first = resp
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| OravisionError::Malformed("response contained no image results".into()))?;

    if let Some(err) = first.error {
        if err.code != 0 || !err.message.is_empty() {
            return Err(OravisionError::VisionApi {
                status: u16::try_from(err.code).unwrap_or(0),
                message: err.message,
            });
        }
    }

    let text = first
        .text_annotations
        .into_iter()
        .next()
        .map(|t| t.description)
        .or_else(|| first.full_text_annotation.map(|t| t.text))
        .unwrap_or_default();

    Ok(AnalysisResult {
        labels: first
            .label_annotations
            .into_iter()
            .map(|l| Label::new(l.description, l.score))
            .collect(),
        text,
        objects: first
            .localized_object_annotations
            .into_iter()
            .map(|o| DetectedObject {
                name: o.name,
                score: o.score,
                bounding_box: o
                    .bounding_poly
                    .map(|p| p.normalized_vertices)
                    .unwrap_or_default(),
            })
            .collect(),
    })
}
