use async_trait::async_trait;

use crate::error::OravisionError;
use crate::feature::FeatureKind;
use crate::image::ImageRef;
use crate::types::{AnalysisResult, SynthesizedAnswer};

/// An image-annotation capability (Google Cloud Vision, canned fixtures, ...).
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Backend name used in logs and the health report.
    fn name(&self) -> &str;

    /// Annotate one image with the requested features.
    async fn annotate(
        &self,
        image: &ImageRef,
        features: &[FeatureKind],
    ) -> Result<AnalysisResult, OravisionError>;
}

/// Input to a completion backend.
#[derive(Debug, Clone)]
pub struct OraPrompt {
    /// The analysis rendered as a text blob.
    pub context: String,
    pub query: String,
    pub analysis: AnalysisResult,
}

/// Answers a free-text query about an analyzed image.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &OraPrompt) -> Result<SynthesizedAnswer, OravisionError>;
}
