//! Static analysis fixtures served when no live vision backend answers.
//!
//! The choice depends only on the shape of the image reference:
//! - inline JPEG payloads (base64 starting `/9j/`, like the sample watch photo) → watch
//! - any other inline payload → generic product shot
//! - remote URLs → landscape

use async_trait::async_trait;

use oravision_core::{
    AnalysisResult, DetectedObject, FeatureKind, ImageRef, Label, OravisionError, VisionBackend,
};

pub const BACKEND_NAME: &str = "fixtures";

/// Base64 of the JPEG SOI marker (`FF D8 FF`).
const JPEG_BASE64_SIGNATURE: &str = "/9j/";

/// Serves canned analyses. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBackend;

#[async_trait]
impl VisionBackend for FixtureBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn annotate(
        &self,
        image: &ImageRef,
        _features: &[FeatureKind],
    ) -> Result<AnalysisResult, OravisionError> {
        Ok(fixture_for(image))
    }
}

/// Pick the fixture matching an image reference.
pub fn fixture_for(image: &ImageRef) -> AnalysisResult {
    match image {
        ImageRef::Inline { data, .. } if data.starts_with(JPEG_BASE64_SIGNATURE) => watch_fixture(),
        ImageRef::Inline { .. } => generic_fixture(),
        ImageRef::Remote(_) => landscape_fixture(),
    }
}

pub fn watch_fixture() -> AnalysisResult {
    AnalysisResult {
        labels: vec![
            Label::new("Watch", 0.97),
            Label::new("Analog watch", 0.95),
            Label::new("Wrist", 0.89),
            Label::new("Fashion accessory", 0.86),
            Label::new("Strap", 0.82),
            Label::new("Silver", 0.78),
            Label::new("Metal", 0.74),
        ],
        text: "SWISS MADE".to_string(),
        objects: vec![
            DetectedObject::new("Watch", 0.94)
                .with_box([(0.18, 0.12), (0.82, 0.12), (0.82, 0.88), (0.18, 0.88)]),
        ],
    }
}

pub fn generic_fixture() -> AnalysisResult {
    AnalysisResult {
        labels: vec![
            Label::new("Product", 0.88),
            Label::new("Rectangle", 0.81),
            Label::new("Font", 0.76),
            Label::new("Material property", 0.71),
        ],
        text: String::new(),
        objects: vec![
            DetectedObject::new("Packaged goods", 0.72)
                .with_box([(0.25, 0.2), (0.75, 0.2), (0.75, 0.8), (0.25, 0.8)]),
        ],
    }
}

pub fn landscape_fixture() -> AnalysisResult {
    AnalysisResult {
        labels: vec![
            Label::new("Sky", 0.96),
            Label::new("Mountain", 0.94),
            Label::new("Nature", 0.92),
            Label::new("Cloud", 0.9),
            Label::new("Landscape", 0.88),
            Label::new("Tree", 0.85),
        ],
        text: String::new(),
        objects: vec![
            DetectedObject::new("Tree", 0.71)
                .with_box([(0.05, 0.45), (0.3, 0.45), (0.3, 0.95), (0.05, 0.95)]),
        ],
    }
}
