use serde::{Deserialize, Serialize};

/// A scene/content label with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

impl Label {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self { description: description.into(), score }
    }
}

/// A normalized (0..1) corner of a bounding polygon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// A localized object. `bounding_box` holds the four corners, clockwise from top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    pub name: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub bounding_box: Vec<Vertex>,
}

impl DetectedObject {
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self { name: name.into(), score, bounding_box: Vec::new() }
    }

    pub fn with_box(mut self, corners: [(f32, f32); 4]) -> Self {
        self.bounding_box = corners.iter().map(|&(x, y)| Vertex { x, y }).collect();
        self
    }
}

/// Normalized output of one image analysis.
///
/// Every collection defaults to empty, so a partially populated JSON body
/// still deserializes into something the synthesizer can read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub objects: Vec<DetectedObject>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.objects.is_empty() && self.text.trim().is_empty()
    }
}

/// The answer returned for a query, or an error indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SynthesizedAnswer {
    Completion { completion: String },
    Error { error: String },
}

impl SynthesizedAnswer {
    pub fn completion(text: impl Into<String>) -> Self {
        Self::Completion { completion: text.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { error: message.into() }
    }

    /// The completion text, if this is not an error.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Completion { completion } => Some(completion),
            Self::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            Self::Completion { .. } => None,
        }
    }
}
