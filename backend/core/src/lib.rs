pub mod error;
pub mod feature;
pub mod image;
pub mod traits;
pub mod types;

pub use error::OravisionError;
pub use feature::{FeatureKind, DEFAULT_FEATURES};
pub use image::ImageRef;
pub use traits::{CompletionBackend, OraPrompt, VisionBackend};
pub use types::{AnalysisResult, DetectedObject, Label, SynthesizedAnswer, Vertex};
