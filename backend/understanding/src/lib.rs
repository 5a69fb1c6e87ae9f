//! Image understanding: the vision adapter and its backends.

pub mod adapter;
pub mod fixtures;
pub mod google;

pub use adapter::{AnalysisOutcome, VisionAdapter};
pub use fixtures::{FixtureBackend, fixture_for};
pub use google::GoogleVisionBackend;
