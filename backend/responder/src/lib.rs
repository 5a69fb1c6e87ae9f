//! Rule-based answers to questions about an analyzed image.
//!
//! The synthesizer is a decision table: an ordered list of
//! `(predicate, template)` rules, first match wins, no scoring.

pub mod branches;
pub mod context;
pub mod intent;
pub mod ora;
pub mod rules;
pub mod scene;
pub mod synthesizer;

pub use context::describe_analysis;
pub use intent::{classify_query, Intent};
pub use ora::{OraClient, SimulatedOra};
pub use scene::Scene;
pub use synthesizer::{explain, synthesize, Synthesis};
