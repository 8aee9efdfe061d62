//! The triage pipeline: symptom analysis via an external inference service,
//! then geographically ranked hospital recommendation.

pub mod clock;
pub mod fallback;
pub mod gemini;
pub mod geo;
pub mod location;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod ranking;

pub use gemini::{GeminiClient, InferenceClient, InferenceError};
pub use orchestrator::{TriageError, TriageService, RECOMMENDATION_QUOTA};
pub use parser::ParseError;
