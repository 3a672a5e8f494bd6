//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! request handlers and the external advice model.

pub mod advice;
pub mod analysis;
pub mod chart;
pub mod gemini;
pub mod pdf;
pub mod profile;

pub use advice::{AdviceClient, AdviceService};
pub use analysis::AnalysisService;
pub use gemini::GeminiClient;
pub use profile::ProfileService;
