//! Nutri Advisor Shared Library
//!
//! This crate contains shared types, calculators, and prompt templates used
//! across the backend and WASM modules.

pub mod errors;
pub mod food;
pub mod health_metrics;
pub mod nutrients;
pub mod prompts;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use food::FoodList;
pub use health_metrics::*;
pub use nutrients::NutrientSnapshot;
pub use prompts::{Prompt, PromptKind};
pub use types::*;
