//! Natural-language insight generation for business profiles.
//!
//! The primary path prompts a chat-completion service and parses structured
//! JSON out of its reply; every failure along that path degrades to a
//! deterministic rule-based fallback, so callers always get a well-shaped
//! [`Insight`] or [`ComparisonInsight`] back.

pub mod error;
pub mod fallback;
pub mod generator;
pub mod openai;
pub mod parse;
pub mod prompt;

pub use error::InsightError;
pub use generator::{ComparisonInsight, Insight, InsightGenerator, TextGenerator};
pub use openai::OpenAiClient;
