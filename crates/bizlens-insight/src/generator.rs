//! Insight generation with transparent fallback.
//!
//! [`InsightGenerator`] tries the configured [`TextGenerator`] first and
//! parses structured JSON out of the reply. Any failure, including the
//! generator simply not being configured, produces the deterministic
//! rule-based text from [`crate::fallback`] instead. Errors never reach the
//! caller.

use async_trait::async_trait;
use bizlens_core::BusinessFeatures;
use serde::Serialize;
use serde_json::Value;

use crate::error::InsightError;
use crate::{fallback, parse, prompt};

/// Token budget for a single-business reply.
const SINGLE_MAX_TOKENS: u32 = 500;

/// Token budget for a comparison reply.
const COMPARISON_MAX_TOKENS: u32 = 600;

/// One-operation seam over a generative text service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends a system + user prompt pair and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError`] on transport failure or an unusable reply.
    async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, InsightError>;
}

/// Insight for a single business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub summary: String,
    pub suggestions: Vec<String>,
}

/// Insight for a head-to-head comparison. `strengths` lists areas where the
/// first business beats the second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonInsight {
    pub summary: String,
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
}

/// Insight generator with an optional generative backend.
pub struct InsightGenerator {
    generator: Option<Box<dyn TextGenerator>>,
    max_suggestions: usize,
}

impl InsightGenerator {
    #[must_use]
    pub fn new(generator: Option<Box<dyn TextGenerator>>, max_suggestions: usize) -> Self {
        if generator.is_none() {
            tracing::warn!("no text generator configured; insights use rule-based fallback");
        }
        Self {
            generator,
            max_suggestions,
        }
    }

    /// Generates an insight for one business. Infallible: degrades to the
    /// rule-based fallback on any generative-path error.
    pub async fn single(&self, features: &BusinessFeatures) -> Insight {
        let Some(generator) = self.generator.as_deref() else {
            return fallback::single_insight(features, self.max_suggestions);
        };
        match self.generate_single(generator, features).await {
            Ok(insight) => insight,
            Err(e) => {
                tracing::warn!(business = %features.name, error = %e, "insight generation failed; using fallback");
                fallback::single_insight(features, self.max_suggestions)
            }
        }
    }

    /// Generates a comparison insight for two businesses. Infallible, like
    /// [`InsightGenerator::single`].
    pub async fn compare(
        &self,
        yours: &BusinessFeatures,
        competitor: &BusinessFeatures,
    ) -> ComparisonInsight {
        let Some(generator) = self.generator.as_deref() else {
            return fallback::comparison_insight(yours, competitor, self.max_suggestions);
        };
        match self.generate_comparison(generator, yours, competitor).await {
            Ok(insight) => insight,
            Err(e) => {
                tracing::warn!(
                    business = %yours.name,
                    competitor = %competitor.name,
                    error = %e,
                    "comparison insight generation failed; using fallback"
                );
                fallback::comparison_insight(yours, competitor, self.max_suggestions)
            }
        }
    }

    async fn generate_single(
        &self,
        generator: &dyn TextGenerator,
        features: &BusinessFeatures,
    ) -> Result<Insight, InsightError> {
        let user = prompt::single_analysis(features);
        let reply = generator
            .generate(prompt::ANALYST_SYSTEM, &user, SINGLE_MAX_TOKENS)
            .await?;
        let parsed: Value = serde_json::from_str(&parse::extract_json(&reply))?;

        Ok(Insight {
            summary: summary_or(&parsed, format!("{} analysis completed.", features.name)),
            suggestions: self.string_list(&parsed, "suggestions"),
        })
    }

    async fn generate_comparison(
        &self,
        generator: &dyn TextGenerator,
        yours: &BusinessFeatures,
        competitor: &BusinessFeatures,
    ) -> Result<ComparisonInsight, InsightError> {
        let user = prompt::comparison(yours, competitor);
        let reply = generator
            .generate(prompt::COMPARISON_SYSTEM, &user, COMPARISON_MAX_TOKENS)
            .await?;
        let parsed: Value = serde_json::from_str(&parse::extract_json(&reply))?;

        Ok(ComparisonInsight {
            summary: summary_or(
                &parsed,
                format!("Comparison between {} and {}.", yours.name, competitor.name),
            ),
            suggestions: self.string_list(&parsed, "suggestions"),
            strengths: self.string_list(&parsed, "strengths"),
        })
    }

    /// String entries of a parsed array field, capped at the configured
    /// maximum. Non-string entries are dropped rather than failing.
    fn string_list(&self, parsed: &Value, key: &str) -> Vec<String> {
        parsed
            .get(key)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .take(self.max_suggestions)
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn summary_or(parsed: &Value, default: String) -> String {
    parsed
        .get("summary")
        .and_then(Value::as_str)
        .map_or(default, ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizlens_core::BusinessProfile;

    struct CannedGenerator {
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _system: &str,
            _user: &str,
            _max_tokens: u32,
        ) -> Result<String, InsightError> {
            self.reply
                .clone()
                .map_err(|()| InsightError::Generation("canned failure".to_owned()))
        }
    }

    fn features(name: &str, reviews: u32, score: f64) -> BusinessFeatures {
        let mut profile = BusinessProfile::new(name);
        profile.review_count = reviews;
        profile.average_rating = 4.0;
        BusinessFeatures::project(&profile, score)
    }

    fn with_reply(reply: &str) -> InsightGenerator {
        InsightGenerator::new(
            Some(Box::new(CannedGenerator {
                reply: Ok(reply.to_owned()),
            })),
            5,
        )
    }

    #[tokio::test]
    async fn parses_fenced_reply() {
        let generator = with_reply(
            "```json\n{\"summary\": \"Looks great\", \"suggestions\": [\"Add photos\"]}\n```",
        );
        let insight = generator.single(&features("Cafe Luna", 10, 50.0)).await;
        assert_eq!(insight.summary, "Looks great");
        assert_eq!(insight.suggestions, vec!["Add photos"]);
    }

    #[tokio::test]
    async fn missing_summary_gets_templated_default() {
        let generator = with_reply("{\"suggestions\": [\"One\"]}");
        let insight = generator.single(&features("Cafe Luna", 10, 50.0)).await;
        assert_eq!(insight.summary, "Cafe Luna analysis completed.");
    }

    #[tokio::test]
    async fn suggestions_are_capped() {
        let generator = InsightGenerator::new(
            Some(Box::new(CannedGenerator {
                reply: Ok(
                    "{\"summary\": \"s\", \"suggestions\": [\"1\",\"2\",\"3\",\"4\"]}".to_owned(),
                ),
            })),
            2,
        );
        let insight = generator.single(&features("Cafe Luna", 10, 50.0)).await;
        assert_eq!(insight.suggestions.len(), 2);
    }

    #[tokio::test]
    async fn generation_failure_falls_back() {
        let generator = InsightGenerator::new(Some(Box::new(CannedGenerator { reply: Err(()) })), 5);
        let insight = generator.single(&features("Cafe Luna", 10, 50.0)).await;
        assert!(!insight.summary.is_empty());
        assert!(insight.suggestions.len() <= 5);
    }

    #[tokio::test]
    async fn malformed_json_falls_back() {
        let generator = with_reply("I could not produce JSON, sorry!");
        let insight = generator.single(&features("Cafe Luna", 10, 50.0)).await;
        assert!(!insight.summary.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_generator_uses_fallback() {
        let generator = InsightGenerator::new(None, 5);
        let insight = generator.single(&features("Cafe Luna", 10, 50.0)).await;
        assert!(!insight.summary.is_empty());
        assert!(insight.suggestions.len() <= 5);

        let comparison = generator
            .compare(
                &features("Cafe Luna", 100, 80.0),
                &features("Bean Scene", 10, 60.0),
            )
            .await;
        assert!(!comparison.summary.is_empty());
        assert!(!comparison.strengths.is_empty());
    }

    #[tokio::test]
    async fn comparison_missing_summary_gets_templated_default() {
        let generator = with_reply("{\"strengths\": [\"More reviews\"]}");
        let insight = generator
            .compare(
                &features("Cafe Luna", 100, 80.0),
                &features("Bean Scene", 10, 60.0),
            )
            .await;
        assert_eq!(insight.summary, "Comparison between Cafe Luna and Bean Scene.");
        assert_eq!(insight.strengths, vec!["More reviews"]);
    }
}
