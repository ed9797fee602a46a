//! Orchestration of the fetch → normalize → score → insight pipeline.
//!
//! The pipeline is total: fetch failures degrade to a default profile,
//! insight failures degrade to the rule-based fallback, so both entry
//! points always return a complete report.

use bizlens_core::{score, AppConfig, BusinessFeatures, ProfileView, ScoreWeights};
use bizlens_insight::{ComparisonInsight, Insight, InsightGenerator, OpenAiClient};
use bizlens_places::{normalize_place, NormalizeOptions, PlaceSource, SerpApiClient};
use serde::Serialize;

/// Full analysis of one business.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub business: ProfileView,
    pub analysis: Insight,
    pub score: f64,
}

/// Head-to-head comparison of two businesses.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub your_business: ProfileView,
    pub competitor: ProfileView,
    pub comparison: ComparisonInsight,
    pub your_score: f64,
    pub competitor_score: f64,
}

/// Shared pipeline for the analyze and compare flows.
pub struct Analyzer {
    source: Box<dyn PlaceSource>,
    insight: InsightGenerator,
    weights: ScoreWeights,
    options: NormalizeOptions,
}

impl Analyzer {
    #[must_use]
    pub fn new(
        source: Box<dyn PlaceSource>,
        insight: InsightGenerator,
        weights: ScoreWeights,
        options: NormalizeOptions,
    ) -> Self {
        Self {
            source,
            insight,
            weights,
            options,
        }
    }

    /// Wires the production collaborators from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails only on client construction, before any request is made.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let source = SerpApiClient::with_base_url(
            &config.serpapi_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.serpapi_base_url,
        )?;

        let generator = match &config.openai_api_key {
            Some(key) => Some(Box::new(OpenAiClient::with_base_url(
                key,
                &config.openai_model,
                config.request_timeout_secs,
                &config.user_agent,
                &config.openai_base_url,
            )?) as Box<dyn bizlens_insight::TextGenerator>),
            None => None,
        };
        let insight = InsightGenerator::new(generator, config.max_suggestions);

        Ok(Self::new(
            Box::new(source),
            insight,
            config.score_weights,
            NormalizeOptions::default(),
        ))
    }

    /// Analyzes one business end to end.
    pub async fn analyze(&self, name: &str, website: Option<&str>) -> AnalysisReport {
        let (view, features) = self.profile_pass(name, website).await;
        let analysis = self.insight.single(&features).await;
        tracing::info!(business = name, score = features.score, "analysis complete");
        AnalysisReport {
            business: view,
            analysis,
            score: features.score,
        }
    }

    /// Compares two businesses. Both sides run the full pipeline
    /// independently, concurrently, without sharing fetch results.
    pub async fn compare(
        &self,
        your_name: &str,
        your_website: Option<&str>,
        competitor_name: &str,
        competitor_website: Option<&str>,
    ) -> ComparisonReport {
        let (yours, competitor) = tokio::join!(
            self.profile_pass(your_name, your_website),
            self.profile_pass(competitor_name, competitor_website),
        );
        let comparison = self.insight.compare(&yours.1, &competitor.1).await;
        tracing::info!(
            business = your_name,
            competitor = competitor_name,
            your_score = yours.1.score,
            competitor_score = competitor.1.score,
            "comparison complete"
        );
        ComparisonReport {
            your_business: yours.0,
            competitor: competitor.0,
            comparison,
            your_score: yours.1.score,
            competitor_score: competitor.1.score,
        }
    }

    /// Fetch, normalize, and score one business. The website hint only
    /// fills in when the place record did not carry one.
    async fn profile_pass(
        &self,
        name: &str,
        website: Option<&str>,
    ) -> (ProfileView, BusinessFeatures) {
        let raw = self.source.search_place(name).await;
        let mut profile = normalize_place(name, raw, self.source.as_ref(), &self.options).await;
        if profile.website.is_empty() {
            if let Some(site) = website {
                profile.website = site.to_owned();
            }
        }
        let profile_score = score(&profile, &self.weights);
        let features = BusinessFeatures::project(&profile, profile_score);
        ((&profile).into(), features)
    }
}
