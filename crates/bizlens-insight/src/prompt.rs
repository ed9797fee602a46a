//! Prompt templates for the generative path.

use bizlens_core::BusinessFeatures;

pub const ANALYST_SYSTEM: &str = "You are a business consultant expert in \
online presence optimization and customer acquisition.";

pub const COMPARISON_SYSTEM: &str = "You are a competitive business analyst \
expert in market positioning and competitive strategy.";

/// Prompt for a single-business analysis. Asks for a bare JSON object with
/// `summary` and `suggestions`.
#[must_use]
pub fn single_analysis(features: &BusinessFeatures) -> String {
    format!(
        "You are a business consultant analyzing an online business profile. \
Provide actionable insights and suggestions.\n\
\n\
Business Data:\n\
- Name: {name}\n\
- Category: {category}\n\
- Reviews: {reviews} reviews\n\
- Rating: {rating}/5 stars\n\
- Photos: {images} images\n\
- Has business hours: {has_hours}\n\
- Has description: {has_description}\n\
- Has menu: {has_menu}\n\
- Has phone number: {has_phone}\n\
- Has address: {has_address}\n\
- Website: {website}\n\
- Current Profile Score: {score}/100\n\
\n\
Please provide:\n\
1. A brief 1-2 sentence summary of the business's online presence\n\
2. 3-5 specific, actionable suggestions to improve their online presence \
and attract more customers\n\
\n\
Focus on practical improvements that would have the most impact on customer \
acquisition and retention. Be specific and avoid generic advice.\n\
\n\
Respond in JSON format:\n\
{{\n\
    \"summary\": \"Brief summary here\",\n\
    \"suggestions\": [\"Suggestion 1\", \"Suggestion 2\", \"Suggestion 3\"]\n\
}}",
        name = features.name,
        category = features.category,
        reviews = features.review_count,
        rating = features.average_rating,
        images = features.image_count,
        has_hours = features.has_hours,
        has_description = features.has_description,
        has_menu = features.has_menu,
        has_phone = features.has_phone,
        has_address = features.has_address,
        website = features.website,
        score = features.score,
    )
}

/// Prompt for a head-to-head comparison. Asks for `summary`, `strengths`,
/// and `suggestions`.
#[must_use]
pub fn comparison(yours: &BusinessFeatures, competitor: &BusinessFeatures) -> String {
    format!(
        "You are a competitive business analyst. Compare these two businesses \
and provide strategic insights.\n\
\n\
Your Business:\n\
{yours}\n\
\n\
Competitor:\n\
{competitor}\n\
\n\
Provide:\n\
1. A summary comparing the two businesses\n\
2. Specific areas where your business is stronger than the competitor\n\
3. 3-5 actionable suggestions to gain competitive advantage\n\
\n\
Focus on data-driven insights and specific recommendations.\n\
\n\
Respond in JSON format:\n\
{{\n\
    \"summary\": \"Competitive analysis summary\",\n\
    \"strengths\": [\"Strength 1\", \"Strength 2\"],\n\
    \"suggestions\": [\"Suggestion 1\", \"Suggestion 2\", \"Suggestion 3\"]\n\
}}",
        yours = side_block(yours),
        competitor = side_block(competitor),
    )
}

fn side_block(features: &BusinessFeatures) -> String {
    format!(
        "- Name: {name}\n\
- Reviews: {reviews} ({rating}/5 stars)\n\
- Photos: {images}\n\
- Complete info (hours/description/menu): {hours}/{description}/{menu}\n\
- Profile Score: {score}/100",
        name = features.name,
        reviews = features.review_count,
        rating = features.average_rating,
        images = features.image_count,
        hours = features.has_hours,
        description = features.has_description,
        menu = features.has_menu,
        score = features.score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizlens_core::{BusinessFeatures, BusinessProfile};

    fn features(name: &str) -> BusinessFeatures {
        let mut profile = BusinessProfile::new(name);
        profile.review_count = 42;
        profile.average_rating = 4.2;
        BusinessFeatures::project(&profile, 55.5)
    }

    #[test]
    fn single_prompt_embeds_feature_values() {
        let prompt = single_analysis(&features("Cafe Luna"));
        assert!(prompt.contains("- Name: Cafe Luna"));
        assert!(prompt.contains("- Reviews: 42 reviews"));
        assert!(prompt.contains("- Rating: 4.2/5 stars"));
        assert!(prompt.contains("Score: 55.5/100"));
        assert!(prompt.contains("\"suggestions\""));
    }

    #[test]
    fn comparison_prompt_embeds_both_sides() {
        let prompt = comparison(&features("Cafe Luna"), &features("Bean Scene"));
        assert!(prompt.contains("- Name: Cafe Luna"));
        assert!(prompt.contains("- Name: Bean Scene"));
        assert!(prompt.contains("\"strengths\""));
    }
}
