//! Deterministic rule-based insights.
//!
//! Used whenever the generative path is unconfigured or fails. Pure
//! functions of the feature set: no I/O, no randomness, same shape as the
//! generative output.

use bizlens_core::BusinessFeatures;

use crate::generator::{ComparisonInsight, Insight};

/// Review count below which growing volume is the top suggestion.
const LOW_REVIEW_VOLUME: u32 = 50;

/// Rating below which reputation work is suggested.
const LOW_RATING: f64 = 4.0;

/// Gallery size below which more photos are suggested.
const LOW_IMAGE_COUNT: u32 = 10;

/// Rule-based insight for one business.
#[must_use]
pub fn single_insight(features: &BusinessFeatures, max_suggestions: usize) -> Insight {
    let mut suggestions = Vec::new();

    if features.total_reviews < LOW_REVIEW_VOLUME {
        suggestions.push(
            "Encourage satisfied customers to leave Google reviews to build credibility."
                .to_owned(),
        );
    }
    if features.average_rating < LOW_RATING && features.total_reviews > 0 {
        suggestions.push(
            "Respond to critical reviews and address recurring complaints to lift the average rating."
                .to_owned(),
        );
    }
    if features.image_count < LOW_IMAGE_COUNT {
        suggestions
            .push("Add more photos of the storefront, products, and team to the listing.".to_owned());
    }
    if !features.has_description {
        suggestions
            .push("Write a short description highlighting what makes the business unique.".to_owned());
    }
    if !features.has_hours {
        suggestions.push("Publish business hours so customers know when to visit.".to_owned());
    }
    if !features.has_menu {
        suggestions.push("Publish a menu or product list with up-to-date offerings.".to_owned());
    }
    if !features.has_social_media {
        suggestions
            .push("Create social media profiles and link them from the listing.".to_owned());
    }
    if !features.has_phone {
        suggestions
            .push("Add a phone number so customers can reach the business directly.".to_owned());
    }
    if suggestions.is_empty() {
        suggestions.push(
            "Keep the profile fresh with new photos and timely responses to reviews.".to_owned(),
        );
    }
    suggestions.truncate(max_suggestions);

    Insight {
        summary: single_summary(features),
        suggestions,
    }
}

fn single_summary(features: &BusinessFeatures) -> String {
    let name = &features.name;
    let score = features.score;
    if score >= 80.0 {
        format!("{name} has a strong online presence with a profile score of {score}/100.")
    } else if score >= 60.0 {
        format!("{name} has a solid online presence with room to grow (profile score {score}/100).")
    } else if score >= 40.0 {
        format!("{name} has an incomplete online presence (profile score {score}/100).")
    } else {
        format!("{name} has significant gaps in its online presence (profile score {score}/100).")
    }
}

/// Rule-based comparison insight. Strengths list where the first business
/// beats the second; suggestions target the gaps running the other way.
#[must_use]
pub fn comparison_insight(
    yours: &BusinessFeatures,
    competitor: &BusinessFeatures,
    max_suggestions: usize,
) -> ComparisonInsight {
    let mut strengths = Vec::new();
    if yours.total_reviews > competitor.total_reviews {
        strengths.push(format!(
            "Stronger review volume ({} vs {})",
            yours.total_reviews, competitor.total_reviews
        ));
    }
    if yours.average_rating > competitor.average_rating {
        strengths.push(format!(
            "Higher average rating ({:.1} vs {:.1})",
            yours.average_rating, competitor.average_rating
        ));
    }
    if yours.image_count > competitor.image_count {
        strengths.push(format!(
            "Larger photo gallery ({} vs {})",
            yours.image_count, competitor.image_count
        ));
    }
    if yours.has_hours && !competitor.has_hours {
        strengths.push("Business hours are published; the competitor's are not".to_owned());
    }
    if yours.has_menu && !competitor.has_menu {
        strengths.push("Menu is available online; the competitor's is not".to_owned());
    }
    if yours.has_description && !competitor.has_description {
        strengths.push("Profile has a description; the competitor's does not".to_owned());
    }
    if yours.score > competitor.score {
        strengths.push(format!(
            "Higher overall profile score ({:.1} vs {:.1})",
            yours.score, competitor.score
        ));
    }
    strengths.truncate(max_suggestions);

    let mut suggestions = Vec::new();
    if yours.total_reviews < competitor.total_reviews {
        suggestions.push(format!(
            "Close the review gap: encourage more customers to leave reviews ({} vs {}).",
            yours.total_reviews, competitor.total_reviews
        ));
    }
    if yours.average_rating < competitor.average_rating {
        suggestions.push(format!(
            "Improve service quality to lift the rating toward the competitor's {:.1}.",
            competitor.average_rating
        ));
    }
    if yours.image_count < competitor.image_count {
        suggestions.push(format!(
            "Add photos to match the competitor's gallery of {}.",
            competitor.image_count
        ));
    }
    if !yours.has_hours && competitor.has_hours {
        suggestions.push("Publish business hours; the competitor already lists theirs.".to_owned());
    }
    if !yours.has_menu && competitor.has_menu {
        suggestions.push("Publish a menu; the competitor already has one online.".to_owned());
    }
    if !yours.has_description && competitor.has_description {
        suggestions
            .push("Add a profile description; the competitor already has one.".to_owned());
    }
    if !yours.has_social_media && competitor.has_social_media {
        suggestions.push(
            "Build a social media presence; the competitor is already active there.".to_owned(),
        );
    }
    if suggestions.is_empty() {
        suggestions.push(
            "Maintain the current advantage by keeping the profile active and responsive."
                .to_owned(),
        );
    }
    suggestions.truncate(max_suggestions);

    ComparisonInsight {
        summary: comparison_summary(yours, competitor),
        suggestions,
        strengths,
    }
}

fn comparison_summary(yours: &BusinessFeatures, competitor: &BusinessFeatures) -> String {
    let (a, b) = (&yours.name, &competitor.name);
    let (x, y) = (yours.score, competitor.score);
    if x > y {
        format!("{a} leads {b} with a profile score of {x}/100 versus {y}/100.")
    } else if x < y {
        format!("{a} trails {b} with a profile score of {x}/100 versus {y}/100.")
    } else {
        format!("{a} and {b} are evenly matched at {x}/100.")
    }
}
