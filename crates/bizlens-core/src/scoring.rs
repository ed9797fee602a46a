//! Deterministic completeness/performance score.
//!
//! Pure functions from a [`BusinessProfile`] to a score in `[0, 100]` with
//! one decimal of precision. Three weighted components: review volume and
//! quality, content completeness, and image count. The weights are
//! configuration, not part of the algorithm, and must sum to 1.0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::BusinessProfile;

/// Tolerance when validating that weights sum to 1.0.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Total reviews at which the volume term saturates.
const REVIEW_SATURATION: f64 = 100.0;

/// Image count at which the image component saturates.
const IMAGE_SATURATION: f64 = 30.0;

#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("score weights must sum to 1.0, got {0}")]
    InvalidSum(f64),

    #[error("score weights must be non-negative, got {0}")]
    Negative(f64),
}

/// Relative budget of each scoring component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub reviews: f64,
    pub content: f64,
    pub images: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            reviews: 0.4,
            content: 0.4,
            images: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Builds validated weights.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError`] if any weight is negative or the weights do
    /// not sum to 1.0 (within a small epsilon).
    pub fn new(reviews: f64, content: f64, images: f64) -> Result<Self, WeightsError> {
        for w in [reviews, content, images] {
            if w < 0.0 {
                return Err(WeightsError::Negative(w));
            }
        }
        let sum = reviews + content + images;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(WeightsError::InvalidSum(sum));
        }
        Ok(Self {
            reviews,
            content,
            images,
        })
    }
}

/// Computes the overall 0–100 score, rounded to one decimal place.
///
/// Pure and deterministic: the same profile and weights always produce the
/// same score.
#[must_use]
pub fn score(profile: &BusinessProfile, weights: &ScoreWeights) -> f64 {
    let total = review_score(profile, weights.reviews * 100.0)
        + content_score(profile, weights.content * 100.0)
        + image_score(profile, weights.images * 100.0);
    (total.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

/// Review component: zero without reviews, otherwise half the budget ramps
/// linearly with volume (saturating at 100 total reviews) and half scales
/// with the average rating out of 5.
#[must_use]
pub fn review_score(profile: &BusinessProfile, budget: f64) -> f64 {
    let total_reviews = f64::from(profile.total_reviews());
    if total_reviews <= 0.0 {
        return 0.0;
    }

    let half = budget / 2.0;
    let volume = (total_reviews / REVIEW_SATURATION * half).min(half);
    let quality = profile.average_rating / 5.0 * half;
    volume + quality
}

/// Content component: weighted completeness buckets plus two bonus buckets,
/// capped at the full budget.
#[must_use]
pub fn content_score(profile: &BusinessProfile, budget: f64) -> f64 {
    let basic_items = [
        !profile.phone.is_empty(),
        !profile.email.is_empty(),
        !profile.address.is_empty(),
        !profile.city.is_empty(),
        !profile.state.is_empty(),
        !profile.website.is_empty(),
        !profile.description.is_empty(),
        !profile.category.is_empty(),
    ];

    let operations_items = [
        profile.has_hours,
        profile.is_open,
        !profile.business_hours.is_empty(),
        profile.established_year.is_some(),
    ];

    let content_items = [
        profile.has_description,
        profile.has_menu,
        profile.image_count > 10,
        // A menu without a link is a gap; without a menu the item is free.
        if profile.has_menu {
            !profile.menu_url.is_empty()
        } else {
            true
        },
    ];

    let service_items = [
        profile.offers_dine_in || profile.offers_takeout || profile.offers_delivery,
        // Price tier always carries a defaulted value after normalization.
        true,
        !profile.cuisine_type.is_empty(),
    ];

    let feature_items = [
        profile.has_parking,
        profile.wheelchair_accessible,
        profile.has_wifi,
        profile.accepts_credit_cards,
        !profile.special_features.is_empty(),
        !profile.popular_dishes.is_empty(),
    ];

    let social_items = [
        !profile.facebook_url.is_empty(),
        !profile.instagram_url.is_empty(),
        !profile.twitter_url.is_empty(),
    ];

    let completeness = fraction(&basic_items) * 0.4
        + fraction(&operations_items) * 0.3
        + fraction(&content_items) * 0.2
        + fraction(&service_items) * 0.1
        + fraction(&feature_items) * 0.05
        + fraction(&social_items) * 0.05;

    completeness.min(1.0) * budget
}

/// Image component: linear ramp saturating at 30 images.
#[must_use]
pub fn image_score(profile: &BusinessProfile, budget: f64) -> f64 {
    (f64::from(profile.image_count) / IMAGE_SATURATION * budget).min(budget)
}

/// Share of items that are true, in `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
fn fraction(items: &[bool]) -> f64 {
    let set = items.iter().filter(|on| **on).count();
    set as f64 / items.len() as f64
}
