//! Flattened feature view of a profile.
//!
//! Both the single-business and comparison flows feed the insight generator
//! the same derived summary (counts and booleans instead of raw lists), so
//! the projection lives here once instead of being rebuilt per flow.

use serde::{Deserialize, Serialize};

use crate::profile::{BusinessProfile, PriceTier};

/// Derived summary of a profile plus its score. Input to insight generation
/// only; never persisted or returned to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // mirrors the profile's completeness flags
pub struct BusinessFeatures {
    pub name: String,
    pub category: String,
    pub cuisine_type: String,
    pub price_range: PriceTier,
    pub established_year: Option<i32>,

    pub has_phone: bool,
    pub has_email: bool,
    pub has_address: bool,
    pub city: String,
    pub state: String,
    pub website: String,

    pub is_open: bool,
    pub temporarily_closed: bool,
    pub has_hours: bool,
    pub has_business_hours: bool,

    pub offers_delivery: bool,
    pub offers_takeout: bool,
    pub offers_dine_in: bool,
    pub accepts_reservations: bool,
    pub service_options_count: usize,

    pub review_count: u32,
    pub google_reviews: u32,
    pub yelp_reviews: u32,
    pub total_reviews: u32,
    pub average_rating: f64,

    pub image_count: u32,
    pub has_description: bool,
    pub has_menu: bool,
    pub has_menu_url: bool,

    pub has_parking: bool,
    pub wheelchair_accessible: bool,
    pub has_wifi: bool,
    pub accepts_credit_cards: bool,
    pub outdoor_seating: bool,
    pub special_features_count: usize,
    pub popular_dishes_count: usize,

    pub has_social_media: bool,
    pub social_media_count: usize,

    pub score: f64,
}

impl BusinessFeatures {
    /// Projects a profile and its score into the flattened feature view.
    #[must_use]
    pub fn project(profile: &BusinessProfile, score: f64) -> Self {
        Self {
            name: profile.name.clone(),
            category: profile.category.clone(),
            cuisine_type: profile.cuisine_type.clone(),
            price_range: profile.price_range,
            established_year: profile.established_year,
            has_phone: !profile.phone.is_empty(),
            has_email: !profile.email.is_empty(),
            has_address: !profile.address.is_empty(),
            city: profile.city.clone(),
            state: profile.state.clone(),
            website: profile.website.clone(),
            is_open: profile.is_open,
            temporarily_closed: profile.temporarily_closed,
            has_hours: profile.has_hours,
            has_business_hours: !profile.business_hours.is_empty(),
            offers_delivery: profile.offers_delivery,
            offers_takeout: profile.offers_takeout,
            offers_dine_in: profile.offers_dine_in,
            accepts_reservations: profile.accepts_reservations,
            service_options_count: profile.service_options_count(),
            review_count: profile.review_count,
            google_reviews: profile.google_reviews,
            yelp_reviews: profile.yelp_reviews,
            total_reviews: profile.total_reviews(),
            average_rating: profile.average_rating,
            image_count: profile.image_count,
            has_description: profile.has_description,
            has_menu: profile.has_menu,
            has_menu_url: !profile.menu_url.is_empty(),
            has_parking: profile.has_parking,
            wheelchair_accessible: profile.wheelchair_accessible,
            has_wifi: profile.has_wifi,
            accepts_credit_cards: profile.accepts_credit_cards,
            outdoor_seating: profile.outdoor_seating,
            special_features_count: profile.special_features.len(),
            popular_dishes_count: profile.popular_dishes.len(),
            has_social_media: profile.social_media_count() > 0,
            social_media_count: profile.social_media_count(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_flattens_lists_to_counts() {
        let mut profile = BusinessProfile::new("Cafe Luna");
        profile.phone = "+1 555 0100".to_owned();
        profile.special_features = vec!["Patio".to_owned(), "Live music".to_owned()];
        profile.popular_dishes = vec!["Latte".to_owned()];
        profile.facebook_url = "https://facebook.com/cafeluna".to_owned();
        profile.review_count = 12;
        profile.google_reviews = 3;

        let features = BusinessFeatures::project(&profile, 42.5);
        assert!(features.has_phone);
        assert!(!features.has_email);
        assert_eq!(features.special_features_count, 2);
        assert_eq!(features.popular_dishes_count, 1);
        assert_eq!(features.total_reviews, 15);
        assert!(features.has_social_media);
        assert_eq!(features.social_media_count, 1);
        assert!((features.score - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn project_counts_service_options() {
        let mut profile = BusinessProfile::new("Cafe Luna");
        profile.offers_takeout = true;
        profile.offers_delivery = true;
        let features = BusinessFeatures::project(&profile, 0.0);
        assert_eq!(features.service_options_count, 2);
        assert!(!features.offers_dine_in);
    }
}
