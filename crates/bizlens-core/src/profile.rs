//! Canonical business profile entity.
//!
//! A [`BusinessProfile`] is built fresh per request by the normalizer,
//! treated as immutable input by the scoring engine and insight generator,
//! and discarded after the response is assembled. Derived values
//! (`total_reviews`, `full_address`) are computed on demand and never stored,
//! so they cannot drift from their components.

use serde::{Deserialize, Serialize};

/// Generic category applied when the raw record carries no type list.
pub const DEFAULT_CATEGORY: &str = "Business";

/// Country applied when the raw record yields no address-derived country.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Ordered price tier, displayed as `$`..`$$$$`.
///
/// Unknown or absent raw values default to [`PriceTier::Moderate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Budget,
    #[default]
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceTier {
    /// Parses a raw price string (e.g. `"$$"` or `"$$$ · Steakhouse"`) by
    /// counting leading dollar signs. Returns `None` for strings with no
    /// dollar signs so callers can apply the default tier.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let dollars = raw.chars().take_while(|c| *c == '$').count();
        match dollars {
            0 => None,
            1 => Some(Self::Budget),
            2 => Some(Self::Moderate),
            3 => Some(Self::Upscale),
            _ => Some(Self::Luxury),
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Moderate => "$$",
            Self::Upscale => "$$$",
            Self::Luxury => "$$$$",
        }
    }
}

/// One gallery image attached to a profile (gallery is capped at 10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub url: String,
    pub title: String,
    /// Where the image came from: `"Google"` for primary-record images,
    /// `"Google Photos"` for the secondary photos lookup.
    pub source: String,
}

/// One review excerpt attached to a profile (list is capped at 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewExcerpt {
    pub rating: f64,
    pub text: String,
    pub author: String,
    pub date: String,
    pub source: String,
}

/// Canonical normalized business record.
///
/// Every field has an explicit default so a fetch failure still yields a
/// complete, well-shaped (if empty) profile. String fields use `""` for
/// absent rather than `Option` to mirror how the upstream record treats
/// missing text; `established_year` is genuinely optional because no source
/// field exists for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // each flag is a distinct completeness dimension
pub struct BusinessProfile {
    pub name: String,
    pub category: String,
    pub description: String,
    pub established_year: Option<i32>,
    pub cuisine_type: String,

    pub phone: String,
    pub email: String,
    pub website: String,

    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,

    /// Business hours stored verbatim from the raw record (one entry per day).
    pub business_hours: Vec<serde_json::Value>,
    pub is_open: bool,
    pub temporarily_closed: bool,

    pub price_range: PriceTier,
    pub offers_delivery: bool,
    pub offers_takeout: bool,
    pub offers_dine_in: bool,
    pub accepts_reservations: bool,

    pub review_count: u32,
    pub google_reviews: u32,
    pub yelp_reviews: u32,
    pub average_rating: f64,

    pub image_count: u32,
    pub images: Vec<ProfileImage>,
    pub reviews: Vec<ReviewExcerpt>,
    pub has_hours: bool,
    pub has_description: bool,
    pub has_menu: bool,
    pub menu_url: String,

    pub has_parking: bool,
    pub wheelchair_accessible: bool,
    pub has_wifi: bool,
    pub accepts_credit_cards: bool,
    pub outdoor_seating: bool,
    pub special_features: Vec<String>,
    pub popular_dishes: Vec<String>,

    pub facebook_url: String,
    pub instagram_url: String,
    pub twitter_url: String,

    /// Correlation id used for the secondary reviews/photos lookups.
    pub data_id: String,
    pub place_id: String,
}

impl BusinessProfile {
    /// An empty profile carrying only the requested name and defaults.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            category: DEFAULT_CATEGORY.to_owned(),
            description: String::new(),
            established_year: None,
            cuisine_type: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_owned(),
            business_hours: Vec::new(),
            is_open: true,
            temporarily_closed: false,
            price_range: PriceTier::default(),
            offers_delivery: false,
            offers_takeout: false,
            offers_dine_in: false,
            accepts_reservations: false,
            review_count: 0,
            google_reviews: 0,
            yelp_reviews: 0,
            average_rating: 0.0,
            image_count: 0,
            images: Vec::new(),
            reviews: Vec::new(),
            has_hours: false,
            has_description: false,
            has_menu: false,
            menu_url: String::new(),
            has_parking: false,
            wheelchair_accessible: false,
            has_wifi: false,
            accepts_credit_cards: false,
            outdoor_seating: false,
            special_features: Vec::new(),
            popular_dishes: Vec::new(),
            facebook_url: String::new(),
            instagram_url: String::new(),
            twitter_url: String::new(),
            data_id: String::new(),
            place_id: String::new(),
        }
    }

    /// Sum of Google, Yelp, and generic review counts. Always derived.
    #[must_use]
    pub const fn total_reviews(&self) -> u32 {
        self.review_count + self.google_reviews + self.yelp_reviews
    }

    /// Comma-joined address from the non-empty components, in fixed order:
    /// street, city, state, postal code. Never contains empty segments or
    /// stray separators.
    #[must_use]
    pub fn full_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Number of service options offered (delivery/takeout/dine-in/reservations).
    #[must_use]
    pub fn service_options_count(&self) -> usize {
        [
            self.offers_delivery,
            self.offers_takeout,
            self.offers_dine_in,
            self.accepts_reservations,
        ]
        .into_iter()
        .filter(|on| *on)
        .count()
    }

    /// Number of social profile links present.
    #[must_use]
    pub fn social_media_count(&self) -> usize {
        [&self.facebook_url, &self.instagram_url, &self.twitter_url]
            .into_iter()
            .filter(|url| !url.is_empty())
            .count()
    }
}

/// Serializable response view of a profile.
///
/// Includes the derived `full_address` and `total_reviews` alongside the
/// stored fields, so API consumers never re-derive them.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub website: String,
    pub description: String,
    pub category: String,
    pub established_year: Option<i32>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub full_address: String,
    pub business_hours: Vec<serde_json::Value>,
    pub is_open: bool,
    pub temporarily_closed: bool,
    pub price_range: PriceTier,
    pub cuisine_type: String,
    pub offers_delivery: bool,
    pub offers_takeout: bool,
    pub offers_dine_in: bool,
    pub accepts_reservations: bool,
    pub facebook_url: String,
    pub instagram_url: String,
    pub twitter_url: String,
    pub review_count: u32,
    pub google_reviews: u32,
    pub yelp_reviews: u32,
    pub total_reviews: u32,
    pub average_rating: f64,
    pub reviews: Vec<ReviewExcerpt>,
    pub image_count: u32,
    pub images: Vec<ProfileImage>,
    pub has_hours: bool,
    pub has_description: bool,
    pub has_menu: bool,
    pub menu_url: String,
    pub has_parking: bool,
    pub wheelchair_accessible: bool,
    pub has_wifi: bool,
    pub accepts_credit_cards: bool,
    pub outdoor_seating: bool,
    pub special_features: Vec<String>,
    pub popular_dishes: Vec<String>,
    pub data_id: String,
    pub place_id: String,
}

impl From<&BusinessProfile> for ProfileView {
    fn from(p: &BusinessProfile) -> Self {
        Self {
            name: p.name.clone(),
            website: p.website.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            established_year: p.established_year,
            phone: p.phone.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
            city: p.city.clone(),
            state: p.state.clone(),
            postal_code: p.postal_code.clone(),
            country: p.country.clone(),
            full_address: p.full_address(),
            business_hours: p.business_hours.clone(),
            is_open: p.is_open,
            temporarily_closed: p.temporarily_closed,
            price_range: p.price_range,
            cuisine_type: p.cuisine_type.clone(),
            offers_delivery: p.offers_delivery,
            offers_takeout: p.offers_takeout,
            offers_dine_in: p.offers_dine_in,
            accepts_reservations: p.accepts_reservations,
            facebook_url: p.facebook_url.clone(),
            instagram_url: p.instagram_url.clone(),
            twitter_url: p.twitter_url.clone(),
            review_count: p.review_count,
            google_reviews: p.google_reviews,
            yelp_reviews: p.yelp_reviews,
            total_reviews: p.total_reviews(),
            average_rating: p.average_rating,
            reviews: p.reviews.clone(),
            image_count: p.image_count,
            images: p.images.clone(),
            has_hours: p.has_hours,
            has_description: p.has_description,
            has_menu: p.has_menu,
            menu_url: p.menu_url.clone(),
            has_parking: p.has_parking,
            wheelchair_accessible: p.wheelchair_accessible,
            has_wifi: p.has_wifi,
            accepts_credit_cards: p.accepts_credit_cards,
            outdoor_seating: p.outdoor_seating,
            special_features: p.special_features.clone(),
            popular_dishes: p.popular_dishes.clone(),
            data_id: p.data_id.clone(),
            place_id: p.place_id.clone(),
        }
    }
}
