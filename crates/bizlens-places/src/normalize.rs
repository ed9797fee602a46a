//! Normalization from raw SerpAPI place records to [`BusinessProfile`].
//!
//! The raw record is an arbitrarily-shaped JSON object (or nothing at all,
//! on fetch failure). Normalization is a sequence of independent,
//! individually-defaulted derivation steps: a malformed sub-field costs only
//! its own field, never the rest of the profile, and the function as a whole
//! cannot fail. Extension-tag detection is delegated to
//! [`crate::extensions`].

use bizlens_core::{BusinessProfile, PriceTier, ProfileImage, ReviewExcerpt};
use rand::Rng;
use serde_json::{Map, Value};

use crate::extensions::scan_extensions;
use crate::source::PlaceSource;

/// Gallery cap on normalized images.
const MAX_IMAGES: usize = 10;

/// Cap on stored review excerpts.
const MAX_REVIEW_EXCERPTS: usize = 5;

/// Image titles that mark a menu photo (compared lowercased).
const MENU_IMAGE_TITLES: &[&str] = &["menu", "food & drink"];

/// Offering keywords that imply a menu exists (matched against the
/// lowercased, space-joined offerings list).
const MENU_KEYWORDS: &[&str] = &[
    "menu",
    "food",
    "drinks",
    "coffee",
    "breakfast",
    "lunch",
    "dinner",
];

/// How to fill the established year, which no source field provides.
///
/// The upstream data has nothing to derive this from, so the default
/// fabricates a plausible recent year. Tests (and callers that prefer an
/// honest "unknown") use [`YearPolicy::Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearPolicy {
    /// A year drawn uniformly from `min..=max` on every normalization.
    Uniform { min: i32, max: i32 },
    /// Always the given value; `None` leaves the field unset.
    Fixed(Option<i32>),
}

impl Default for YearPolicy {
    fn default() -> Self {
        Self::Uniform {
            min: 2010,
            max: 2022,
        }
    }
}

impl YearPolicy {
    fn placeholder(self) -> Option<i32> {
        match self {
            Self::Uniform { min, max } => Some(rand::rng().random_range(min..=max)),
            Self::Fixed(year) => year,
        }
    }
}

/// Knobs for the normalization pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub year_policy: YearPolicy,
}

/// Converts a raw place record into a canonical profile.
///
/// Total: absent records, non-object records, and missing fields all default
/// rather than fail. When the record carries a `data_id`, supplementary
/// review and photo lookups go through `source` (which absorbs its own
/// transport failures per the [`PlaceSource`] contract).
pub async fn normalize_place<S: PlaceSource + ?Sized>(
    name: &str,
    raw: Option<Value>,
    source: &S,
    options: &NormalizeOptions,
) -> BusinessProfile {
    let mut profile = BusinessProfile::new(name);

    let Some(raw) = raw else {
        tracing::debug!(business = name, "no raw place record; returning default profile");
        return profile;
    };
    let Some(record) = raw.as_object() else {
        tracing::warn!(business = name, "raw place record is not a JSON object");
        return profile;
    };
    tracing::debug!(
        business = name,
        keys = %top_level_keys(record),
        "normalizing raw place record"
    );

    apply_identity_and_contact(&mut profile, record);
    apply_primary_images(&mut profile, record);
    fetch_supplementary(&mut profile, source).await;
    if profile.reviews.is_empty() {
        apply_embedded_reviews(&mut profile, record);
    }
    apply_hours(&mut profile, record);
    apply_category(&mut profile, record);
    apply_description(&mut profile, record);
    apply_menu(&mut profile, record);
    apply_service_options(&mut profile, record);
    scan_extensions(&mut profile, array(record, "extensions"));
    apply_price(&mut profile, record);
    profile.established_year = options.year_policy.placeholder();
    apply_cuisine(&mut profile, record);
    apply_open_state(&mut profile, record);
    apply_geo_locality(&mut profile, record);

    profile
}

fn apply_identity_and_contact(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    profile.address = text(record, "address");
    profile.phone = text(record, "phone");
    profile.website = text(record, "website");
    profile.description = text(record, "description");
    profile.data_id = text(record, "data_id");
    profile.place_id = text(record, "place_id");
    profile.average_rating = number(record, "rating").clamp(0.0, 5.0);
    profile.review_count = count(record, "reviews");
}

/// Gallery from the primary record: the first 10 entries that are objects
/// with a thumbnail URL. The image count reflects every entry in the raw
/// payload, not the truncated gallery.
fn apply_primary_images(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let images = array(record, "images");
    profile.image_count = u32::try_from(images.len()).unwrap_or(u32::MAX);
    profile.images = images
        .iter()
        .take(MAX_IMAGES)
        .filter_map(|entry| {
            let image = entry.as_object()?;
            let thumbnail = image
                .get("thumbnail")
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())?;
            Some(ProfileImage {
                url: thumbnail.to_owned(),
                title: text(image, "title"),
                source: "Google".to_owned(),
            })
        })
        .collect();
}

/// Secondary lookups keyed by the correlation id: reviews always refresh the
/// excerpt list; photos only fill the gallery when the primary record had
/// none.
async fn fetch_supplementary<S: PlaceSource + ?Sized>(profile: &mut BusinessProfile, source: &S) {
    if profile.data_id.is_empty() {
        return;
    }

    let fetched = source
        .place_reviews(&profile.data_id, MAX_REVIEW_EXCERPTS)
        .await;
    profile.reviews = fetched
        .iter()
        .take(MAX_REVIEW_EXCERPTS)
        .filter_map(normalize_fetched_review)
        .collect();

    if profile.images.is_empty() {
        let photos = source.place_photos(&profile.data_id).await;
        profile.images = photos
            .iter()
            .take(MAX_IMAGES)
            .filter_map(|entry| {
                let photo = entry.as_object()?;
                let url = photo
                    .get("thumbnail")
                    .and_then(Value::as_str)
                    .or_else(|| photo.get("url").and_then(Value::as_str))
                    .unwrap_or_default();
                Some(ProfileImage {
                    url: url.to_owned(),
                    title: text(photo, "title"),
                    source: "Google Photos".to_owned(),
                })
            })
            .collect();
    }
}

fn normalize_fetched_review(entry: &Value) -> Option<ReviewExcerpt> {
    let review = entry.as_object()?;
    let body = review
        .get("snippet")
        .and_then(Value::as_str)
        .or_else(|| review.get("text").and_then(Value::as_str))
        .unwrap_or_default();
    let author = review
        .get("user")
        .and_then(|user| user.get("name"))
        .and_then(Value::as_str)
        .or_else(|| review.get("author_name").and_then(Value::as_str))
        .unwrap_or("Anonymous");
    let date = review
        .get("date")
        .and_then(Value::as_str)
        .or_else(|| review.get("relative_time_description").and_then(Value::as_str))
        .unwrap_or_default();
    Some(ReviewExcerpt {
        rating: review.get("rating").and_then(Value::as_f64).unwrap_or(0.0),
        text: body.to_owned(),
        author: author.to_owned(),
        date: date.to_owned(),
        source: "Google".to_owned(),
    })
}

/// Tertiary extraction from the record's own `user_reviews.most_relevant`
/// section, used only when the correlation-id lookup yielded nothing.
fn apply_embedded_reviews(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let most_relevant = record
        .get("user_reviews")
        .and_then(|reviews| reviews.get("most_relevant"))
        .and_then(Value::as_array);
    let Some(entries) = most_relevant else {
        return;
    };

    profile.reviews = entries
        .iter()
        .take(MAX_REVIEW_EXCERPTS)
        .filter_map(|entry| {
            let review = entry.as_object()?;
            Some(ReviewExcerpt {
                rating: review.get("rating").and_then(Value::as_f64).unwrap_or(0.0),
                text: text(review, "description"),
                author: review
                    .get("username")
                    .and_then(Value::as_str)
                    .unwrap_or("Anonymous")
                    .to_owned(),
                date: text(review, "date"),
                source: "Google".to_owned(),
            })
        })
        .collect();
}

fn apply_hours(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let hours = array(record, "hours");
    profile.has_hours = !hours.is_empty();
    if profile.has_hours {
        profile.business_hours = hours.to_vec();
    }
}

/// Category: first entry of the `type` list, or the whole value when the
/// source sends a bare string. The generic default stays otherwise.
fn apply_category(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    match record.get("type") {
        Some(Value::Array(types)) => {
            if let Some(first) = types.first().and_then(Value::as_str) {
                profile.category = first.to_owned();
            }
        }
        Some(Value::String(category)) if !category.is_empty() => {
            profile.category = category.clone();
        }
        _ => {}
    }
}

fn apply_description(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let direct = text(record, "description");
    profile.description = if direct.is_empty() {
        synthesize_description(record)
    } else {
        direct
    };
    profile.has_description = !profile.description.is_empty();
}

/// Builds a description from the record's tag groups when no direct one
/// exists: highlights → "Known for", popular_for → "Popular for",
/// offerings → "Offers", each capped at its first three entries. Falls back
/// to a generic template built from the lowercased category.
fn synthesize_description(record: &Map<String, Value>) -> String {
    let mut highlights: Vec<String> = Vec::new();
    let mut popular_for: Vec<String> = Vec::new();
    let mut offerings: Vec<String> = Vec::new();

    for ext in array(record, "extensions") {
        let Some(groups) = ext.as_object() else {
            continue;
        };
        extend_strings(&mut highlights, groups.get("highlights"));
        extend_strings(&mut popular_for, groups.get("popular_for"));
        extend_strings(&mut offerings, groups.get("offerings"));
    }

    let mut parts: Vec<String> = Vec::new();
    if !highlights.is_empty() {
        parts.push(format!("Known for: {}", first_three(&highlights)));
    }
    if !popular_for.is_empty() {
        parts.push(format!("Popular for: {}", first_three(&popular_for)));
    }
    if !offerings.is_empty() {
        parts.push(format!("Offers: {}", first_three(&offerings)));
    }

    if parts.is_empty() {
        let category = record
            .get("type")
            .and_then(Value::as_array)
            .and_then(|types| types.first())
            .and_then(Value::as_str)
            .unwrap_or("business");
        format!(
            "A {} serving customers in the local area.",
            category.to_lowercase()
        )
    } else {
        format!("{}.", parts.join(". "))
    }
}

/// Menu detection: an image titled like a menu, or any offerings group
/// containing a menu keyword. A detected menu links to the explicit
/// order-online URL when present, else the business website.
fn apply_menu(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let image_menu = array(record, "images")
        .iter()
        .filter_map(Value::as_object)
        .any(|image| {
            let title = image
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase();
            MENU_IMAGE_TITLES.contains(&title.as_str())
        });

    let offerings_menu = array(record, "extensions")
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|groups| groups.get("offerings").and_then(Value::as_array))
        .any(|offerings| {
            let joined = offerings
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            MENU_KEYWORDS.iter().any(|keyword| joined.contains(keyword))
        });

    profile.has_menu = image_menu || offerings_menu;
    if profile.has_menu {
        let order_online = text(record, "order_online_link");
        profile.menu_url = if order_online.is_empty() {
            profile.website.clone()
        } else {
            order_online
        };
    }
}

/// Explicit service-option flags from the record's `service_options` map.
/// The extension scan may OR in more afterwards.
fn apply_service_options(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let Some(options) = record.get("service_options").and_then(Value::as_object) else {
        return;
    };
    profile.offers_delivery = flag(options, "delivery");
    profile.offers_takeout = flag(options, "takeout");
    profile.offers_dine_in = flag(options, "dine_in");
}

fn apply_price(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let price = text(record, "price");
    if !price.is_empty() {
        profile.price_range = PriceTier::parse(&price).unwrap_or_default();
    }
}

fn apply_cuisine(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    if profile.category.to_lowercase().contains("cafe") {
        profile.cuisine_type = "Coffee & Cafe".to_owned();
    } else if array(record, "type")
        .iter()
        .filter_map(Value::as_str)
        .any(|entry| entry.to_lowercase().contains("restaurant"))
    {
        profile.cuisine_type = "Restaurant".to_owned();
    }
}

/// Operational status: open unless an explicit open-state string says
/// otherwise; "closed" anywhere in it marks a temporary closure.
fn apply_open_state(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let open_state = text(record, "open_state");
    if open_state.is_empty() {
        return;
    }
    let lowered = open_state.to_lowercase();
    profile.is_open = lowered.contains("open");
    profile.temporarily_closed = lowered.contains("closed");
}

/// Best-effort locality from the stored address, gated on GPS coordinates
/// being present (a proxy for "this is a real street address"). Splits on
/// `", "`: city is the first token of the second-to-last segment, country is
/// the last segment, postal code is the trailing token of the
/// second-to-last segment when it has one.
fn apply_geo_locality(profile: &mut BusinessProfile, record: &Map<String, Value>) {
    let has_gps = record
        .get("gps_coordinates")
        .and_then(Value::as_object)
        .is_some_and(|coords| !coords.is_empty());
    if !has_gps || profile.address.is_empty() {
        return;
    }

    let segments: Vec<&str> = profile.address.split(", ").collect();
    if segments.len() < 3 {
        return;
    }

    let locality_tokens: Vec<&str> = segments[segments.len() - 2].split_whitespace().collect();
    if let Some(first) = locality_tokens.first() {
        profile.city = (*first).to_owned();
    }
    profile.country = segments[segments.len() - 1].to_owned();
    profile.postal_code = if locality_tokens.len() > 1 {
        locality_tokens
            .last()
            .map(|token| (*token).to_owned())
            .unwrap_or_default()
    } else {
        String::new()
    };
}

// ---------------------------------------------------------------------------
// Defaulted accessors
// ---------------------------------------------------------------------------

fn text(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn number(record: &Map<String, Value>, key: &str) -> f64 {
    record.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn count(record: &Map<String, Value>, key: &str) -> u32 {
    record
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn flag(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn array<'a>(record: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    record
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn extend_strings(target: &mut Vec<String>, value: Option<&Value>) {
    if let Some(entries) = value.and_then(Value::as_array) {
        target.extend(entries.iter().filter_map(Value::as_str).map(ToOwned::to_owned));
    }
}

fn first_three(entries: &[String]) -> String {
    entries
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

fn top_level_keys(record: &Map<String, Value>) -> String {
    record.keys().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
