//! Place-record fetching and profile normalization.
//!
//! [`SerpApiClient`] talks to SerpAPI's Google Maps engines and surfaces
//! typed errors; the [`PlaceSource`] trait is the failure-absorbing seam the
//! normalizer consumes (transport problems become "no data", never errors).
//! [`normalize_place`] turns an arbitrarily-shaped raw record into a
//! canonical [`bizlens_core::BusinessProfile`].

mod client;
mod error;
mod extensions;
mod normalize;
mod source;

pub use client::SerpApiClient;
pub use error::PlacesError;
pub use extensions::scan_extensions;
pub use normalize::{normalize_place, NormalizeOptions, YearPolicy};
pub use source::PlaceSource;
