//! View models for the listing grid and the vehicle detail page.
//!
//! Everything here is already formatted for display; the front end only
//! places strings into markup.

pub mod card;
pub mod detail;

pub use card::{detail_href, reference_price, render_listing, ListingCard, ListingPage};
pub use detail::{vehicle_detail, vin_from_query, SpecRow, VehicleDetail};

/// Image service used when a record carries no photos.
pub(crate) const PLACEHOLDER_IMAGE_BASE: &str = "https://source.unsplash.com/collection/190727";
