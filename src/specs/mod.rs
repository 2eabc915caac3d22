//! # Endpoint and page "specs"
//!
//! Each spec knows **where the data lives** in one Yelp endpoint or page and
//! how to read it. Specs are pure: they take JSON/HTML text and return model
//! records, so they can be tested offline against captured fixtures.
//!
//! ## What lives here
//! - `search` – business search API: batch planning and response parsing.
//! - `details` – business details API response parsing.
//! - `menu` – menu page URL construction and HTML extraction with
//!   prioritized selector lists.
//!
//! ## What does **not** live here
//! - Networking (`core::net`, `yelp::YelpClient`).
//! - Pacing, workers, and error absorption (`scrape`).
//! - Persistence (`store`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect → yelp::YelpClient (fetch) → specs::<page>::parse_*
//!                       ↘ store::save
//! ```
pub mod details;
pub mod menu;
pub mod search;
