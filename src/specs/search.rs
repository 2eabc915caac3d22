// src/specs/search.rs
//! Yelp business search (`GET /businesses/search`).
//!
//! The API returns at most 50 businesses per call, so a run asking for more
//! is split into consecutive `(offset, limit)` batches.

use serde::Deserialize;

use crate::config::consts::{SEARCH_BATCH_SIZE, SEARCH_CATEGORIES, SEARCH_TERM};
use crate::error::Result;
use crate::model::Business;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Number of batches needed for `total` results (ceiling division).
pub fn batch_count(total: usize) -> usize {
    total.div_ceil(SEARCH_BATCH_SIZE)
}

/// The batch to request next, given how many businesses are in hand.
/// `None` once nothing remains to ask for.
pub fn next_batch(index: usize, total: usize, collected: usize) -> Option<Batch> {
    if index >= batch_count(total) {
        return None;
    }
    let remaining = total.saturating_sub(collected);
    if remaining == 0 {
        return None;
    }
    Some(Batch {
        index,
        offset: index * SEARCH_BATCH_SIZE,
        limit: SEARCH_BATCH_SIZE.min(remaining),
    })
}

/// Query string for one batch.
pub fn query(location: &str, batch: Batch) -> Vec<(&'static str, String)> {
    vec![
        ("term", s!(SEARCH_TERM)),
        ("location", s!(location)),
        ("limit", batch.limit.to_string()),
        ("offset", batch.offset.to_string()),
        ("categories", s!(SEARCH_CATEGORIES)),
    ]
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    // absent and `null` both read as no businesses
    #[serde(default)]
    pub businesses: Option<Vec<Business>>,
}

pub fn parse_search(json: &str) -> Result<Vec<Business>> {
    let resp: SearchResponse = serde_json::from_str(json)?;
    Ok(resp.businesses.unwrap_or_default())
}
