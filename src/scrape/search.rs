// src/scrape/search.rs
use std::{thread, time::Duration};

use log::{error, info, warn};

use crate::config::options::ScrapeOptions;
use crate::model::Business;
use crate::specs::search::{batch_count, next_batch};
use crate::yelp::Source;

/// Page through search results until `opts.total` businesses are in hand.
///
/// A failed batch is logged and skipped (its offset is not retried); an empty
/// batch means Yelp has nothing more and ends the search.
pub fn search_batches<S: Source + ?Sized>(source: &S, opts: &ScrapeOptions) -> Vec<Business> {
    let total = opts.total;
    let batches = batch_count(total);
    info!("Starting batch search for {total} restaurants in {batches} batches");

    let mut all: Vec<Business> = Vec::new();
    let mut index = 0usize;

    while let Some(batch) = next_batch(index, total, all.len()) {
        index += 1;
        info!(
            "Fetching batch {index}/{batches} (offset: {}, limit: {})",
            batch.offset, batch.limit
        );

        match source.search(&opts.location, batch) {
            Ok(list) if list.is_empty() => {
                warn!("No businesses returned in batch {index}");
                break;
            }
            Ok(list) => {
                let got = list.len();
                all.extend(list);
                info!("Batch {index} returned {got} restaurants. Total so far: {}", all.len());
            }
            Err(e) => {
                error!("Error in batch {index}: {e}");
                continue;
            }
        }

        if index < batches && opts.batch_pause_ms > 0 {
            info!("Waiting {} ms between batches...", opts.batch_pause_ms);
            thread::sleep(Duration::from_millis(opts.batch_pause_ms));
        }
    }

    all.truncate(total);
    info!("Completed batch search. Total restaurants found: {}", all.len());
    all
}
