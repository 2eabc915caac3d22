// src/scrape/collect.rs
use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use log::{error, info};

use super::restaurant::{Outcome, scrape_restaurant};
use super::search::search_batches;
use crate::config::options::ScrapeOptions;
use crate::error::Result;
use crate::progress::Progress;
use crate::specs::menu::MenuSelectors;
use crate::store::{self, Store};
use crate::yelp::Source;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub checked: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Dish rows written across all stored menus.
    pub dishes: usize,
}

/// Search, scrape every hit, and store the ones with menus.
///
/// Scraping runs on `opts.workers` threads pulling from a shared index; each
/// worker pauses `opts.pause_ms` after every restaurant. All store writes
/// happen on the calling thread, in the order results arrive.
pub fn collect<S, T>(
    source: &S,
    store: &mut T,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Summary>
where
    S: Source + ?Sized,
    T: Store + ?Sized,
{
    info!(
        "Starting {} restaurant data collection for {} restaurants - skipping restaurants without menu data...",
        opts.location, opts.total
    );
    info!("Estimated completion time: ~{} minutes", opts.estimated_minutes());

    let selectors = MenuSelectors::new()?;
    let businesses = search_batches(source, opts);
    if businesses.is_empty() {
        error!("No businesses found. Exiting.");
        return Ok(Summary::default());
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(businesses.len());
    }

    let default_city = opts.default_city();
    let total = businesses.len();
    let workers = opts.workers.min(total).max(1);
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<Outcome>();
    let mut summary = Summary::default();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (businesses, next, selectors, default_city) =
                (&businesses, &next, &selectors, default_city.as_str());

            scope.spawn(move || {
                loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    if i >= businesses.len() {
                        break;
                    }
                    let business = businesses[i].clone();
                    info!("Processing restaurant {}/{}: {}", i + 1, total, business.display_name());

                    let outcome = scrape_restaurant(source, selectors, business, default_city);
                    if tx.send(outcome).is_err() {
                        break; // receiver gone
                    }
                    if opts.pause_ms > 0 {
                        thread::sleep(Duration::from_millis(opts.pause_ms)); // be polite
                    }
                }
            });
        }
        drop(tx); // calling thread is sole receiver now

        for outcome in rx {
            summary.checked += 1;
            match outcome {
                Outcome::Found { restaurant, menu, dishes } => {
                    match store::save(store, &restaurant, &menu, &dishes) {
                        Ok(saved) => {
                            summary.processed += 1;
                            summary.dishes += saved.dishes;
                            if let Some(p) = progress.as_deref_mut() {
                                p.item_done(&restaurant.name);
                            }
                        }
                        Err(e) => {
                            summary.failed += 1;
                            error!("Error saving {} to database: {e}", restaurant.name);
                            if let Some(p) = progress.as_deref_mut() {
                                p.item_failed(&restaurant.name);
                            }
                        }
                    }
                }
                Outcome::NoMenu(restaurant) => {
                    summary.skipped += 1;
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_skipped(&restaurant.name);
                    }
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    info!("Data collection completed!");
    info!("Total restaurants checked: {}", summary.checked);
    info!("Restaurants processed with menu data: {}", summary.processed);
    info!("Restaurants skipped (no menu data): {}", summary.skipped);
    info!("Dishes stored: {}", summary.dishes);
    if summary.failed > 0 {
        info!("Restaurants that failed to store: {}", summary.failed);
    }
    Ok(summary)
}
