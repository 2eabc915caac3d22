// src/scrape/mod.rs
mod collect;
mod restaurant;
mod search;

pub use collect::{Summary, collect};
pub use restaurant::{Outcome, scrape_restaurant};
pub use search::search_batches;
