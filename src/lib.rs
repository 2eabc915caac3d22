// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod model;
pub mod progress;
pub mod scrape;
pub mod specs;
pub mod store;
pub mod yelp;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
