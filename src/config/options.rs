// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::core::sanitize::slugify;
use crate::error::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub yelp: YelpOptions,
    pub supabase: SupabaseOptions,
    pub scrape: ScrapeOptions,
    pub output: OutputTarget,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct YelpOptions {
    pub api_key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupabaseOptions {
    pub url: String,
    pub key: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub location: String,
    pub total: usize,
    pub workers: usize,
    pub pause_ms: u64,
    pub batch_pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            location: s!(DEFAULT_LOCATION),
            total: DEFAULT_TOTAL,
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
            batch_pause_ms: BATCH_PAUSE_MS,
        }
    }
}

impl ScrapeOptions {
    /// City slug used in menu URLs when an address names no known city.
    /// "San Ramon, CA" -> "san-ramon"
    pub fn default_city(&self) -> String {
        let city = self.location.split(',').next().unwrap_or("");
        let slug = slugify(city);
        if slug.is_empty() { s!("san-ramon") } else { slug }
    }

    /// Every N restaurants a progress line is logged.
    pub fn progress_interval(&self) -> usize {
        if self.total >= LARGE_RUN { PROGRESS_EVERY_LARGE } else { PROGRESS_EVERY }
    }

    /// Rough run time in whole minutes.
    pub fn estimated_minutes(&self) -> usize {
        self.total * SECS_PER_RESTAURANT_ESTIMATE / 60
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Supabase,
    Csv(PathBuf),
}

impl AppOptions {
    pub fn validate(&self) -> Result<()> {
        if self.yelp.api_key.trim().is_empty() {
            return Err(Error::Config(s!(
                "missing Yelp API key (get one at https://www.yelp.com/developers)"
            )));
        }
        if self.output == OutputTarget::Supabase
            && (self.supabase.url.trim().is_empty() || self.supabase.key.trim().is_empty())
        {
            return Err(Error::Config(s!("missing Supabase URL or key")));
        }
        if self.scrape.total == 0 {
            return Err(Error::Config(s!("total must be at least 1")));
        }
        if self.scrape.workers == 0 {
            return Err(Error::Config(s!("workers must be at least 1")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> AppOptions {
        let mut opts = AppOptions::default();
        opts.yelp.api_key = s!("k");
        opts.supabase.url = s!("https://x.supabase.co");
        opts.supabase.key = s!("anon");
        opts
    }

    #[test]
    fn default_city_follows_location() {
        let mut scrape = ScrapeOptions::default();
        assert_eq!(scrape.default_city(), "san-ramon");
        scrape.location = s!("Castro Valley, CA");
        assert_eq!(scrape.default_city(), "castro-valley");
        scrape.location = s!("  ");
        assert_eq!(scrape.default_city(), "san-ramon");
    }

    #[test]
    fn progress_interval_grows_for_large_runs() {
        let mut scrape = ScrapeOptions::default();
        scrape.total = 499;
        assert_eq!(scrape.progress_interval(), 10);
        scrape.total = 500;
        assert_eq!(scrape.progress_interval(), 25);
    }

    #[test]
    fn validate_requires_credentials() {
        assert!(complete().validate().is_ok());

        let mut no_yelp = complete();
        no_yelp.yelp.api_key.clear();
        assert!(matches!(no_yelp.validate(), Err(Error::Config(_))));

        let mut no_supabase = complete();
        no_supabase.supabase.key.clear();
        assert!(no_supabase.validate().is_err());

        // CSV output does not need Supabase
        no_supabase.output = OutputTarget::Csv(PathBuf::from("out"));
        assert!(no_supabase.validate().is_ok());
    }
}
