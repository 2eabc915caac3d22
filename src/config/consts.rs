// src/config/consts.rs

// Yelp
pub const YELP_API_BASE: &str = "https://api.yelp.com/v3";
pub const YELP_WEB_BASE: &str = "https://www.yelp.com";
pub const SEARCH_TERM: &str = "restaurants";
pub const SEARCH_CATEGORIES: &str = "restaurants";
pub const SEARCH_BATCH_SIZE: usize = 50; // API max per request

// Defaults
pub const DEFAULT_LOCATION: &str = "San Ramon, CA";
pub const DEFAULT_TOTAL: usize = 200;
pub const DEFAULT_CSV_DIR: &str = "out";
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";

// Cities with their own Yelp menu URL suffix, checked in this order
pub const KNOWN_CITIES: &[(&str, &str)] = &[
    ("san ramon", "san-ramon"),
    ("dublin", "dublin"),
    ("pleasanton", "pleasanton"),
    ("livermore", "livermore"),
    ("castro valley", "castro-valley"),
    ("hayward", "hayward"),
];

// Net
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const SCRAPE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const SCRAPE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const SCRAPE_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

// Concurrency
pub const WORKERS: usize = 1;
pub const BATCH_PAUSE_MS: u64 = 1_000;
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite

// Progress
pub const PROGRESS_EVERY: usize = 10;
pub const PROGRESS_EVERY_LARGE: usize = 25;
pub const LARGE_RUN: usize = 500;
pub const SECS_PER_RESTAURANT_ESTIMATE: usize = 4;
