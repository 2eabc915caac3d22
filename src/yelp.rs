// src/yelp.rs
//! Yelp access: the Fusion API for businesses and the public site for menus.

use crate::config::consts::YELP_API_BASE;
use crate::core::HttpClient;
use crate::error::Result;
use crate::model::Business;
use crate::specs::{details, search};

/// Where the pipeline gets its raw data. Implemented by `YelpClient`;
/// tests drive the pipeline with canned data instead.
pub trait Source: Sync {
    fn search(&self, location: &str, batch: search::Batch) -> Result<Vec<Business>>;
    fn details(&self, business_id: &str) -> Result<Business>;
    fn menu_page(&self, url: &str) -> Result<String>;
}

pub struct YelpClient {
    api_key: String,
    http: HttpClient,
}

impl YelpClient {
    pub fn new(api_key: impl Into<String>, http: HttpClient) -> Self {
        Self { api_key: api_key.into(), http }
    }
}

impl Source for YelpClient {
    fn search(&self, location: &str, batch: search::Batch) -> Result<Vec<Business>> {
        let url = join!(YELP_API_BASE, "/businesses/search");
        let body = self.http.get_api(&url, &self.api_key, &search::query(location, batch))?;
        search::parse_search(&body)
    }

    fn details(&self, business_id: &str) -> Result<Business> {
        let url = join!(YELP_API_BASE, &details::path(business_id));
        let body = self.http.get_api(&url, &self.api_key, &[] as &[(&str, &str)])?;
        details::parse_details(&body)
    }

    fn menu_page(&self, url: &str) -> Result<String> {
        self.http.get_html(url)
    }
}
