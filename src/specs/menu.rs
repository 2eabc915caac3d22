// src/specs/menu.rs
//! Yelp menu page (`/menu/<name-slug>-<city-slug>`).
//!
//! Yelp has shipped several markups for menu pages over the years, so items,
//! names, descriptions and prices are each located through an ordered list
//! of selectors; the first one that matches wins.

use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{KNOWN_CITIES, YELP_WEB_BASE};
use crate::core::html::{select_all_first_hit, select_first, select_first_text, selectors, stripped_text};
use crate::core::sanitize::{extract_price, slugify};
use crate::error::Result;
use crate::model::{Restaurant, ScrapedDish};

pub const ITEM_SELECTORS: &[&str] = &[
    "div.menu-item",
    r#"[data-testid="menu-item"]"#,
    ".menu-item-details",
    ".menuItem",
    ".biz-menu-item",
];
pub const NAME_SELECTORS: &[&str] = &["h4", ".menu-item-name", ".item-name", "h3", "strong"];
pub const DESCRIPTION_SELECTORS: &[&str] = &[
    ".menu-item-details-description",
    ".menu-item-description",
    ".item-description",
    "p",
];
pub const PRICE_SELECTORS: &[&str] = &[
    ".menu-item-price-amount",
    ".menu-item-price",
    ".item-price",
    ".price",
];

/// City slug for an address, or `None` when no known city is named.
/// Parts are checked left to right; a later match replaces an earlier one.
pub fn city_slug(address: &str) -> Option<&'static str> {
    let mut found = None;
    for part in address.to_lowercase().split(',') {
        let part = part.trim();
        if let Some((_, slug)) = KNOWN_CITIES.iter().find(|(city, _)| part.contains(city)) {
            found = Some(*slug);
        }
    }
    found
}

pub fn menu_url(restaurant: &Restaurant, default_city: &str) -> String {
    let name = slugify(&restaurant.name);
    let city = restaurant
        .address
        .as_deref()
        .and_then(city_slug)
        .unwrap_or(default_city);
    format!("{YELP_WEB_BASE}/menu/{name}-{city}")
}

/// Compiled selector lists, built once per worker.
pub struct MenuSelectors {
    items: Vec<Selector>,
    names: Vec<Selector>,
    descriptions: Vec<Selector>,
    prices: Vec<Selector>,
}

impl MenuSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            items: selectors(ITEM_SELECTORS)?,
            names: selectors(NAME_SELECTORS)?,
            descriptions: selectors(DESCRIPTION_SELECTORS)?,
            prices: selectors(PRICE_SELECTORS)?,
        })
    }

    pub fn parse(&self, html: &str) -> Vec<ScrapedDish> {
        let doc = Html::parse_document(html);

        let Some((idx, items)) = select_all_first_hit(&doc, &self.items) else {
            warn!("No menu items found with any selector");
            return Vec::new();
        };
        info!("Found {} menu items using selector: {}", items.len(), ITEM_SELECTORS[idx]);

        let dishes: Vec<ScrapedDish> = items
            .into_iter()
            .filter_map(|item| self.read_item(item))
            .collect();
        info!("Successfully scraped {} menu items", dishes.len());
        dishes
    }

    fn read_item(&self, item: ElementRef<'_>) -> Option<ScrapedDish> {
        let name = select_first_text(item, &self.names);
        let description = select_first_text(item, &self.descriptions);
        // Only the first price element counts, even if it holds no amount.
        let price = select_first(item, &self.prices)
            .and_then(|el| extract_price(&stripped_text(el)))
            .unwrap_or_default();

        if name.is_empty() || (description.is_empty() && price.is_empty()) {
            debug!("Dropping menu item without enough data: name='{name}'");
            return None;
        }
        Some(ScrapedDish { name, description, price })
    }
}

/// One-shot parse; prefer `MenuSelectors` when parsing many pages.
pub fn parse_menu(html: &str) -> Result<Vec<ScrapedDish>> {
    Ok(MenuSelectors::new()?.parse(html))
}
