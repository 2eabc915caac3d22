// src/scrape/restaurant.rs
use log::{error, info};

use crate::model::{Business, Menu, Restaurant, ScrapedDish};
use crate::specs::menu::{MenuSelectors, menu_url};
use crate::yelp::Source;

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Found { restaurant: Restaurant, menu: Menu, dishes: Vec<ScrapedDish> },
    NoMenu(Restaurant),
}

/// Details, conversion, and menu scrape for one search hit.
/// Network failures are logged and degrade the result; they never abort it.
pub fn scrape_restaurant<S: Source + ?Sized>(
    source: &S,
    selectors: &MenuSelectors,
    mut business: Business,
    default_city: &str,
) -> Outcome {
    if let Some(id) = business.id.clone() {
        match source.details(&id) {
            Ok(details) => business.merge(details),
            Err(e) => error!("Error getting restaurant details for {id}: {e}"),
        }
    }

    let restaurant = Restaurant::from(business);
    let url = menu_url(&restaurant, default_city);
    info!("Attempting to scrape menu from: {url}");

    let dishes = match source.menu_page(&url) {
        Ok(html) => selectors.parse(&html),
        Err(e) => {
            error!("Error fetching menu page {url}: {e}");
            Vec::new()
        }
    };

    if dishes.is_empty() {
        info!("No menu data found for {} - skipping", restaurant.name);
        return Outcome::NoMenu(restaurant);
    }

    info!("Found menu data for {}", restaurant.name);
    let menu = Menu::main_for(&restaurant);
    Outcome::Found { restaurant, menu, dishes }
}
