// src/store/mod.rs
//! Persistence of scraped restaurants.
//!
//! `Store` is the row-level seam (look up, insert). `save` holds the write
//! order every backend shares: restaurant (de-duplicated by Yelp id), then its
//! menu, then the menu's dishes.

pub mod csv;
pub mod supabase;

pub use csv::CsvStore;
pub use supabase::SupabaseStore;

use log::info;

use crate::error::Result;
use crate::model::{Dish, Menu, Restaurant, ScrapedDish};

pub trait Store {
    /// Database id of the restaurant with this Yelp id, if stored already.
    fn find_restaurant(&mut self, yelp_id: &str) -> Result<Option<i64>>;
    fn insert_restaurant(&mut self, restaurant: &Restaurant) -> Result<i64>;
    fn insert_menu(&mut self, restaurant_id: i64, menu: &Menu) -> Result<i64>;
    /// Returns the number of rows written.
    fn insert_dishes(&mut self, dishes: &[Dish]) -> Result<usize>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Saved {
    pub restaurant_id: i64,
    pub menu_id: i64,
    pub dishes: usize,
}

pub fn save<S: Store + ?Sized>(
    store: &mut S,
    restaurant: &Restaurant,
    menu: &Menu,
    dishes: &[ScrapedDish],
) -> Result<Saved> {
    let restaurant_id = match store.find_restaurant(&restaurant.yelp_id)? {
        Some(id) => {
            info!("Restaurant {} already exists with ID {id}", restaurant.name);
            id
        }
        None => {
            let id = store.insert_restaurant(restaurant)?;
            info!("Inserted restaurant {} with ID {id}", restaurant.name);
            id
        }
    };

    let menu_id = store.insert_menu(restaurant_id, menu)?;
    info!("Inserted menu {} with ID {menu_id}", menu.name);

    let rows: Vec<Dish> = dishes.iter().map(|d| Dish::from_scraped(menu_id, d)).collect();
    let written = store.insert_dishes(&rows)?;
    info!("Inserted {written} dishes for menu {}", menu.name);

    Ok(Saved { restaurant_id, menu_id, dishes: written })
}
