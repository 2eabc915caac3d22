// src/model.rs
//! Records flowing through the pipeline: Yelp business JSON in,
//! restaurant / menu / dish rows out.

use serde::{Deserialize, Serialize};

use crate::core::sanitize::clean_price;

/// One business as returned by Yelp search or details. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Business {
    pub id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub price: Option<String>,
    pub url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<BusinessLocation>,
    pub categories: Option<Vec<Category>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BusinessLocation {
    pub display_address: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Category {
    pub title: Option<String>,
}

impl Business {
    /// Overlay `details` onto this record; fields it carries win.
    pub fn merge(&mut self, details: Business) {
        macro_rules! take {
            ($($f:ident),+) => { $( if details.$f.is_some() { self.$f = details.$f; } )+ };
        }
        take!(id, name, rating, review_count, price, url, phone, location, categories);
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub price_range: Option<String>,
    pub yelp_id: String,
    pub website: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
}

impl From<Business> for Restaurant {
    fn from(b: Business) -> Self {
        let address = b
            .location
            .and_then(|l| l.display_address)
            .filter(|lines| !lines.is_empty())
            .map(|lines| lines.join(", "));
        let cuisine_type = b
            .categories
            .map(|cats| cats.iter().filter_map(|c| c.title.as_deref()).collect::<Vec<_>>().join(", "))
            .filter(|joined| !joined.is_empty());

        Restaurant {
            name: b.name.unwrap_or_else(|| s!("Unknown")),
            rating: b.rating,
            review_count: b.review_count,
            price_range: b.price,
            yelp_id: b.id.unwrap_or_default(),
            website: b.url, // Yelp page, not the restaurant's own site
            address,
            phone: b.phone,
            cuisine_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,
    pub description: String,
    pub menu_type: String,
    pub display_order: i32,
}

impl Menu {
    pub fn main_for(restaurant: &Restaurant) -> Self {
        Menu {
            name: format!("{} Menu", restaurant.name),
            description: format!("Main menu for {}", restaurant.name),
            menu_type: s!("main"),
            display_order: 0,
        }
    }
}

/// A dish as read off the menu page; `price` is the raw `$x.yy` text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrapedDish {
    pub name: String,
    pub description: String,
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub menu_id: i64,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub display_order: i32,
}

impl Dish {
    pub fn from_scraped(menu_id: i64, d: &ScrapedDish) -> Self {
        Dish {
            menu_id,
            name: d.name.clone(),
            description: d.description.clone(),
            price: clean_price(&d.price),
            display_order: 0,
        }
    }
}
