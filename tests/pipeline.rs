// tests/pipeline.rs
//
// Whole collection runs against canned Yelp data, stored as CSV.
//
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use nomm::config::options::ScrapeOptions;
use nomm::model::{Business, Dish, Menu, Restaurant};
use nomm::progress::NullProgress;
use nomm::scrape::{collect, search_batches};
use nomm::specs::search::Batch;
use nomm::store::csv::{DISH_FILE, MENU_FILE, RESTAURANT_FILE, read_table};
use nomm::store::{CsvStore, Store};
use nomm::yelp::Source;
use nomm::{Error, Result};

const MENU_PAGE: &str = include_str!("fixtures/menu.html");

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("nomm_pipeline_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn business(id: &str, name: &str, city: &str) -> Business {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "location": { "display_address": ["1 Main St", format!("{city}, CA")] },
        "categories": [{ "title": "Vietnamese" }]
    }))
    .unwrap()
}

/// Canned Yelp: search pages by offset, details by id, menu pages by URL.
#[derive(Default)]
struct FakeYelp {
    pages: HashMap<usize, Result<Vec<Business>>>,
    details: HashMap<String, Business>,
    menus: HashMap<String, String>,
    searched: Mutex<Vec<Batch>>,
}

impl Source for FakeYelp {
    fn search(&self, _location: &str, batch: Batch) -> Result<Vec<Business>> {
        self.searched.lock().unwrap().push(batch);
        match self.pages.get(&batch.offset) {
            Some(Ok(list)) => Ok(list.iter().take(batch.limit).cloned().collect()),
            Some(Err(_)) => Err(Error::Status { status: 500, url: format!("search?offset={}", batch.offset) }),
            None => Ok(Vec::new()),
        }
    }

    fn details(&self, id: &str) -> Result<Business> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Status { status: 404, url: format!("/businesses/{id}") })
    }

    fn menu_page(&self, url: &str) -> Result<String> {
        self.menus
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status { status: 404, url: url.to_string() })
    }
}

fn fast(total: usize, workers: usize) -> ScrapeOptions {
    ScrapeOptions { total, workers, pause_ms: 0, batch_pause_ms: 0, ..ScrapeOptions::default() }
}

fn fixture() -> FakeYelp {
    let mut y = FakeYelp::default();
    y.pages.insert(0, Ok(vec![
        business("pho-1", "Pho Ha Noi", "San Ramon"),
        business("pizza-2", "Zachary's Pizza", "Dublin"),
        business("taco-3", "Taco Bell", "Walnut Creek"),
    ]));
    // details fill in rating/price for one of them
    let mut d = business("pho-1", "Pho Ha Noi", "San Ramon");
    d.rating = Some(4.5);
    d.price = Some("$$".into());
    y.details.insert("pho-1".into(), d);

    y.menus.insert("https://www.yelp.com/menu/pho-ha-noi-san-ramon".into(), MENU_PAGE.into());
    // Walnut Creek is not a known city: falls back to the search location's city
    y.menus.insert("https://www.yelp.com/menu/taco-bell-san-ramon".into(), MENU_PAGE.into());
    y
}

#[test]
fn stores_restaurants_with_menus_and_skips_the_rest() {
    let dir = tmp_dir("basic");
    let yelp = fixture();
    let mut store = CsvStore::open(&dir).unwrap();

    let summary = collect(&yelp, &mut store, &fast(3, 2), Some(&mut NullProgress)).unwrap();
    assert_eq!(summary.checked, 3);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.dishes, 8);

    let restaurants = read_table(&dir.join(RESTAURANT_FILE)).unwrap();
    assert_eq!(restaurants[0][0], "id");
    assert_eq!(restaurants.len(), 3); // header + 2

    let pho = restaurants.iter().find(|r| r[5] == "pho-1").unwrap();
    assert_eq!(pho[1], "Pho Ha Noi");
    assert_eq!(pho[2], "4.5");
    assert_eq!(pho[4], "$$");
    assert_eq!(pho[7], "1 Main St, San Ramon, CA");

    let menus = read_table(&dir.join(MENU_FILE)).unwrap();
    assert_eq!(menus.len(), 3);
    assert!(menus.iter().any(|m| m[2] == "Pho Ha Noi Menu" && m[4] == "main"));

    let dishes = read_table(&dir.join(DISH_FILE)).unwrap();
    assert_eq!(dishes.len(), 1 + 2 * 4);
    assert!(dishes.iter().any(|d| d[2] == "Pho Tai" && d[4] == "13.95"));
}

/// CSV store whose menu insert fails for one menu name.
struct FailingMenu<'a> {
    inner: CsvStore,
    menu: &'a str,
}

impl Store for FailingMenu<'_> {
    fn find_restaurant(&mut self, yelp_id: &str) -> Result<Option<i64>> {
        self.inner.find_restaurant(yelp_id)
    }
    fn insert_restaurant(&mut self, restaurant: &Restaurant) -> Result<i64> {
        self.inner.insert_restaurant(restaurant)
    }
    fn insert_menu(&mut self, restaurant_id: i64, menu: &Menu) -> Result<i64> {
        if menu.name == self.menu {
            return Err(Error::Store(format!("insert into menu refused {}", menu.name)));
        }
        self.inner.insert_menu(restaurant_id, menu)
    }
    fn insert_dishes(&mut self, dishes: &[Dish]) -> Result<usize> {
        self.inner.insert_dishes(dishes)
    }
}

#[test]
fn store_failure_is_counted_and_the_run_goes_on() {
    let dir = tmp_dir("store_failure");
    let yelp = fixture();
    let mut store = FailingMenu { inner: CsvStore::open(&dir).unwrap(), menu: "Pho Ha Noi Menu" };

    let summary = collect(&yelp, &mut store, &fast(3, 1), Some(&mut NullProgress)).unwrap();
    assert_eq!(summary.checked, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.dishes, 4);

    let menus = read_table(&dir.join(MENU_FILE)).unwrap();
    assert_eq!(menus.len(), 2);
    assert_eq!(menus[1][2], "Taco Bell Menu");
    let dishes = read_table(&dir.join(DISH_FILE)).unwrap();
    assert_eq!(dishes.len(), 1 + 4);
}

#[test]
fn rerun_reuses_known_restaurants() {
    let dir = tmp_dir("rerun");
    let yelp = fixture();

    let mut store = CsvStore::open(&dir).unwrap();
    collect(&yelp, &mut store, &fast(3, 1), None).unwrap();
    drop(store);

    let mut store = CsvStore::open(&dir).unwrap();
    let summary = collect(&yelp, &mut store, &fast(3, 1), None).unwrap();
    assert_eq!(summary.processed, 2);

    // restaurants stay unique, menus are added again under the same ids
    let restaurants = read_table(&dir.join(RESTAURANT_FILE)).unwrap();
    assert_eq!(restaurants.len(), 3);
    let menus = read_table(&dir.join(MENU_FILE)).unwrap();
    assert_eq!(menus.len(), 5);
    let ids: Vec<&str> = menus[1..].iter().map(|m| m[0].as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
}

#[test]
fn failed_batch_is_skipped_and_empty_batch_stops() {
    let mut yelp = FakeYelp::default();
    let page = |base: usize, n: usize| -> Vec<Business> {
        (0..n).map(|i| business(&format!("b{}", base + i), "X", "Dublin")).collect()
    };
    yelp.pages.insert(0, Ok(page(0, 50)));
    yelp.pages.insert(50, Err(Error::Store("boom".into())));
    yelp.pages.insert(100, Ok(page(100, 50)));
    // offset 150 missing: empty page

    let found = search_batches(&yelp, &fast(250, 1));
    assert_eq!(found.len(), 100);

    let offsets: Vec<usize> = yelp.searched.lock().unwrap().iter().map(|b| b.offset).collect();
    assert_eq!(offsets, [0, 50, 100, 150]);
}

#[test]
fn last_batch_asks_only_for_the_remainder() {
    let mut yelp = FakeYelp::default();
    yelp.pages.insert(0, Ok((0..50).map(|i| business(&format!("a{i}"), "A", "Dublin")).collect()));
    yelp.pages.insert(50, Ok((0..50).map(|i| business(&format!("b{i}"), "B", "Dublin")).collect()));

    let found = search_batches(&yelp, &fast(70, 1));
    assert_eq!(found.len(), 70);
    let limits: Vec<usize> = yelp.searched.lock().unwrap().iter().map(|b| b.limit).collect();
    assert_eq!(limits, [50, 20]);
}

#[test]
fn nothing_found_is_an_empty_summary() {
    let yelp = FakeYelp::default();
    let dir = tmp_dir("empty");
    let mut store = CsvStore::open(&dir).unwrap();
    let summary = collect(&yelp, &mut store, &fast(10, 1), None).unwrap();
    assert_eq!(summary, Default::default());
    assert!(!dir.join(RESTAURANT_FILE).exists());
}
