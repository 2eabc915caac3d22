// src/store/supabase.rs
// Supabase tables through PostgREST: `<project>/rest/v1/<table>`.

use reqwest::Url;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::Store;
use crate::core::HttpClient;
use crate::error::{Error, Result};
use crate::model::{Dish, Menu, Restaurant};

const RESTAURANT: &str = "restaurant";
const MENU: &str = "menu";
const DISH: &str = "dish";

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

#[derive(Serialize)]
struct MenuRow<'a> {
    restaurant_id: i64,
    #[serde(flatten)]
    menu: &'a Menu,
}

pub struct SupabaseStore {
    http: HttpClient,
    rest_base: String,
    headers: HeaderMap,
}

impl SupabaseStore {
    pub fn new(project_url: &str, key: &str, http: HttpClient) -> Result<Self> {
        let rest_base = join!(project_url.trim_end_matches('/'), "/rest/v1");
        Url::parse(&rest_base).map_err(|e| Error::Config(format!("bad Supabase URL: {e}")))?;
        Ok(Self { http, rest_base, headers: auth_headers(key)? })
    }

    fn table_url(&self, table: &str) -> String {
        join!(&self.rest_base, "/", table)
    }

    fn insert<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> Result<Vec<IdRow>> {
        self.http.post_json(&self.table_url(table), insert_headers(&self.headers), body)
    }

    fn insert_one<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> Result<i64> {
        self.insert(table, body)?
            .first()
            .map(|row| row.id)
            .ok_or_else(|| Error::Store(format!("insert into {table} returned no rows")))
    }
}

fn auth_headers(key: &str) -> Result<HeaderMap> {
    let bad_key = |_| Error::Config(s!("Supabase key is not a valid header value"));
    let mut h = HeaderMap::new();
    h.insert("apikey", HeaderValue::from_str(key).map_err(bad_key)?);
    h.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {key}")).map_err(bad_key)?,
    );
    h.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    Ok(h)
}

/// Inserts ask PostgREST to echo the new rows so their ids can be read back.
fn insert_headers(auth: &HeaderMap) -> HeaderMap {
    let mut h = auth.clone();
    h.insert("Prefer", HeaderValue::from_static("return=representation"));
    h
}

/// `GET <rest>/restaurant?select=id&yelp_id=eq.<id>`
fn lookup_url(rest_base: &str, yelp_id: &str) -> Result<Url> {
    let filter = join!("eq.", yelp_id);
    Url::parse_with_params(
        &join!(rest_base, "/", RESTAURANT),
        &[("select", "id"), ("yelp_id", filter.as_str())],
    )
    .map_err(|e| Error::Config(format!("bad Supabase URL: {e}")))
}

impl Store for SupabaseStore {
    fn find_restaurant(&mut self, yelp_id: &str) -> Result<Option<i64>> {
        let url = lookup_url(&self.rest_base, yelp_id)?;
        let rows: Vec<IdRow> = self.http.get_with(url.as_str(), self.headers.clone())?;
        Ok(rows.first().map(|r| r.id))
    }

    fn insert_restaurant(&mut self, restaurant: &Restaurant) -> Result<i64> {
        self.insert_one(RESTAURANT, restaurant)
    }

    fn insert_menu(&mut self, restaurant_id: i64, menu: &Menu) -> Result<i64> {
        self.insert_one(MENU, &MenuRow { restaurant_id, menu })
    }

    fn insert_dishes(&mut self, dishes: &[Dish]) -> Result<usize> {
        if dishes.is_empty() {
            return Ok(0);
        }
        // PostgREST takes an array body as one bulk insert.
        Ok(self.insert(DISH, dishes)?.len())
    }
}
