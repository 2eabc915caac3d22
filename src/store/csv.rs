// src/store/csv.rs
//! Offline output: the three tables as CSV files in one directory.
//!
//! Ids are assigned here the way the database would (1, 2, 3, …). Reopening
//! a directory continues the id sequences and keeps de-duplicating
//! restaurants against what an earlier run wrote.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::mem::take;
use std::path::{Path, PathBuf};

use log::debug;

use super::Store;
use crate::error::Result;
use crate::model::{Dish, Menu, Restaurant};

pub const RESTAURANT_FILE: &str = "restaurant.csv";
pub const MENU_FILE: &str = "menu.csv";
pub const DISH_FILE: &str = "dish.csv";

pub const RESTAURANT_HEADERS: &[&str] = &[
    "id", "name", "rating", "review_count", "price_range", "yelp_id",
    "website", "address", "phone", "cuisine_type",
];
pub const MENU_HEADERS: &[&str] = &["id", "restaurant_id", "name", "description", "menu_type", "display_order"];
pub const DISH_HEADERS: &[&str] = &["id", "menu_id", "name", "description", "price", "display_order"];

const SEP: char = ',';
const YELP_ID_COL: usize = 5;

pub struct CsvStore {
    dir: PathBuf,
    by_yelp_id: HashMap<String, i64>,
    next_restaurant: i64,
    next_menu: i64,
    next_dish: i64,
}

impl CsvStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let restaurants = load_rows(&dir.join(RESTAURANT_FILE))?;
        let mut by_yelp_id = HashMap::new();
        for row in &restaurants {
            if let (Some(id), Some(yelp_id)) = (row_id(row), row.get(YELP_ID_COL)) {
                by_yelp_id.insert(yelp_id.clone(), id);
            }
        }

        let store = Self {
            next_restaurant: max_id(&restaurants) + 1,
            next_menu: max_id(&load_rows(&dir.join(MENU_FILE))?) + 1,
            next_dish: max_id(&load_rows(&dir.join(DISH_FILE))?) + 1,
            by_yelp_id,
            dir,
        };
        debug!(
            "CSV store at {} ({} restaurants known)",
            store.dir.display(),
            store.by_yelp_id.len()
        );
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn append(&self, file: &str, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        let path = self.dir.join(file);
        let fresh = !path.exists();
        let f = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut w = BufWriter::new(f);
        if fresh {
            let h: Vec<String> = headers.iter().map(|s| s!(*s)).collect();
            write_row(&mut w, &h, SEP)?;
        }
        for r in rows {
            write_row(&mut w, r, SEP)?;
        }
        w.flush()
    }
}

impl Store for CsvStore {
    fn find_restaurant(&mut self, yelp_id: &str) -> Result<Option<i64>> {
        Ok(self.by_yelp_id.get(yelp_id).copied())
    }

    fn insert_restaurant(&mut self, r: &Restaurant) -> Result<i64> {
        let id = self.next_restaurant;
        let row = vec![
            id.to_string(),
            r.name.clone(),
            opt(r.rating),
            opt(r.review_count),
            opt_str(&r.price_range),
            r.yelp_id.clone(),
            opt_str(&r.website),
            opt_str(&r.address),
            opt_str(&r.phone),
            opt_str(&r.cuisine_type),
        ];
        self.append(RESTAURANT_FILE, RESTAURANT_HEADERS, &[row])?;
        self.next_restaurant += 1;
        self.by_yelp_id.insert(r.yelp_id.clone(), id);
        Ok(id)
    }

    fn insert_menu(&mut self, restaurant_id: i64, m: &Menu) -> Result<i64> {
        let id = self.next_menu;
        let row = vec![
            id.to_string(),
            restaurant_id.to_string(),
            m.name.clone(),
            m.description.clone(),
            m.menu_type.clone(),
            m.display_order.to_string(),
        ];
        self.append(MENU_FILE, MENU_HEADERS, &[row])?;
        self.next_menu += 1;
        Ok(id)
    }

    fn insert_dishes(&mut self, dishes: &[Dish]) -> Result<usize> {
        if dishes.is_empty() {
            return Ok(0);
        }
        let first = self.next_dish;
        let rows: Vec<Vec<String>> = dishes
            .iter()
            .zip(first..)
            .map(|(d, id)| vec![
                id.to_string(),
                d.menu_id.to_string(),
                d.name.clone(),
                d.description.clone(),
                opt(d.price),
                d.display_order.to_string(),
            ])
            .collect();
        self.append(DISH_FILE, DISH_HEADERS, &rows)?;
        self.next_dish += rows.len() as i64;
        Ok(rows.len())
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn opt_str(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn row_id(row: &[String]) -> Option<i64> {
    row.first()?.parse().ok()
}

fn max_id(rows: &[Vec<String>]) -> i64 {
    rows.iter().filter_map(|r| row_id(r)).max().unwrap_or(0)
}

/// Data rows of a table file (header dropped); empty when the file is absent.
fn load_rows(path: &Path) -> io::Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    let mut rows = parse_rows(&text, SEP);
    if rows.first().is_some_and(|r| r.first().is_some_and(|c| c == "id")) {
        rows.remove(0);
    }
    Ok(rows)
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without a newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Whole table file as rows, header included.
pub fn read_table(path: &Path) -> io::Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_rows(&text, SEP))
}
