// src/core/sanitize.rs
use std::sync::OnceLock;

use regex::Regex;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// URL slug: lowercase, every run of chars outside `[a-z0-9]` becomes one '-',
/// no leading/trailing '-'.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true; // suppresses a leading '-'
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') { out.pop(); }
    out
}

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$[\d,]+\.?\d*").expect("static price pattern"))
}

/// First `$1,234.56`-style token in `text`.
pub fn extract_price(text: &str) -> Option<String> {
    price_re().find(text).map(|m| m.as_str().to_string())
}

/// Keep digits and '.', then parse. "$1,234.50" -> 1234.5
pub fn clean_price(price: &str) -> Option<f64> {
    let cleaned: String = price.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Zachary's Chicago Pizza"), "zachary-s-chicago-pizza");
        assert_eq!(slugify("  --Pho  Ha Noi!! "), "pho-ha-noi");
        assert_eq!(slugify("Café 88"), "caf-88");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn extract_price_finds_first_amount() {
        assert_eq!(extract_price("Small $8.50 / Large $12"), Some(s!("$8.50")));
        assert_eq!(extract_price("$1,200"), Some(s!("$1,200")));
        assert_eq!(extract_price("market price"), None);
    }

    #[test]
    fn clean_price_parses_or_gives_up() {
        assert_eq!(clean_price("$12.50"), Some(12.5));
        assert_eq!(clean_price("$1,234.50"), Some(1234.5));
        assert_eq!(clean_price(""), None);
        assert_eq!(clean_price("free"), None);
        assert_eq!(clean_price("$1.2.3"), None);
    }

    #[test]
    fn normalize_ws_squeezes() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }
}
