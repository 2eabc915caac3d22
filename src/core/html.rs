// src/core/html.rs
use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::error::{Error, Result};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| Error::Selector(s!(css)))
}

/// Compile a priority list of selectors, keeping the order.
pub fn selectors(list: &[&str]) -> Result<Vec<Selector>> {
    list.iter().map(|css| selector(css)).collect()
}

/// Visible text of an element, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect::<Vec<_>>().join(" ");
    normalize_ws(&raw)
}

/// Text nodes trimmed and glued without a separator, so markup such as
/// `<span>$</span>12.50` reads back as `$12.50`.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// First element matching any of `sels`, tried in order.
pub fn select_first<'a>(el: ElementRef<'a>, sels: &[Selector]) -> Option<ElementRef<'a>> {
    sels.iter().find_map(|sel| el.select(sel).next())
}

/// Text of the first match in priority order; empty when nothing matches.
pub fn select_first_text(el: ElementRef<'_>, sels: &[Selector]) -> String {
    select_first(el, sels).map(text_of).unwrap_or_default()
}

/// All elements for the first selector that matches anything in `doc`,
/// with the index of the selector that won.
pub fn select_all_first_hit<'a>(
    doc: &'a Html,
    sels: &[Selector],
) -> Option<(usize, Vec<ElementRef<'a>>)> {
    sels.iter().enumerate().find_map(|(i, sel)| {
        let hits: Vec<_> = doc.select(sel).collect();
        if hits.is_empty() { None } else { Some((i, hits)) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_selector_in_priority_order_wins() {
        let doc = Html::parse_fragment(
            r#"<div><h3>Second</h3><h4> First
               choice </h4></div>"#,
        );
        let sels = selectors(&["h4", "h3"]).unwrap();
        assert_eq!(select_first_text(doc.root_element(), &sels), "First choice");
    }

    #[test]
    fn missing_match_is_empty() {
        let doc = Html::parse_fragment("<div><p>x</p></div>");
        let sels = selectors(&[".nope"]).unwrap();
        assert_eq!(select_first_text(doc.root_element(), &sels), "");
    }

    #[test]
    fn stripped_text_glues_nodes() {
        let doc = Html::parse_fragment("<p><span> $ </span>\n 12.50 <b>ea</b></p>");
        let p = select_first(doc.root_element(), &selectors(&["p"]).unwrap()).unwrap();
        assert_eq!(stripped_text(p), "$12.50ea");
        assert_eq!(text_of(p), "$ 12.50 ea");
    }

    #[test]
    fn bad_selector_is_an_error() {
        assert!(matches!(selector("div[["), Err(Error::Selector(_))));
    }

    #[test]
    fn first_hit_reports_selector_index() {
        let doc = Html::parse_document(r#"<ul><li class="b">1</li><li class="b">2</li></ul>"#);
        let sels = selectors(&[".a", ".b"]).unwrap();
        let (idx, hits) = select_all_first_hit(&doc, &sels).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(hits.len(), 2);
    }
}
