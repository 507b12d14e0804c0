use scraper::{Html, Selector};

/// Parent-directory entry emitted by index-style listing pages.
const PARENT_ENTRY: &str = "../";

/// Collect the raw href attribute value of every anchor in `html`, in
/// document order. Anchors without an href are skipped silently. html5ever
/// recovers from malformed markup, so this always yields a best-effort list.
pub fn collect_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Resolve the descendable children of a listing at `base` (absolute URL
/// ending in a path separator). The marker file itself and the parent entry
/// are dropped; every other href is treated as a child and resolved by
/// concatenation, since listing servers emit entries relative to their own
/// directory. Input order is preserved. Pure function.
///
/// Note this keeps the broad-match stance of a reconnaissance walk: plain
/// files other than the marker are descended into too, and dead-end when
/// their bodies parse to zero anchors.
pub fn filter_children(base: &str, hrefs: &[String], marker: &str) -> Vec<String> {
    hrefs
        .iter()
        .filter(|href| href.as_str() != marker && href.as_str() != PARENT_ENTRY)
        .map(|href| format!("{base}{href}"))
        .collect()
}
