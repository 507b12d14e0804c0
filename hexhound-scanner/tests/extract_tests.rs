// Tests for href extraction and child filtering

use hexhound_scanner::extract::{collect_hrefs, filter_children};
use hexhound_scanner::marker::DEFAULT_MARKER;

// A captured nginx-style index page.
const LISTING: &str = r#"<html>
<head><title>Index of /.hidden/amcbevgondgcrloowluziypjdh/</title></head>
<body bgcolor="white">
<h1>Index of /.hidden/amcbevgondgcrloowluziypjdh/</h1><hr><pre><a href="../">../</a>
<a href="acbnunauucfplzmaglkvqgswwn/">acbnunauucfplzmaglkvqgswwn/</a>                        11-Sep-2001 21:21                   -
<a href="bvwrujeymrvzurvywnjxzlfkwa/">bvwrujeymrvzurvywnjxzlfkwa/</a>                        11-Sep-2001 21:21                   -
<a href="ccevyakvydrjhsvbnwvestcfeb/">ccevyakvydrjhsvbnwvestcfeb/</a>                        11-Sep-2001 21:21                   -
<a href="README">README</a>                                             11-Sep-2001 21:21                  34
</pre><hr></body>
</html>
"#;

// ============================================================================
// Href Extraction Tests
// ============================================================================

#[test]
fn test_collect_hrefs_document_order() {
    let hrefs = collect_hrefs(LISTING);
    assert_eq!(
        hrefs,
        vec![
            "../",
            "acbnunauucfplzmaglkvqgswwn/",
            "bvwrujeymrvzurvywnjxzlfkwa/",
            "ccevyakvydrjhsvbnwvestcfeb/",
            "README",
        ]
    );
}

#[test]
fn test_collect_hrefs_counts_only_anchors_with_href() {
    let html = r#"<html><body>
        <a href="one/">one</a>
        <a name="anchor-without-href">two</a>
        <a href="three/">three</a>
    </body></html>"#;

    let hrefs = collect_hrefs(html);
    assert_eq!(hrefs, vec!["one/", "three/"]);
}

#[test]
fn test_collect_hrefs_empty_document() {
    assert!(collect_hrefs("").is_empty());
    assert!(collect_hrefs("<html><body><p>no links</p></body></html>").is_empty());
}

#[test]
fn test_collect_hrefs_nested_anchors_pre_order() {
    let html = r#"<div><a href="outer/"><span><a href="inner/">x</a></span></a></div>"#;
    // html5ever splits nested anchors; both survive in document order.
    let hrefs = collect_hrefs(html);
    assert_eq!(hrefs, vec!["outer/", "inner/"]);
}

#[test]
fn test_collect_hrefs_recovers_from_malformed_markup() {
    let html = r#"<html><body><a href="still-here/">ok<div></a>"#;
    let hrefs = collect_hrefs(html);
    assert_eq!(hrefs, vec!["still-here/"]);
}

// ============================================================================
// Child Filter Tests
// ============================================================================

const BASE: &str = "http://10.0.0.1/.hidden/";

fn hrefs(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_filter_children_drops_marker_and_parent() {
    let input = hrefs(&["../", "sub/", "leaf/", "README"]);
    let children = filter_children(BASE, &input, DEFAULT_MARKER);
    assert_eq!(
        children,
        vec![
            "http://10.0.0.1/.hidden/sub/",
            "http://10.0.0.1/.hidden/leaf/",
        ]
    );
}

#[test]
fn test_filter_children_every_child_starts_with_base() {
    let input = hrefs(&["../", "a/", "b/", "image.png", "README"]);
    let children = filter_children(BASE, &input, DEFAULT_MARKER);

    assert!(!children.iter().any(|c| c.ends_with("README")));
    assert!(!children.iter().any(|c| c.ends_with("../")));
    for child in &children {
        assert!(child.starts_with(BASE));
    }
}

#[test]
fn test_filter_children_keeps_plain_files() {
    // Broad-match stance: anything that is not the marker or the parent
    // entry is descended into, file extensions included.
    let input = hrefs(&["image.png", "notes.txt"]);
    let children = filter_children(BASE, &input, DEFAULT_MARKER);
    assert_eq!(
        children,
        vec![
            "http://10.0.0.1/.hidden/image.png",
            "http://10.0.0.1/.hidden/notes.txt",
        ]
    );
}

#[test]
fn test_filter_children_exact_case_sensitive_match() {
    // Only the exact marker spelling is dropped.
    let input = hrefs(&["readme", "README.md", "README"]);
    let children = filter_children(BASE, &input, DEFAULT_MARKER);
    assert_eq!(
        children,
        vec![
            "http://10.0.0.1/.hidden/readme",
            "http://10.0.0.1/.hidden/README.md",
        ]
    );
}

#[test]
fn test_filter_children_respects_custom_marker() {
    let input = hrefs(&["../", "NOTES.txt", "README"]);
    let children = filter_children(BASE, &input, "NOTES.txt");
    assert_eq!(children, vec!["http://10.0.0.1/.hidden/README"]);
}

#[test]
fn test_filter_children_leaf_directory() {
    let input = hrefs(&["../", "README"]);
    let children = filter_children(BASE, &input, DEFAULT_MARKER);
    assert!(children.is_empty());
}

#[test]
fn test_filter_children_empty_input() {
    let children = filter_children(BASE, &[], DEFAULT_MARKER);
    assert!(children.is_empty());
}

#[test]
fn test_filter_children_is_pure() {
    let input = hrefs(&["../", "sub/", "README"]);
    let first = filter_children(BASE, &input, DEFAULT_MARKER);
    let second = filter_children(BASE, &input, DEFAULT_MARKER);
    assert_eq!(first, second);
}
