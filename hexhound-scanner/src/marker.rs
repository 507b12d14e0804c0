use regex::Regex;
use std::sync::LazyLock;

/// Marker file expected at each directory level of the listing tree.
pub const DEFAULT_MARKER: &str = "README";

// 32 contiguous lowercase-hex characters, the shape of an MD5 digest. The
// pattern is a fixed constant, so a compile failure is a programming error.
static HEX32: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-f0-9]{32}").expect("hex-32 pattern failed to compile"));

/// Returns true if `text` contains a digest-like run anywhere as a
/// substring. Unanchored: surrounding text and whitespace are irrelevant.
pub fn contains_hex32(text: &str) -> bool {
    HEX32.is_match(text)
}
