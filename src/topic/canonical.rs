use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());
static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes a title into comparable dedup key material.
///
/// Titles that differ only in casing, digits, punctuation, embedded markup,
/// links, or whitespace canonicalize identically. The steps run in a fixed
/// order: markup and URLs must go before the symbol strip or their leftovers
/// (`/`, `:`) would be collapsed into adjacent words differently.
///
/// The output is never displayed; originals are stored verbatim.
pub fn canonicalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = TAG_RE.replace_all(&lowered, "");
    let stripped = URL_RE.replace_all(&stripped, "");
    let stripped = DIGIT_RE.replace_all(&stripped, "");
    let stripped = SYMBOL_RE.replace_all(&stripped, "");
    let collapsed = SPACE_RE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
