//! Preserved prefix/suffix extraction.
use std::collections::BTreeSet;

/// A stem split into its preserved affixes and the body to slugify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affixes<'a> {
    /// Repeated preserved prefix (e.g. `__` or `.`), possibly empty.
    pub prefix: &'a str,
    /// Remaining text between prefix and suffix.
    pub body: &'a str,
    /// Repeated preserved suffix, possibly empty.
    pub suffix: &'a str,
}

/// Split `stem` into `prefix`, `body` and `suffix`.
///
/// The prefix is the longest run of repetitions of a single configured
/// prefix at the start of the stem; the suffix is the same at the end of
/// what remains. Candidates are tried longest first, ties broken
/// lexicographically, so the split does not depend on set iteration order.
/// Empty candidates are ignored.
#[must_use]
pub fn split<'a>(
    stem: &'a str,
    prefixes: &BTreeSet<String>,
    suffixes: &BTreeSet<String>,
) -> Affixes<'a> {
    let prefix_len = leading_run(stem, prefixes);
    let (prefix, rest) = stem.split_at(prefix_len);
    let suffix_len = trailing_run(rest, suffixes);
    let (body, suffix) = rest.split_at(rest.len() - suffix_len);
    Affixes {
        prefix,
        body,
        suffix,
    }
}

/// Non-empty candidates, longest first.
fn ordered(candidates: &BTreeSet<String>) -> Vec<&str> {
    let mut ordered: Vec<&str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|c| !c.is_empty())
        .collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    ordered
}

/// Byte length of the repeated-affix run at the start of `text`.
fn leading_run(text: &str, candidates: &BTreeSet<String>) -> usize {
    for affix in ordered(candidates) {
        let mut rest = text;
        while let Some(next) = rest.strip_prefix(affix) {
            rest = next;
        }
        if rest.len() < text.len() {
            return text.len() - rest.len();
        }
    }
    0
}

/// Byte length of the repeated-affix run at the end of `text`.
fn trailing_run(text: &str, candidates: &BTreeSet<String>) -> usize {
    for affix in ordered(candidates) {
        let mut rest = text;
        while let Some(next) = rest.strip_suffix(affix) {
            rest = next;
        }
        if rest.len() < text.len() {
            return text.len() - rest.len();
        }
    }
    0
}
