//! Stem normalization: raw file or directory stem → URL-friendly slug.
//!
//! [`normalize`] is a pure function of its inputs. The pipeline is:
//!
//! 1. split off preserved affixes ([`affix::split`])
//! 2. fold the body to lowercase ASCII with a single separator style
//! 3. pad a leading numeric token (`3-report` → `03-report`)
//! 4. shorten to a maximum length on token boundaries
//! 5. reassemble `prefix + [digits + sep] + body + suffix`
pub mod affix;
mod fold;

use std::collections::BTreeSet;

/// Everything [`normalize`] needs besides the stem itself.
#[derive(Debug, Clone, Copy)]
pub struct StemPolicy<'a> {
    /// Join words with `-` when `true`, `_` otherwise.
    pub dash: bool,
    /// Prefixes left untouched at the start of a stem.
    pub prefixes: &'a BTreeSet<String>,
    /// Suffixes left untouched at the end of a stem.
    pub suffixes: &'a BTreeSet<String>,
    /// Upper bound on the stem length, enforced on token boundaries.
    pub max_length: Option<usize>,
    /// Width that a leading numeric token is clamped and padded to.
    pub digit_width: Option<usize>,
}

impl StemPolicy<'_> {
    /// Word separator selected by [`dash`](Self::dash).
    #[must_use]
    pub const fn separator(&self) -> char {
        if self.dash { '-' } else { '_' }
    }
}

/// Normalize `stem` into a slug.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use pathslug::slug::{StemPolicy, normalize};
///
/// let prefixes = BTreeSet::from(["_".to_string()]);
/// let suffixes = BTreeSet::new();
/// let policy = StemPolicy {
///     dash: true,
///     prefixes: &prefixes,
///     suffixes: &suffixes,
///     max_length: None,
///     digit_width: Some(2),
/// };
///
/// assert_eq!(normalize("3 Report", &policy), "03-report");
/// assert_eq!(normalize("_config", &policy), "_config");
/// ```
#[must_use]
pub fn normalize(stem: &str, policy: &StemPolicy<'_>) -> String {
    let sep = policy.separator();
    let affixes = affix::split(stem, policy.prefixes, policy.suffixes);
    let body = fold::slugify(affixes.body, sep);
    let (digits, body) = extract_leading_digits(&body, sep, policy.digit_width);

    let body = match policy.max_length {
        Some(max) => {
            let mut limit = max.saturating_sub(affixes.prefix.chars().count());
            if let Some(digits) = &digits {
                limit = limit.saturating_sub(digits.len() + 1);
            }
            shorten(&body, limit, sep)
        }
        None => body,
    };

    let mut out = String::with_capacity(stem.len() + 4);
    out.push_str(affixes.prefix);
    if let Some(digits) = digits {
        out.push_str(&digits);
        out.push(sep);
    }
    out.push_str(&body);
    out.push_str(affixes.suffix);
    out
}

/// Pull a leading numeric token off `body` when it is followed by a word.
///
/// Only applies when a width is configured, the first token is all digits
/// and the second token is all letters. Returns the padded number and the
/// rest of the body.
fn extract_leading_digits(body: &str, sep: char, width: Option<usize>) -> (Option<String>, String) {
    let Some(width) = width else {
        return (None, body.to_string());
    };
    let Some((first, rest)) = body.split_once(sep) else {
        return (None, body.to_string());
    };
    let second = rest.split(sep).next().unwrap_or_default();
    let numeric = !first.is_empty() && first.chars().all(|c| c.is_ascii_digit());
    let alphabetic = !second.is_empty() && second.chars().all(|c| c.is_ascii_alphabetic());
    if numeric && alphabetic {
        (Some(clamp_and_pad(first, width)), rest.to_string())
    } else {
        (None, body.to_string())
    }
}

/// Clamp a decimal string to `10^width - 1` and zero-pad it to `width`.
///
/// Works on the digits directly so arbitrarily long numbers and widths
/// never overflow.
fn clamp_and_pad(number: &str, width: usize) -> String {
    if width == 0 {
        return "0".to_string();
    }
    let significant = number.trim_start_matches('0');
    if significant.len() > width {
        "9".repeat(width)
    } else {
        format!("{significant:0>width$}")
    }
}

/// Keep whole `sep`-delimited tokens of `body` while they fit in `limit`.
///
/// The first token is always kept, even when it alone exceeds the limit.
fn shorten(body: &str, limit: usize, sep: char) -> String {
    if body.len() <= limit {
        return body.to_string();
    }
    let mut tokens = body.split(sep);
    let mut out = tokens.next().unwrap_or_default().to_string();
    for token in tokens {
        if out.len() + sep.len_utf8() + token.len() > limit {
            break;
        }
        out.push(sep);
        out.push_str(token);
    }
    out
}
