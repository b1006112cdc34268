//! Body folding: word-boundary casing, transliteration, separator policy.

/// Split camel-case words with `_`, turn `-` into `_` and lowercase.
///
/// An underscore is inserted before an uppercase ASCII letter that either
/// follows a lowercase letter or digit (`draftOne` → `draft_one`) or ends an
/// uppercase run and starts a capitalised word (`HTMLParser` →
/// `html_parser`).
pub(super) fn underscore(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars.get(i - 1).copied().unwrap_or_default();
            let next = chars.get(i + 1).copied().unwrap_or_default();
            let after_lower = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let ends_acronym = prev.is_ascii_uppercase() && next.is_ascii_lowercase();
            if after_lower || ends_acronym {
                out.push('_');
            }
        }
        out.push(if c == '-' { '_' } else { c });
    }
    out.to_lowercase()
}

/// Whether `c` survives slugification as-is.
const fn is_permitted(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_')
}

/// Fold `body` to a lowercase ASCII slug joined by `sep`.
///
/// Non-ASCII text is transliterated; anything outside `[a-z0-9._-]` becomes
/// a separator; `-` and `_` both become `sep`; runs of `sep` collapse and
/// leading/trailing separators are trimmed. `.` is kept.
pub(super) fn slugify(body: &str, sep: char) -> String {
    let ascii = deunicode::deunicode(&underscore(body)).to_ascii_lowercase();
    let mut out = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        let c = if is_permitted(c) && c != '-' && c != '_' {
            c
        } else {
            sep
        };
        if c == sep && (out.is_empty() || out.ends_with(sep)) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with(sep) {
        out.pop();
    }
    out
}
