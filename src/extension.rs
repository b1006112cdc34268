//! File-name splitting and canonical extension mapping.
use std::collections::BTreeMap;

/// Split a file name into stem and extension.
///
/// The extension includes its leading dot. Names without a dot, and names
/// whose only dot is the leading one (`.bashrc`), have no extension. A
/// trailing dot yields the extension `"."`.
///
/// # Examples
///
/// ```
/// use pathslug::extension::split_name;
///
/// assert_eq!(split_name("notes.yml"), ("notes", Some(".yml")));
/// assert_eq!(split_name("archive.tar.gz"), ("archive.tar", Some(".gz")));
/// assert_eq!(split_name(".bashrc"), (".bashrc", None));
/// assert_eq!(split_name("Makefile"), ("Makefile", None));
/// ```
#[must_use]
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    let hidden_only = name.starts_with('.') && name.matches('.').count() == 1;
    if hidden_only {
        return (name, None);
    }
    match name.rfind('.') {
        Some(idx) => {
            let (stem, ext) = name.split_at(idx);
            (stem, Some(ext))
        }
        None => (name, None),
    }
}

/// Map `ext` through the rename table.
///
/// The lookup uses the extension without its leading dot and is
/// case-sensitive. A hit returns the mapped extension with a leading dot; a
/// miss returns `ext` unchanged, including an empty string.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use pathslug::extension::map_extension;
///
/// let map = BTreeMap::from([("yml".to_string(), "yaml".to_string())]);
/// assert_eq!(map_extension(".yml", &map), ".yaml");
/// assert_eq!(map_extension(".YML", &map), ".YML");
/// assert_eq!(map_extension("", &map), "");
/// ```
#[must_use]
pub fn map_extension(ext: &str, mapping: &BTreeMap<String, String>) -> String {
    mapping
        .get(ext.trim_start_matches('.'))
        .map_or_else(|| ext.to_string(), |mapped| format!(".{mapped}"))
}
