//! Built-in configuration values.

/// Extension rename table, `from → to`, without dots.
pub const EXTENSION_MAP: &[(&str, &str)] = &[("yml", "yaml")];

/// Globs for entries that are never renamed or descended into.
pub const IGNORE_GLOBS: &[&str] = &[
    "**/__pycache__",
    "**/.DS_Store",
    "**/.git",
    "**/.ipynb_checkpoints",
    "**/LICENSE*",
    "**/README*",
];

/// Extensions whose stems are joined with `_` instead of `-`.
pub const UNDERSCORE_EXTENSIONS: &[&str] = &["py"];

/// Extensions that are split off before the stem is normalized.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[
    "bat", "cmd", "ipynb", "md", "ps1", "R", "Rmd", "rst", "toml", "yaml", "yml",
];

/// Extensions with a registered MIME type, also recognized.
pub const MIME_EXTENSIONS: &[&str] = &[
    "7z", "aac", "avi", "bin", "bmp", "bz2", "c", "css", "csv", "doc", "docx", "eml", "eps",
    "epub", "flac", "gif", "gz", "h", "htm", "html", "ico", "ics", "jar", "jpeg", "jpg", "js",
    "json", "m4a", "mid", "mjs", "mkv", "mov", "mp3", "mp4", "mpeg", "odp", "ods", "odt", "oga",
    "ogg", "ogv", "otf", "pdf", "png", "ppt", "pptx", "ps", "py", "rar", "rtf", "sh", "svg",
    "tar", "tex", "tif", "tiff", "ts", "ttf", "tsv", "txt", "wasm", "wav", "weba", "webm",
    "webp", "woff", "woff2", "xhtml", "xls", "xlsx", "xml", "zip",
];

/// Prefixes preserved verbatim at the start of a stem.
pub const PREFIXES: &[&str] = &["_", "."];

/// Suffixes preserved verbatim at the end of a stem.
pub const SUFFIXES: &[&str] = &["_"];
