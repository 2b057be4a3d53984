//! Relative import extraction.
//!
//! Matching is line-oriented: an import statement has to sit on a single
//! line. Multi-line imports, dynamic `import()` calls and `export ... from`
//! re-exports are not recognized.

use once_cell::sync::Lazy;
use regex::Regex;

/// `import [clause from] './spec'` with a `./` or `../` specifier.
static RELATIVE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport[ \t]+(?:[\w$*{}, \t]+?[ \t]+from[ \t]*)?['"](\.\.?/[^'"\r\n]+)['"]"#)
        .expect("relative import pattern is valid")
});

/// Extract the relative import specifiers of `source`, in order of appearance.
///
/// Duplicates are kept; package imports (`'react'`) are skipped.
pub fn extract_imports(source: &str) -> Vec<String> {
    RELATIVE_IMPORT
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
