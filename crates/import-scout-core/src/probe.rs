//! Extension inference against the virtual file set.

use crate::VirtualFileSet;

/// Suffixes tried, in priority order, when a specifier omits its extension.
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["", ".js", ".jsx", ".ts", ".tsx"];

/// Maps an extension-less candidate path onto an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionProber {
    extensions: Vec<String>,
    index_files: bool,
}

impl Default for ExtensionProber {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            index_files: false,
        }
    }
}

impl ExtensionProber {
    /// Prober with the default suffix list and no index-file lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the suffix list.
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Also try `<base>/index<ext>` once every direct suffix has missed.
    pub fn with_index_files(mut self, enabled: bool) -> Self {
        self.index_files = enabled;
        self
    }

    /// Configured suffixes.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Candidate paths for `base`, in the order they are tried.
    pub fn candidates(&self, base: &str) -> Vec<String> {
        let mut candidates: Vec<String> = self
            .extensions
            .iter()
            .map(|ext| format!("{}{}", base, ext))
            .collect();

        if self.index_files {
            let dir = base.trim_end_matches('/');
            candidates.extend(
                self.extensions
                    .iter()
                    .filter(|ext| !ext.is_empty())
                    .map(|ext| format!("{}/index{}", dir, ext)),
            );
        }

        candidates
    }

    /// First candidate for `base` present in `files`.
    pub fn probe(&self, files: &VirtualFileSet, base: &str) -> Option<String> {
        self.candidates(base)
            .into_iter()
            .find(|candidate| files.contains_key(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> VirtualFileSet {
        paths
            .iter()
            .map(|p| (p.to_string(), String::new()))
            .collect()
    }

    #[test]
    fn test_exact_path_wins() {
        let set = files(&["/Foo", "/Foo.js"]);
        assert_eq!(ExtensionProber::new().probe(&set, "/Foo"), Some("/Foo".into()));
    }

    #[test]
    fn test_priority_order() {
        let set = files(&["/Foo.tsx", "/Foo.ts", "/Foo.jsx"]);
        assert_eq!(ExtensionProber::new().probe(&set, "/Foo"), Some("/Foo.jsx".into()));

        let set = files(&["/Foo.tsx", "/Foo.ts"]);
        assert_eq!(ExtensionProber::new().probe(&set, "/Foo"), Some("/Foo.ts".into()));
    }

    #[test]
    fn test_missing_returns_none() {
        let set = files(&["/Bar.js", "/Foo.css"]);
        assert_eq!(ExtensionProber::new().probe(&set, "/Foo"), None);
    }

    #[test]
    fn test_index_files_only_when_enabled() {
        let set = files(&["/components/index.tsx"]);
        assert_eq!(ExtensionProber::new().probe(&set, "/components"), None);
        assert_eq!(
            ExtensionProber::new()
                .with_index_files(true)
                .probe(&set, "/components"),
            Some("/components/index.tsx".into())
        );
    }

    #[test]
    fn test_custom_extensions() {
        let set = files(&["/util.mjs"]);
        let prober = ExtensionProber::new().with_extensions(["", ".mjs"]);
        assert_eq!(prober.probe(&set, "/util"), Some("/util.mjs".into()));
        assert_eq!(prober.extensions().len(), 2);
    }
}
