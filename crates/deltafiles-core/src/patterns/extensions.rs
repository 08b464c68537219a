//! File-extension inclusion filter

/// Set of accepted extensions. Empty accepts every path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Parse a whitespace-separated list such as `".ts .tsx md"`.
    ///
    /// A missing leading dot is added, so `ts` and `.ts` are the same entry.
    pub fn parse(input: &str) -> Self {
        let mut extensions: Vec<String> = Vec::new();
        for raw in input.split_whitespace() {
            let ext = if raw.starts_with('.') {
                raw.to_string()
            } else {
                format!(".{}", raw)
            };
            if ext != "." && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        Self { extensions }
    }

    /// True when no extension was configured
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Configured extensions, each with its leading dot
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `path` passes the filter
    #[inline]
    pub fn accepts(&self, path: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        match extension_of(path) {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

/// Extension of the last path component, dot included.
///
/// A leading dot does not start an extension: `.bashrc` has none, `a.tar.gz` has `.gz`.
pub fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("src/main.rs"), Some(".rs"));
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("home/.bashrc"), None);
        assert_eq!(extension_of("dir.d/file"), None);
        assert_eq!(extension_of("trailing."), Some("."));
    }

    #[test]
    fn test_parse_normalizes_dots() {
        let filter = ExtensionFilter::parse("  .ts tsx\t.ts md ");
        assert_eq!(filter.extensions(), [".ts", ".tsx", ".md"]);
    }

    #[test]
    fn test_empty_accepts_everything() {
        let filter = ExtensionFilter::parse("");
        assert!(filter.is_empty());
        assert!(filter.accepts("Makefile"));
        assert!(filter.accepts("a b.txt"));
    }

    #[test]
    fn test_accepts_members_only() {
        let filter = ExtensionFilter::parse(".ts");
        assert!(filter.accepts("x.ts"));
        assert!(filter.accepts("src/deep/x.ts"));
        assert!(!filter.accepts("y.md"));
        assert!(!filter.accepts("x.tsx"));
        assert!(!filter.accepts("ts"));
        assert!(!filter.accepts("X.TS"));
    }

    #[test]
    fn test_lone_dot_is_ignored() {
        assert!(ExtensionFilter::parse(" . ").is_empty());
    }
}
