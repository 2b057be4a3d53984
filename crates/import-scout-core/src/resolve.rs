//! Relative specifier resolution against the importing file's directory.
//!
//! Pure string arithmetic: no I/O and no existence checks. The result may
//! lack an extension; [`crate::ExtensionProber`] materializes it.

use crate::error::ResolveError;

/// Directory segments of `file`, without the file name itself.
fn directory_segments(file: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = file.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();
    segments
}

fn join(rooted: bool, segments: &[&str]) -> String {
    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Walk `spec` over the directory of `current_file`.
///
/// Returns the resolved segments and whether a `..` had nothing left to pop.
fn walk<'a>(current_file: &'a str, spec: &'a str) -> (Vec<&'a str>, bool) {
    let mut stack = directory_segments(current_file);
    let mut underflow = false;

    for segment in spec.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    underflow = true;
                }
            }
            other => stack.push(other),
        }
    }

    (stack, underflow)
}

/// Resolve `spec` relative to `current_file`.
///
/// A `..` with no directory left to pop is ignored and the remaining
/// segments are appended, so `/App.js` + `../../x` yields `/x`.
pub fn resolve(current_file: &str, spec: &str) -> String {
    let (segments, _) = walk(current_file, spec);
    join(current_file.starts_with('/'), &segments)
}

/// Like [`resolve`], but rejects specifiers that climb above the root and
/// specifiers that are not relative.
pub fn resolve_strict(current_file: &str, spec: &str) -> Result<String, ResolveError> {
    if !(spec.starts_with("./") || spec.starts_with("../")) {
        return Err(ResolveError::NotRelative {
            spec: spec.to_string(),
        });
    }

    let (segments, underflow) = walk(current_file, spec);
    if underflow {
        return Err(ResolveError::EscapesRoot {
            from: current_file.to_string(),
            spec: spec.to_string(),
        });
    }

    Ok(join(current_file.starts_with('/'), &segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_directory() {
        assert_eq!(resolve("/App.js", "./Foo"), "/Foo");
        assert_eq!(resolve("/src/App.js", "./components/Button"), "/src/components/Button");
    }

    #[test]
    fn test_parent_directories() {
        assert_eq!(resolve("/src/pages/Home.tsx", "../lib/api"), "/src/lib/api");
        assert_eq!(resolve("/a/b/c/d.js", "../../x.js"), "/a/x.js");
    }

    #[test]
    fn test_inner_dot_segments_are_normalized() {
        assert_eq!(resolve("/src/App.js", "./a/./b/../c"), "/src/a/c");
    }

    #[test]
    fn test_underflow_keeps_remaining_suffix() {
        assert_eq!(resolve("/App.js", "../Foo"), "/Foo");
        assert_eq!(resolve("/src/App.js", "../../../lib/x"), "/lib/x");
    }

    #[test]
    fn test_unrooted_paths_stay_unrooted() {
        assert_eq!(resolve("src/App.js", "./Foo"), "src/Foo");
    }

    #[test]
    fn test_strict_rejects_escape() {
        assert_eq!(
            resolve_strict("/src/App.js", "../../x"),
            Err(ResolveError::EscapesRoot {
                from: "/src/App.js".into(),
                spec: "../../x".into(),
            })
        );
        assert_eq!(resolve_strict("/src/App.js", "../x"), Ok("/x".to_string()));
    }

    #[test]
    fn test_strict_rejects_package_specifier() {
        assert!(matches!(
            resolve_strict("/App.js", "react"),
            Err(ResolveError::NotRelative { .. })
        ));
    }
}
