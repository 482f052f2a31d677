//! Lexical path helpers for verbose module names.
//!
//! Nothing here touches the filesystem except [`resolve_path`], which reads
//! the current directory for relative input.

use std::path::{Component, Path, PathBuf};

/// Drop `.` components and fold each `..` into the component before it.
///
/// `..` directly under the root stays at the root; leading `..` of a relative
/// path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Absolute, normalized form of `path`. Relative paths are taken from the
/// current directory; if that cannot be read the path is only normalized.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(&cwd.join(path)),
        Err(_) => normalize_path(path),
    }
}

/// Path of `to` relative to `from`, `/`-separated, with `..` for each
/// component of `from` that `to` does not share.
///
/// Both sides go through [`resolve_path`] first. When they share no root
/// (different drives) the resolved `to` is returned whole.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from = resolve_path(from);
    let to = resolve_path(to);
    let from: Vec<Component<'_>> = from.components().collect();
    let to_components: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(&to_components)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return to.to_string_lossy().into_owned();
    }

    let ups = std::iter::repeat("..".to_string()).take(from.len() - common);
    let downs = to_components[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/root/./src/../lib")), Path::new("/root/lib"));
        assert_eq!(normalize_path(Path::new("/root/.")), Path::new("/root"));
        assert_eq!(normalize_path(Path::new("/..")), Path::new("/"));
        assert_eq!(normalize_path(Path::new("../a/../b")), Path::new("../b"));
        assert_eq!(normalize_path(Path::new("a/..")), Path::new(""));
    }

    #[test]
    fn test_resolve_relative_path_against_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_path(Path::new(".")), normalize_path(&cwd));
        assert_eq!(resolve_path(Path::new("src/../a.js")), normalize_path(&cwd.join("a.js")));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/root"), Path::new("/root/src/foo.js")),
            "src/foo.js"
        );
        assert_eq!(
            relative_path(Path::new("/root/app"), Path::new("/root/lib/x.js")),
            "../lib/x.js"
        );
        assert_eq!(relative_path(Path::new("/root"), Path::new("/root")), "");
        assert_eq!(
            relative_path(Path::new("/root/"), Path::new("/root/./a.js")),
            "a.js"
        );
    }

    #[test]
    fn test_relative_path_folds_parent_segments() {
        assert_eq!(
            relative_path(Path::new("/root/src/.."), Path::new("/root/lib/x.js")),
            "lib/x.js"
        );
        assert_eq!(
            relative_path(Path::new("/root"), Path::new("/root/src/../lib/x.js")),
            "lib/x.js"
        );
        assert_eq!(
            relative_path(Path::new("/root/a/b"), Path::new("/root/a/b/../../c.js")),
            "../../c.js"
        );
    }

    #[test]
    fn test_relative_root_resolves_against_current_dir() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(relative_path(Path::new("."), &cwd.join("src/foo.js")), "src/foo.js");
        assert_eq!(relative_path(Path::new("src"), &cwd.join("src/foo.js")), "foo.js");
        assert!(!relative_path(Path::new("."), Path::new("/elsewhere/x.js")).contains("//"));
    }
}
