use std::path::{Component, Path, PathBuf};

/// Prefix marking a path as relative to the scene's base directory, as written by Blender.
pub const BASE_RELATIVE_PREFIX: &str = "//";

/// Resolve `path` against `base`.
///
/// * absolute paths are returned unchanged
/// * paths starting with [BASE_RELATIVE_PREFIX], and other relative paths, are joined onto `base`
///   and lexically normalized (`.` dropped, `..` applied); a relative `base` is first made
///   absolute against the working directory
///
/// The file system is not consulted; the result need not exist.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let rel = match path.to_str().and_then(|s| s.strip_prefix(BASE_RELATIVE_PREFIX)) {
        Some(stripped) => Path::new(stripped),
        None if path.is_absolute() => return path.to_path_buf(),
        None => path,
    };
    let base = if base.is_absolute() {
        base.to_path_buf()
    } else {
        std::path::absolute(base).unwrap_or_else(|e| {
            tracing::warn!(base = ?base, error = %e, "couldn't make base directory absolute");
            base.to_path_buf()
        })
    };
    normalize(&base.join(rel))
}

fn normalize(path: &Path) -> PathBuf {
    let mut res = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => (),
            // `..` above the root stays at the root
            Component::ParentDir => {
                if matches!(res.components().next_back(), Some(Component::Normal(_))) {
                    res.pop();
                } else if !res.has_root() {
                    res.push(comp);
                }
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => res.push(comp),
        }
    }
    res
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn absolute_passes_through() {
        assert_eq!(
            resolve_path(Path::new("/scene"), Path::new("/tex/../a.png")),
            PathBuf::from("/tex/../a.png")
        );
    }

    #[test]
    fn relative_joins_base() {
        assert_eq!(
            resolve_path(Path::new("/scene"), Path::new("tex/./a.png")),
            PathBuf::from("/scene/tex/a.png")
        );
        assert_eq!(
            resolve_path(Path::new("/scene/sub"), Path::new("//../tex/a.png")),
            PathBuf::from("/scene/tex/a.png")
        );
    }

    #[test]
    fn relative_base() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            resolve_path(Path::new("assets"), Path::new("a.png")),
            normalize(&cwd.join("assets/a.png"))
        );
    }
}
