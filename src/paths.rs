//! File discovery and exclusion matching.

use glob::{glob, Pattern};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Style checker default exclude list.
pub const DEFAULT_EXCLUDE: &[&str] = &[
    ".svn",
    "CVS",
    ".bzr",
    ".hg",
    ".git",
    "__pycache__",
    ".tox",
    ".nox",
    ".eggs",
    "*.egg",
];

/// Collect `*.py` files under `paths`.
///
/// Files are taken as given; directories are searched recursively. Results
/// under any of `skip_prefixes` are dropped; relative paths on either side
/// are resolved against `cwd` for that comparison. Output is normalized,
/// sorted and deduplicated.
pub fn rglob(paths: &[String], skip_prefixes: &[String], cwd: &Path) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for p in paths {
        let path = Path::new(p);
        if path.is_file() {
            found.insert(normalize(path));
            continue;
        }
        let pattern = format!("{}/**/*.py", p.trim_end_matches('/'));
        match glob(&pattern) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    if entry.is_file() {
                        found.insert(normalize(&entry));
                    }
                }
            }
            Err(err) => warn!(pattern = %pattern, error = %err, "invalid search pattern"),
        }
    }
    let skip: Vec<PathBuf> = skip_prefixes
        .iter()
        .map(|s| s.trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| normalize(&cwd.join(s)))
        .collect();
    found
        .into_iter()
        .filter(|f| {
            let abs = normalize(&cwd.join(f));
            !skip.iter().any(|s| abs.starts_with(s))
        })
        .collect()
}

/// Path of `file` relative to `root` when possible, else as given.
pub fn display_path(file: &Path, root: &Path) -> String {
    pathdiff::diff_paths(file, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| file.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Lexically resolve `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[derive(Debug, Clone)]
/// fnmatch-style exclude patterns anchored at a base directory.
///
/// A file is excluded when a pattern matches its basename, the name of any
/// parent directory, or its full path. Entries containing `/` are made
/// absolute against the base directory; for those that do not name a
/// `.py` file, a `dir/*` pattern is added so files beneath match too.
/// Relative file paths are resolved against the working directory, which
/// defaults to the base directory.
pub struct Exclusions {
    cwd: PathBuf,
    patterns: Vec<Pattern>,
}

impl Exclusions {
    pub fn new(entries: &[String], base: &Path) -> Self {
        let mut patterns = Vec::new();
        for raw in entries {
            let entry = raw.trim().trim_end_matches('/');
            if entry.is_empty() {
                continue;
            }
            let mut texts = vec![];
            if entry.contains('/') {
                let abs = normalize(&base.join(entry)).to_string_lossy().to_string();
                if !abs.ends_with(".py") {
                    texts.push(format!("{}/*", abs));
                }
                texts.push(abs);
            } else {
                texts.push(entry.to_string());
            }
            for text in texts {
                match Pattern::new(&text) {
                    Ok(p) => patterns.push(p),
                    Err(err) => warn!(pattern = %text, error = %err, "ignoring invalid exclude pattern"),
                }
            }
        }
        Self {
            cwd: base.to_path_buf(),
            patterns,
        }
    }

    /// Resolve relative file paths against `cwd` instead of the base.
    pub fn with_cwd(mut self, cwd: &Path) -> Self {
        self.cwd = cwd.to_path_buf();
        self
    }

    /// The default exclude list.
    pub fn defaults(base: &Path) -> Self {
        let entries: Vec<String> = DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect();
        Self::new(&entries, base)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let full = normalize(&self.cwd.join(path));
        let names = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(n) => n.to_str(),
                _ => None,
            });
        for name in names {
            if self.patterns.iter().any(|p| p.matches(name)) {
                return true;
            }
        }
        let full = full.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&full))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_rglob_finds_sorted_python_files_and_skips_prefixes() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pkg/sub")).unwrap();
        fs::create_dir_all(root.join("build")).unwrap();
        fs::write(root.join("pkg/b.py"), "").unwrap();
        fs::write(root.join("pkg/sub/a.py"), "").unwrap();
        fs::write(root.join("pkg/notes.txt"), "").unwrap();
        fs::write(root.join("build/gen.py"), "").unwrap();

        let base = root.to_string_lossy().to_string();
        let skip = vec![root.join("build").to_string_lossy().to_string()];
        let files = rglob(&[base.clone(), base], &skip, root);
        assert_eq!(
            files,
            vec![root.join("pkg/b.py"), root.join("pkg/sub/a.py")]
        );
    }

    #[test]
    fn test_rglob_accepts_explicit_file() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("setup.py");
        fs::write(&f, "").unwrap();
        let files = rglob(&[f.to_string_lossy().to_string()], &[], dir.path());
        assert_eq!(files, vec![f]);
    }

    #[test]
    fn test_rglob_relative_skip_prefix_against_cwd() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/gen")).unwrap();
        fs::write(root.join("src/gen/pb.py"), "").unwrap();
        fs::write(root.join("src/app.py"), "").unwrap();
        let src = root.join("src").to_string_lossy().to_string();
        let files = rglob(&[src], &["src/gen/".into()], root);
        assert_eq!(files, vec![root.join("src/app.py")]);
    }

    #[test]
    fn test_display_path_relative_to_root() {
        assert_eq!(display_path(Path::new("/r/pkg/a.py"), Path::new("/r")), "pkg/a.py");
        assert_eq!(display_path(Path::new("/other/a.py"), Path::new("/r")), "/other/a.py");
    }

    #[test]
    fn test_default_exclusions_match_directory_names() {
        let ex = Exclusions::defaults(Path::new("/r"));
        assert!(ex.is_excluded(Path::new("pkg/__pycache__/a.py")));
        assert!(ex.is_excluded(Path::new("dist/foo.egg/mod.py")));
        assert!(!ex.is_excluded(Path::new("pkg/a.py")));
    }

    #[test]
    fn test_exclusions_with_slash_are_anchored_at_base() {
        let ex = Exclusions::new(&["docs/conf.py".into(), "vendor/".into(), "*_pb2.py".into()], Path::new("/r"));
        assert!(ex.is_excluded(Path::new("docs/conf.py")));
        assert!(!ex.is_excluded(Path::new("pkg/docs/conf.py")));
        assert!(ex.is_excluded(Path::new("vendor/lib/x.py")));
        assert!(ex.is_excluded(Path::new("pkg/api_pb2.py")));
        assert!(!ex.is_excluded(Path::new("pkg/api.py")));
    }

    #[test]
    fn test_relative_files_resolve_against_cwd() {
        let ex = Exclusions::new(&["docs/conf.py".into()], Path::new("/r")).with_cwd(Path::new("/r/docs"));
        assert!(ex.is_excluded(Path::new("conf.py")));
        assert!(!ex.is_excluded(Path::new("docs/conf.py")));
    }

    #[test]
    fn test_normalize_resolves_dots() {
        assert_eq!(normalize(Path::new("/r/./a/../b.py")), PathBuf::from("/r/b.py"));
    }
}
