//! Corpus - a filesystem root from which load-paths resolve to files.
//!
//! Positions and package file lists are stored relative to the corpus
//! that contains them, so an index built on one machine stays valid when
//! the same sources are checked out somewhere else.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error creating a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus root must not be empty")]
    Empty,

    #[error("corpus `{0}` has a relative root")]
    Relative(PathBuf),
}

/// An absolute root directory under which a family of load-paths live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus(PathBuf);

impl Corpus {
    /// Create a corpus rooted at `root`, which must be absolute.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CorpusError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(CorpusError::Empty);
        }
        if !root.is_absolute() {
            return Err(CorpusError::Relative(root));
        }
        Ok(Corpus(root))
    }

    /// The corpus root.
    pub fn root(&self) -> &Path {
        &self.0
    }

    /// Whether `path` lies under this corpus. The root itself counts.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }

    /// Whether a regular file exists at `rel` inside this corpus.
    pub fn contains_rel(&self, rel: &str) -> bool {
        std::fs::metadata(self.abs(rel))
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Path of `path` relative to the root, or `path` unchanged if it is
    /// not contained.
    pub fn rel(&self, path: &Path) -> String {
        if !self.contains(path) {
            return path.to_string_lossy().into_owned();
        }
        match pathdiff::diff_paths(path, &self.0) {
            Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Some(rel) => rel.to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        }
    }

    /// Absolute path of `rel` within this corpus.
    pub fn abs(&self, rel: &str) -> PathBuf {
        let rel = rel.trim_start_matches('/');
        if rel.is_empty() {
            return self.0.clone();
        }
        self.0.join(rel)
    }

    /// Load-path of the package holding the corpus-relative file `rel`.
    pub fn pkg(&self, rel: &str) -> String {
        match rel.rfind('/') {
            Some(idx) => rel[..idx].to_string(),
            None => String::new(),
        }
    }

    /// Default corpora: the `src` directory of `$GOROOT` and of each
    /// `$GOPATH` entry.
    pub fn default_corpora() -> Vec<Corpus> {
        corpora_from(
            env::var("GOROOT").ok().as_deref(),
            env::var("GOPATH").ok().as_deref(),
        )
    }
}

fn corpora_from(goroot: Option<&str>, gopath: Option<&str>) -> Vec<Corpus> {
    let mut roots: Vec<PathBuf> = Vec::new();
    if let Some(root) = goroot.filter(|r| !r.is_empty()) {
        roots.push(Path::new(root).join("src"));
    }
    if let Some(gopath) = gopath {
        roots.extend(
            env::split_paths(gopath)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.join("src")),
        );
    }

    roots
        .into_iter()
        .filter_map(|root| match Corpus::new(root) {
            Ok(corpus) => Some(corpus),
            Err(e) => {
                tracing::debug!("ignoring corpus: {}", e);
                None
            }
        })
        .collect()
}

/// Relativize `path` against an optional corpus.
pub fn rel_to(corpus: Option<&Corpus>, path: &Path) -> String {
    match corpus {
        Some(c) => c.rel(path),
        None => path.to_string_lossy().into_owned(),
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn corpus(root: &str) -> Corpus {
        Corpus::new(root).unwrap()
    }

    #[test]
    fn test_contains() {
        assert!(corpus("/a/b/c").contains(Path::new("/a/b/c/d")));
        assert!(corpus("/a/b/c/d").contains(Path::new("/a/b/c/d")));
        assert!(corpus("/").contains(Path::new("/a/b/c/d")));
        assert!(!corpus("/a/b/c").contains(Path::new("/a/b/d")));
        assert!(!corpus("/a/b/c").contains(Path::new("/")));
        assert!(!corpus("/a/b/c").contains(Path::new("/a/b/")));
        assert!(!corpus("/a/b/c").contains(Path::new("/a/b/cd")));
    }

    #[test]
    fn test_rel() {
        assert_eq!(corpus("/a/b/c").rel(Path::new("/a/b/c/d")), "d");
        assert_eq!(corpus("/a/b/c/d").rel(Path::new("/a/b/c/d")), ".");
        assert_eq!(corpus("/").rel(Path::new("/a/b/c/d")), "a/b/c/d");
        assert_eq!(corpus("/a/b/c").rel(Path::new("/a/b/d")), "/a/b/d");
        assert_eq!(corpus("/a/b/c").rel(Path::new("/")), "/");
    }

    #[test]
    fn test_new_rejects_relative_and_empty() {
        assert!(matches!(Corpus::new("a/b/c"), Err(CorpusError::Relative(_))));
        assert!(matches!(Corpus::new(""), Err(CorpusError::Empty)));
        assert_eq!(corpus("/a/b/c").root(), Path::new("/a/b/c"));
    }

    #[test]
    fn test_abs() {
        assert_eq!(corpus("/a/b").abs("c/d"), PathBuf::from("/a/b/c/d"));
        assert_eq!(corpus("/a/b").abs("/c/d"), PathBuf::from("/a/b/c/d"));
        assert_eq!(corpus("/a/b").abs(""), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_pkg() {
        assert_eq!(corpus("/a/b").pkg("c/d/e"), "c/d");
        assert_eq!(corpus("/a/b").pkg("c/d/"), "c/d");
        assert_eq!(corpus("/a/b").pkg(""), "");
    }

    #[test]
    fn test_contains_rel() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("pkg")).unwrap();
        std::fs::write(tmp.path().join("pkg/a.go"), "package pkg\n").unwrap();

        let c = Corpus::new(tmp.path()).unwrap();
        assert!(c.contains_rel("pkg/a.go"));
        assert!(!c.contains_rel("pkg"));
        assert!(!c.contains_rel("pkg/missing.go"));
    }

    #[test]
    fn test_corpora_from_env_values() {
        let corpora = corpora_from(Some("/usr/lib/go"), Some("/home/u/go:relative"));
        let roots: Vec<_> = corpora.iter().map(|c| c.root().to_path_buf()).collect();
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/usr/lib/go/src"),
                PathBuf::from("/home/u/go/src"),
            ]
        );
        assert!(corpora_from(None, None).is_empty());
    }
}
