//! Interned package load-paths.
//!
//! A load-path is the stable identity of a package node. Refs carry two of
//! them each, so they are interned: copies are free and equality is a
//! pointer comparison.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Global load-path interner
static LOAD_PATHS: LazyLock<RwLock<HashSet<&'static str>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// The canonical string identifying a package.
#[derive(Clone, Copy)]
pub struct LoadPath {
    inner: &'static str,
}

impl LoadPath {
    /// Intern a load-path. Trailing slashes are not part of the identity.
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path.as_ref();
        let path = path.strip_suffix('/').unwrap_or(path);

        {
            let interner = LOAD_PATHS.read().unwrap_or_else(|e| e.into_inner());
            if let Some(&interned) = interner.get(path) {
                return LoadPath { inner: interned };
            }
        }

        let mut interner = LOAD_PATHS.write().unwrap_or_else(|e| e.into_inner());
        if let Some(&interned) = interner.get(path) {
            return LoadPath { inner: interned };
        }

        let leaked: &'static str = Box::leak(path.to_string().into_boxed_str());
        interner.insert(leaked);
        LoadPath { inner: leaked }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.inner
    }

    /// The last `/`-separated segment, e.g. `http` for `net/http`.
    pub fn last_segment(&self) -> &'static str {
        last_segment(self.inner)
    }

    /// The load-path one segment up, or `None` at the top.
    pub fn parent(&self) -> Option<LoadPath> {
        parent(self.inner).map(LoadPath::new)
    }

    /// Whether this path equals `prefix` or lies below it.
    pub fn is_under(&self, prefix: &str) -> bool {
        let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
        prefix.is_empty()
            || self.inner == prefix
            || self
                .inner
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Last `/`-separated segment of a slash path.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Slash path one segment up; `None` when there is no `/` left.
pub fn parent(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(head, _)| head)
}

impl Deref for LoadPath {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.inner
    }
}

impl AsRef<str> for LoadPath {
    #[inline]
    fn as_ref(&self) -> &str {
        self.inner
    }
}

impl Borrow<str> for LoadPath {
    #[inline]
    fn borrow(&self) -> &str {
        self.inner
    }
}

impl PartialEq for LoadPath {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for LoadPath {}

impl PartialEq<str> for LoadPath {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for LoadPath {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}

impl PartialOrd for LoadPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LoadPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(other.inner)
    }
}

// Hashes the content, not the address, so `HashMap<LoadPath, _>` can be
// queried with a plain `&str` through `Borrow<str>`.
impl Hash for LoadPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl fmt::Debug for LoadPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}

impl fmt::Display for LoadPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner, f)
    }
}

impl From<&str> for LoadPath {
    fn from(s: &str) -> Self {
        LoadPath::new(s)
    }
}

impl From<String> for LoadPath {
    fn from(s: String) -> Self {
        LoadPath::new(s)
    }
}

impl From<&String> for LoadPath {
    fn from(s: &String) -> Self {
        LoadPath::new(s)
    }
}

impl Serialize for LoadPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LoadPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(LoadPath::new(s))
    }
}
