//! Versioning and filtering policies.
//!
//! Both are strategy objects handed to the graph at construction time.
//! Plain closures work for either.

use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::graph::errors::VersionError;
use crate::resolver::ResolvedPackage;

/// Assigns a version to a package about to be loaded. A failure means
/// the package is currently unloadable.
pub trait VersionPolicy {
    fn version(&self, pkg: &ResolvedPackage) -> Result<i64, VersionError>;
}

impl<F> VersionPolicy for F
where
    F: Fn(&ResolvedPackage) -> Result<i64, VersionError>,
{
    fn version(&self, pkg: &ResolvedPackage) -> Result<i64, VersionError> {
        self(pkg)
    }
}

/// Every package gets the same version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstantVersion(pub i64);

impl VersionPolicy for ConstantVersion {
    fn version(&self, _pkg: &ResolvedPackage) -> Result<i64, VersionError> {
        Ok(self.0)
    }
}

/// Newest modification time among a package's files, in nanoseconds
/// since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMtimeVersion;

impl VersionPolicy for FileMtimeVersion {
    fn version(&self, pkg: &ResolvedPackage) -> Result<i64, VersionError> {
        let mut newest: Option<i64> = None;
        for file in &pkg.files {
            let mtime = mtime_nanos(&file.path)?;
            newest = Some(newest.map_or(mtime, |n| n.max(mtime)));
        }
        newest.ok_or_else(|| VersionError::NoFiles(pkg.path.clone()))
    }
}

fn mtime_nanos(path: &Path) -> Result<i64, VersionError> {
    let io_err = |source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    };
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).map_err(io_err)?;
    let since_epoch = modified
        .duration_since(UNIX_EPOCH)
        .map_err(|_| VersionError::BeforeEpoch(path.to_path_buf()))?;
    i64::try_from(since_epoch.as_nanos()).map_err(|_| VersionError::BeforeEpoch(path.to_path_buf()))
}

/// Decides whether a versioned package should be populated.
pub trait PackageFilter {
    fn accept(&self, load_path: &str, version: i64) -> bool;
}

impl<F> PackageFilter for F
where
    F: Fn(&str, i64) -> bool,
{
    fn accept(&self, load_path: &str, version: i64) -> bool {
        self(load_path, version)
    }
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterPass;

impl PackageFilter for FilterPass {
    fn accept(&self, _load_path: &str, _version: i64) -> bool {
        true
    }
}
