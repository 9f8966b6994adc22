//! DirStore - a document store on the local filesystem.
//!
//! Layout under the root:
//!
//! ```text
//! packages/<document id>.json   one document per package version
//! files.jsonl                   one FileRecord per line
//! refs.jsonl                    one RefRecord per line
//! ```
//!
//! Document ids contain `/`, which is escaped as `%2F` in file names.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use walkdir::WalkDir;

use crate::core::{document_id, FileRecord, PackageRecord, RefRecord};
use crate::store::{DocumentStore, StoreError};

const PACKAGES_DIR: &str = "packages";
const FILES: &str = "files.jsonl";
const REFS: &str = "refs.jsonl";

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open the store at `root`, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let packages = root.join(PACKAGES_DIR);
        fs::create_dir_all(&packages).map_err(|source| StoreError::Io {
            path: packages,
            source,
        })?;
        tracing::debug!("opened store at {}", root.display());
        Ok(DirStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn package_path(&self, doc_id: &str) -> PathBuf {
        let name = doc_id.replace('%', "%25").replace('/', "%2F");
        self.root.join(PACKAGES_DIR).join(format!("{}.json", name))
    }

    /// Every stored package, ordered by document file name.
    pub fn packages(&self) -> Result<Vec<PackageRecord>, StoreError> {
        let dir = self.root.join(PACKAGES_DIR);
        let mut records = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| StoreError::Io {
                path: dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let record = serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
                records.push(record);
            }
        }
        Ok(records)
    }

    pub fn files(&self) -> Result<Vec<FileRecord>, StoreError> {
        self.read_lines(FILES)
    }

    pub fn refs(&self) -> Result<Vec<RefRecord>, StoreError> {
        self.read_lines(REFS)
    }

    fn read_lines<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        let path = self.root.join(name);
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn append_line<T: Serialize>(&self, name: &str, record: &T) -> Result<(), StoreError> {
        let path = self.root.join(name);
        let mut line = serde_json::to_string(record).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| f.write_all(line.as_bytes()))
            .map_err(|source| StoreError::Io { path, source })
    }
}

impl DocumentStore for DirStore {
    fn package_exists(&self, load_path: &str, version: i64) -> bool {
        self.package_path(&document_id(load_path, version)).is_file()
    }

    fn put_package(&self, record: &PackageRecord) -> Result<(), StoreError> {
        let path = self.package_path(&record.document_id());
        let json = serde_json::to_string_pretty(record).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    fn put_file(&self, record: &FileRecord) -> Result<(), StoreError> {
        self.append_line(FILES, record)
    }

    fn put_ref(&self, record: &RefRecord) -> Result<(), StoreError> {
        self.append_line(REFS, record)
    }
}
