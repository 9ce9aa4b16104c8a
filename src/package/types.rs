//! Package file list and on-disk writer

use crate::error::{Error, Result, ResultExt};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// One generated file, addressed by its path relative to the package root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    /// Relative path using `/` separators, e.g. `Data/Solution_Contoso.json`
    pub path: String,
    pub contents: String,
}

/// Ordered list of files making up one solution package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionPackage {
    /// Root folder name (the solution name)
    pub root: String,
    pub files: Vec<PackageFile>,
}

impl SolutionPackage {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    /// Add a file, returning the path it was stored under
    ///
    /// A path already taken gets a numeric suffix before its extension
    /// (`Rule.yaml`, `Rule_2.yaml`, ...).
    pub fn push(&mut self, path: impl Into<String>, contents: impl Into<String>) -> String {
        let path = self.unique_path(path.into());
        self.files.push(PackageFile {
            path: path.clone(),
            contents: contents.into(),
        });
        path
    }

    fn unique_path(&self, path: String) -> String {
        if self.file(&path).is_none() {
            return path;
        }
        let (stem, extension) = match path.rfind('.') {
            Some(dot) if dot > path.rfind('/').map_or(0, |slash| slash + 1) => {
                path.split_at(dot)
            }
            _ => (path.as_str(), ""),
        };
        let mut n = 2;
        loop {
            let candidate = format!("{stem}_{n}{extension}");
            if self.file(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Look up a file by its relative path
    pub fn file(&self, path: &str) -> Option<&PackageFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Relative paths in package order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `<dir>/<root>/`, creating folders as needed
    ///
    /// Returns the written paths in package order.
    ///
    /// The root and every path segment must be a plain name; `..`, `.`,
    /// empty and absolute segments are rejected before anything is written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        if !is_plain_segment(&self.root) {
            return Err(Error::UnsafePath {
                path: self.root.clone(),
            });
        }
        if let Some(file) = self
            .files
            .iter()
            .find(|f| !f.path.split('/').all(is_plain_segment))
        {
            return Err(Error::UnsafePath {
                path: file.path.clone(),
            });
        }

        let root = dir.as_ref().join(&self.root);
        let mut written = Vec::with_capacity(self.files.len());

        for file in &self.files {
            let target = file
                .path
                .split('/')
                .fold(root.clone(), |acc, part| acc.join(part));

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(&target, &file.contents)
                .with_context(|| format!("Failed to write {}", target.display()))?;

            debug!(path = %target.display(), bytes = file.contents.len(), "Wrote package file");
            written.push(target);
        }

        info!(root = %root.display(), files = written.len(), "Wrote solution package");
        Ok(written)
    }
}

/// A single normal path component (no separators, `..`, `.` or root)
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
