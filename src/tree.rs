/*!
 * Source tree enumeration.
 *
 * Walks the source directory depth-first, parent before children, and
 * assigns every node a dense `EntryKey` in visitation order. The root itself
 * is not an entry. Siblings are visited in file-name order so two runs over
 * the same tree produce the same keys.
 */

use std::fmt;
use std::path::{Path, PathBuf};
use log::debug;
use walkdir::WalkDir;

use crate::errors::AppError;

/// Stable index of an entry within one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey(usize);

impl EntryKey {
    /// Create a key from a raw index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the entry in the enumeration order
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One file or directory found under the enumeration root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable key, equal to the entry's position in `SourceTree::entries`
    pub key: EntryKey,
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the enumeration root
    pub relative_path: PathBuf,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Final path component
    pub name: String,
    /// File stem; equal to `name` for directories
    pub stem: String,
    /// File extension including the leading dot, empty for directories
    pub suffix: String,
}

impl Entry {
    /// Text sent for translation: the directory name or the file stem
    pub fn name_text(&self) -> &str {
        &self.stem
    }

    /// Nesting depth below the root, starting at 1 for direct children
    pub fn depth(&self) -> usize {
        self.relative_path.components().count()
    }
}

/// Ordered result of walking a source directory
#[derive(Debug, Clone)]
pub struct SourceTree {
    /// Enumeration root
    pub root: PathBuf,
    /// Entries in traversal order; `entries[k].key.index() == k`
    pub entries: Vec<Entry>,
}

impl SourceTree {
    /// Walk `root` and collect every entry below it
    pub fn enumerate<P: AsRef<Path>>(root: P) -> Result<Self, AppError> {
        let root = root.as_ref();

        if !root.exists() {
            return Err(AppError::InvalidInput(format!(
                "Input path does not exist: {}",
                root.display()
            )));
        }
        // `.`, `..` and relative paths have no usable folder name or parent
        let root = std::fs::canonicalize(root).map_err(|e| {
            AppError::InvalidInput(format!("Cannot resolve input path {}: {}", root.display(), e))
        })?;
        let root = root.as_path();
        if !root.is_dir() {
            return Err(AppError::InvalidInput(format!(
                "Input path is not a folder: {}",
                root.display()
            )));
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        for dir_entry in walker {
            let dir_entry = dir_entry.map_err(|e| {
                AppError::InvalidInput(format!("Failed to read directory entry: {}", e))
            })?;
            let path = dir_entry.path().to_path_buf();
            let relative_path = path
                .strip_prefix(root)
                .map_err(|e| AppError::InvalidInput(e.to_string()))?
                .to_path_buf();
            let is_dir = dir_entry.file_type().is_dir();
            let (name, stem, suffix) = split_name(&path, is_dir)?;

            entries.push(Entry {
                key: EntryKey::new(entries.len()),
                path,
                relative_path,
                is_dir,
                name,
                stem,
                suffix,
            });
        }

        debug!("Enumerated {} entries under {}", entries.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Base name of the root directory
    pub fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Look up an entry by key
    pub fn get(&self, key: EntryKey) -> Option<&Entry> {
        self.entries.get(key.index())
    }

    /// Number of entries below the root
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the root is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, name-text)` pairs in traversal order
    pub fn name_texts(&self) -> Vec<(EntryKey, String)> {
        self.entries
            .iter()
            .map(|e| (e.key, e.name_text().to_string()))
            .collect()
    }
}

fn split_name(path: &Path, is_dir: bool) -> Result<(String, String, String), AppError> {
    let non_utf8 = || {
        AppError::InvalidInput(format!(
            "Name is not valid UTF-8: {}",
            path.to_string_lossy()
        ))
    };

    let name = path
        .file_name()
        .ok_or_else(non_utf8)?
        .to_str()
        .ok_or_else(non_utf8)?
        .to_string();

    if is_dir {
        return Ok((name.clone(), name, String::new()));
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&name)
        .to_string();
    let suffix = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    Ok((name, stem, suffix))
}
