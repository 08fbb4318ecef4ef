/*!
 * Rebuilding the translated tree.
 *
 * The destination is produced in two passes: a verbatim copy of the source
 * tree under a fresh sibling directory, then the renames. Every renamed entry
 * first moves to a staging name unique to its key (deepest-first, so its
 * ancestors still carry their copied names), then moves from the staging name
 * to its final name (top-down, so its ancestors already carry their final
 * names). A translated name equal to a sibling's untranslated name therefore
 * never lands on that sibling.
 *
 * A failure in either pass leaves the destination as it is; there is no
 * rollback.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};
use walkdir::WalkDir;

use crate::errors::AppError;
use crate::names::TranslatedNames;
use crate::tree::{Entry, EntryKey, SourceTree};

/// Suffix appended to the source folder name by default
pub const DEFAULT_DESTINATION_SUFFIX: &str = " - Translated";

/// Pick a sibling name for the destination root that does not exist yet.
///
/// Tries `<name><suffix>`, then `<name><suffix> 1`, `<name><suffix> 2`, ...
pub fn destination_root_name(source_root: &Path, suffix: &str) -> Result<String, AppError> {
    let base = source_root
        .file_name()
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Input path has no folder name: {}", source_root.display()))
        })?
        .to_string_lossy();
    let parent = source_root.parent().unwrap_or(Path::new(""));

    let candidate = format!("{}{}", base, suffix);
    if !parent.join(&candidate).exists() {
        return Ok(candidate);
    }

    let mut i = 1u32;
    while parent.join(format!("{} {}", candidate, i)).exists() {
        i += 1;
    }
    Ok(format!("{} {}", candidate, i))
}

/// Destination path of every entry, relative to the destination root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMap {
    paths: Vec<PathBuf>,
}

impl PathMap {
    /// Map each entry to its translated ancestors joined with its translated name.
    ///
    /// Fails before touching the filesystem if two entries would land on the
    /// same destination path.
    pub fn build(tree: &SourceTree, names: &TranslatedNames) -> Result<Self, AppError> {
        let mut dir_keys: HashMap<&Path, EntryKey> = HashMap::new();
        let mut taken: HashMap<PathBuf, EntryKey> = HashMap::new();
        let mut paths: Vec<PathBuf> = Vec::with_capacity(tree.len());

        for entry in &tree.entries {
            let name = names.get(entry.key).ok_or_else(|| {
                AppError::Unknown(format!("No translated name for entry {}", entry.key))
            })?;

            let parent = entry.relative_path.parent().unwrap_or(Path::new(""));
            let destination = match dir_keys.get(parent) {
                Some(parent_key) => paths[parent_key.index()].join(name),
                None => PathBuf::from(name),
            };

            if let Some(other) = taken.get(&destination) {
                return Err(AppError::DestinationCollision {
                    path: destination,
                    first: tree.entries[other.index()].relative_path.clone(),
                    second: entry.relative_path.clone(),
                });
            }
            taken.insert(destination.clone(), entry.key);

            if entry.is_dir {
                dir_keys.insert(entry.relative_path.as_path(), entry.key);
            }
            paths.push(destination);
        }

        Ok(Self { paths })
    }

    /// Destination relative path of an entry
    pub fn get(&self, key: EntryKey) -> Option<&Path> {
        self.paths.get(key.index()).map(PathBuf::as_path)
    }

    /// All destination paths in traversal order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// A single rename inside the copied tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Apply renames in the order given, stopping at the first failure.
///
/// A rename never replaces an existing file or folder.
pub fn apply_renames(ops: &[RenameOp]) -> Result<(), AppError> {
    for op in ops {
        if fs::symlink_metadata(&op.to).is_ok() {
            return Err(AppError::copy_rebuild(&op.to, "rename target already exists"));
        }
        fs::rename(&op.from, &op.to).map_err(|e| AppError::copy_rebuild(&op.from, e))?;
    }
    Ok(())
}

/// Temporary name an entry holds between the two rename passes
pub fn staging_name(key: EntryKey) -> String {
    format!(".{}.translating", key.index())
}

/// Copy `source` to a new directory `destination`, keeping every name.
///
/// `destination` must not exist yet.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<(), AppError> {
    if destination.exists() {
        return Err(AppError::copy_rebuild(destination, "destination already exists"));
    }

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::copy_rebuild(source, e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| AppError::copy_rebuild(entry.path(), e))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target).map_err(|e| AppError::copy_rebuild(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| AppError::copy_rebuild(&target, e))?;
        }
    }
    Ok(())
}

/// Everything needed to materialize the translated tree
#[derive(Debug, Clone)]
pub struct RebuildPlan {
    /// Source directory being translated
    pub source_root: PathBuf,
    /// New sibling directory that will hold the translation
    pub destination_root: PathBuf,
    /// Destination path of every entry, relative to `destination_root`
    pub path_map: PathMap,
    /// Renames into staging names deepest-first, then out of them top-down
    pub renames: Vec<RenameOp>,
}

impl RebuildPlan {
    /// Plan the destination root, the path map and the rename sequence
    pub fn new(tree: &SourceTree, names: &TranslatedNames, suffix: &str) -> Result<Self, AppError> {
        let root_name = destination_root_name(&tree.root, suffix)?;
        let destination_root = tree
            .root
            .parent()
            .unwrap_or(Path::new(""))
            .join(root_name);
        let path_map = PathMap::build(tree, names)?;

        let changed: Vec<&Entry> = tree
            .entries
            .iter()
            .filter(|entry| names.get(entry.key).is_some_and(|name| name != entry.name))
            .collect();
        let mut renames = Vec::with_capacity(changed.len() * 2);

        // Reverse traversal order visits every child before its parent.
        for entry in changed.iter().rev() {
            let from = destination_root.join(&entry.relative_path);
            let to = from.with_file_name(staging_name(entry.key));
            renames.push(RenameOp { from, to });
        }

        for entry in &changed {
            let final_path = path_map.get(entry.key).ok_or_else(|| {
                AppError::Unknown(format!("No destination path for entry {}", entry.key))
            })?;
            let to = destination_root.join(final_path);
            let from = to.with_file_name(staging_name(entry.key));
            renames.push(RenameOp { from, to });
        }

        Ok(Self {
            source_root: tree.root.clone(),
            destination_root,
            path_map,
            renames,
        })
    }

    /// Absolute destination paths in traversal order
    pub fn destination_paths(&self) -> Vec<PathBuf> {
        self.path_map
            .paths()
            .iter()
            .map(|p| self.destination_root.join(p))
            .collect()
    }

    /// Copy the source tree, then apply the planned renames
    pub fn execute(&self) -> Result<(), AppError> {
        info!("Copying {} to {}", self.source_root.display(), self.destination_root.display());
        copy_tree(&self.source_root, &self.destination_root)?;

        debug!("Applying {} renames", self.renames.len());
        apply_renames(&self.renames)
    }
}
