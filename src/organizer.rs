/// Directory organizing engine.
///
/// This module drives a single organize pass over a folder: it snapshots the
/// top-level listing, routes oversized files through the archive gate, maps
/// the rest to category subdirectories (optionally bucketed by last-modified
/// month), resolves name collisions, moves files, tallies per-label counts
/// and records every move for a later undo.
use crate::archive;
use crate::category::CategoryTable;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed path of the two-column CSV report written after every pass.
pub const REPORT_FILE: &str = "organize_report.csv";

/// Record of the moves performed by the most recent organize pass.
///
/// Maps the original file name (not the full path, and not any renamed
/// variant produced by collision resolution) to the file's original full
/// path. The record is owned by the caller and threaded explicitly between
/// an organize call and a subsequent undo call; each new pass produces a
/// fresh record, discarding any prior undo opportunity.
#[derive(Debug, Default)]
pub struct UndoRecord {
    entries: HashMap<String, PathBuf>,
}

impl UndoRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no moves are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The recorded original path for a file name, if any.
    pub fn original_path(&self, file_name: &str) -> Option<&Path> {
        self.entries.get(file_name).map(PathBuf::as_path)
    }

    /// Iterates over `(file_name, original_path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Forgets all recorded moves.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn insert(&mut self, file_name: String, original_path: PathBuf) {
        self.entries.insert(file_name, original_path);
    }
}

/// Collaborator that checks the caller's credential before a pass mutates
/// anything.
///
/// The engine itself has no UI dependency; the front end implements this
/// with a blocking password prompt, tests with a pass-through.
pub trait CredentialGate {
    /// Obtains and checks the credential. Returns true when access is granted.
    fn verify(&mut self) -> bool;
}

/// A [`CredentialGate`] that always grants access, for headless callers.
pub struct OpenGate;

impl CredentialGate for OpenGate {
    fn verify(&mut self) -> bool {
        true
    }
}

/// Knobs for a single organize pass.
#[derive(Debug, Clone, Copy)]
pub struct OrganizeOptions {
    /// Sub-bucket each category by the file's last-modified `YYYY-MM`.
    pub sort_by_date: bool,
    /// Files larger than this many MiB are compressed in place instead of
    /// being classified and moved.
    pub size_limit_mib: u64,
}

/// What an organize pass produced.
#[derive(Debug)]
pub struct OrganizeOutcome {
    /// Per-destination-label move counts, in aggregation order. When date
    /// bucketing is on, labels carry the bucket (e.g. "Images/2024-03").
    pub counts: Vec<(String, usize)>,
    /// Moves performed by this pass, for a later undo.
    pub undo: UndoRecord,
    /// Files compressed in place by the size gate (not undoable).
    pub archived: usize,
}

impl OrganizeOutcome {
    /// Total number of files moved (excludes archived files).
    pub fn total_moved(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Human-readable `label: N files` lines in aggregation order.
    pub fn summary(&self) -> String {
        self.counts
            .iter()
            .map(|(label, count)| format!("{}: {} files", label, count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Errors that can occur while organizing a folder.
#[derive(Debug)]
pub enum OrganizeError {
    /// No folder was selected.
    MissingFolder,
    /// The credential check did not pass; no file was touched.
    AuthenticationFailed,
    /// The base directory could not be read.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file's metadata could not be read.
    FileInspectionFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to compress an oversized file. The original is left in place.
    ArchiveFailed { path: PathBuf, reason: String },
    /// Failed to write the CSV report.
    ReportWriteFailed { source: std::io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFolder => write!(f, "No folder selected"),
            Self::AuthenticationFailed => write!(f, "Wrong password"),
            Self::InvalidBasePath { path, source } => {
                write!(f, "Cannot read folder {}: {}", path.display(), source)
            }
            Self::FileInspectionFailed { path, source } => {
                write!(f, "Cannot inspect {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::ArchiveFailed { path, reason } => {
                write!(f, "Failed to archive {}: {}", path.display(), reason)
            }
            Self::ReportWriteFailed { source } => {
                write!(f, "Failed to write report file: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organizing operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Returns a file name guaranteed not to exist in `dir` at call time.
///
/// If `name` is free it is returned unchanged; otherwise `base_1.ext`,
/// `base_2.ext`, … are probed until an unused name is found. Not safe under
/// concurrent writers to the same directory, which is acceptable for a
/// single-threaded interactive tool.
///
/// # Examples
///
/// ```no_run
/// use sortbox::organizer::resolve_collision;
/// use std::path::Path;
///
/// // With a.txt already present, the next free name is a_1.txt.
/// let name = resolve_collision(Path::new("/some/dir"), "a.txt");
/// ```
pub fn resolve_collision(dir: &Path, name: &str) -> String {
    if !dir.join(name).exists() {
        return name.to_string();
    }

    let desired = Path::new(name);
    let stem = desired
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let ext = desired
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let candidate = format!("{}_{}{}", stem, counter, ext);
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves `file_path` into `dest_dir`, creating the directory chain on demand
/// and resolving name collisions. Returns the final destination path.
fn move_into(dest_dir: &Path, file_path: &Path, file_name: &str) -> OrganizeResult<PathBuf> {
    if !dest_dir.exists() {
        fs::create_dir_all(dest_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;
    }

    let resolved = resolve_collision(dest_dir, file_name);
    let destination = dest_dir.join(resolved);

    fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
        source: file_path.to_path_buf(),
        destination: destination.clone(),
        source_error: e,
    })?;

    Ok(destination)
}

/// Runs an organize pass over `folder` without progress reporting.
///
/// See [`organize_with_progress`] for the full contract.
pub fn organize(
    folder: &str,
    table: &CategoryTable,
    options: &OrganizeOptions,
    gate: &mut dyn CredentialGate,
) -> OrganizeResult<OrganizeOutcome> {
    organize_with_progress(folder, table, options, gate, &mut |_, _| {})
}

/// Runs an organize pass over `folder`.
///
/// The top-level listing is snapshotted once at the start; subdirectories are
/// skipped entirely and files moved out of the top level are never revisited
/// by the same pass. Per entry, in listing order: the size gate either
/// compresses the file in place (no classification, no undo entry) or the
/// file is classified by extension, optionally routed into a `YYYY-MM`
/// bucket derived from its last-modified time, renamed past any collision
/// and moved. After all entries, immediate subdirectories that are empty are
/// pruned (one level only).
///
/// `on_progress` is invoked once per processed entry with
/// `(processed, total)` so an interactive front end can keep a progress
/// indicator responsive; all work is synchronous and strictly ordered.
///
/// # Errors
///
/// Fails with [`OrganizeError::MissingFolder`] for an empty path and
/// [`OrganizeError::AuthenticationFailed`] when the gate denies access, in
/// both cases before any file is touched. I/O failures propagate and abort
/// the pass; files moved before the failure stay moved, and the undo record
/// for the partial pass is lost.
pub fn organize_with_progress(
    folder: &str,
    table: &CategoryTable,
    options: &OrganizeOptions,
    gate: &mut dyn CredentialGate,
    on_progress: &mut dyn FnMut(usize, usize),
) -> OrganizeResult<OrganizeOutcome> {
    if folder.trim().is_empty() {
        return Err(OrganizeError::MissingFolder);
    }
    if !gate.verify() {
        return Err(OrganizeError::AuthenticationFailed);
    }

    let base_path = Path::new(folder);
    let entries = snapshot_files(base_path)?;

    let mut undo = UndoRecord::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut archived = 0usize;
    let total = entries.len();

    for (idx, file_path) in entries.iter().enumerate() {
        let Some(file_name) = file_path.file_name() else {
            continue;
        };
        let file_name = file_name.to_string_lossy().into_owned();

        let metadata =
            fs::metadata(file_path).map_err(|e| OrganizeError::FileInspectionFailed {
                path: file_path.clone(),
                source: e,
            })?;

        if archive::exceeds_limit(metadata.len(), options.size_limit_mib) {
            archive::archive_in_place(file_path)?;
            archived += 1;
            on_progress(idx + 1, total);
            continue;
        }

        let ext = extension_of(file_path);
        let category = table.classify(&ext);

        let (label, dest_dir) = if options.sort_by_date {
            let modified: DateTime<Local> = metadata
                .modified()
                .map_err(|e| OrganizeError::FileInspectionFailed {
                    path: file_path.clone(),
                    source: e,
                })?
                .into();
            let bucket = modified.format("%Y-%m").to_string();
            (
                format!("{}/{}", category, bucket),
                base_path.join(category).join(&bucket),
            )
        } else {
            (category.to_string(), base_path.join(category))
        };

        move_into(&dest_dir, file_path, &file_name)?;
        undo.insert(file_name, file_path.clone());
        tally(&mut counts, &label);
        on_progress(idx + 1, total);
    }

    prune_empty_subdirs(base_path);

    Ok(OrganizeOutcome {
        counts,
        undo,
        archived,
    })
}

/// Counts would-be destinations per category without touching any file.
///
/// Every table category plus "Others" appears in the result, zero counts
/// included, in table order. The size gate is not consulted. No credential
/// is required since nothing is mutated.
pub fn preview(folder: &str, table: &CategoryTable) -> OrganizeResult<Vec<(String, usize)>> {
    if folder.trim().is_empty() {
        return Err(OrganizeError::MissingFolder);
    }

    let base_path = Path::new(folder);
    let mut counts: Vec<(String, usize)> = table.names().map(|n| (n.to_string(), 0)).collect();
    counts.push((CategoryTable::OTHERS.to_string(), 0));

    for file_path in snapshot_files(base_path)? {
        let ext = extension_of(&file_path);
        let category = table.classify(&ext);
        if let Some(slot) = counts.iter_mut().find(|(name, _)| name == category) {
            slot.1 += 1;
        }
    }

    Ok(counts)
}

/// Writes the `Category,Files` report, overwriting any previous one.
pub fn write_report(path: &Path, counts: &[(String, usize)]) -> OrganizeResult<()> {
    let mut report = String::from("Category,Files\n");
    for (label, count) in counts {
        report.push_str(&format!("{},{}\n", label, count));
    }
    fs::write(path, report).map_err(|e| OrganizeError::ReportWriteFailed { source: e })
}

/// Snapshots the non-directory entries of `base_path`, in listing order.
fn snapshot_files(base_path: &Path) -> OrganizeResult<Vec<PathBuf>> {
    let listing = fs::read_dir(base_path).map_err(|e| OrganizeError::InvalidBasePath {
        path: base_path.to_path_buf(),
        source: e,
    })?;

    Ok(listing
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| !path.is_dir())
        .collect())
}

/// Lower-cased extension with leading dot, or empty for extension-less names.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn tally(counts: &mut Vec<(String, usize)>, label: &str) {
    if let Some(slot) = counts.iter_mut().find(|(name, _)| name == label) {
        slot.1 += 1;
    } else {
        counts.push((label.to_string(), 1));
    }
}

/// Removes immediate subdirectories of `base_path` that are empty.
///
/// One level only; nested empty directories deeper in the tree are left
/// alone. Failures are ignored, the next pass will retry.
fn prune_empty_subdirs(base_path: &Path) {
    let Ok(listing) = fs::read_dir(base_path) else {
        return;
    };
    for entry in listing.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let is_empty = fs::read_dir(&path)
                .map(|mut it| it.next().is_none())
                .unwrap_or(false);
            if is_empty {
                let _ = fs::remove_dir(&path);
            }
        }
    }
}
