/// Undo of the most recent organize pass.
///
/// Replays the caller-held [`UndoRecord`] by searching the folder tree for
/// each moved file by name and moving the first match back to its recorded
/// original path. Recorded names that cannot be located are skipped, not
/// treated as hard errors; the record is cleared after the attempt either
/// way, so exactly one undo is possible per pass.
use crate::organizer::UndoRecord;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What an undo attempt restored, missed and failed.
#[derive(Debug)]
pub struct UndoReport {
    /// Files moved back to their original path.
    pub restored_files: usize,
    /// Recorded names that could not be located anywhere in the tree.
    pub missed_files: Vec<String>,
    /// Located files whose move back failed, with the reason.
    pub failed_restores: Vec<(PathBuf, String)>,
}

impl UndoReport {
    fn new() -> Self {
        Self {
            restored_files: 0,
            missed_files: Vec::new(),
            failed_restores: Vec::new(),
        }
    }

    /// True when every recorded file was restored.
    pub fn is_complete_success(&self) -> bool {
        self.missed_files.is_empty() && self.failed_restores.is_empty()
    }
}

/// Replays undo records against a folder tree.
pub struct UndoEngine;

impl UndoEngine {
    /// Undoes the organize pass captured in `record`.
    ///
    /// Returns `None` without performing any I/O when the record is empty
    /// ("nothing to undo"). Otherwise every `(file_name, original_path)`
    /// entry is attempted: the folder and its subdirectories are searched
    /// for a file with that exact name and the first match is moved back.
    /// Misses are collected silently; rename failures are collected and
    /// iteration continues. The record is cleared unconditionally after all
    /// entries were attempted, even if some files were not found.
    ///
    /// Matching is by file name only, so two same-named files moved from
    /// different categories in one pass may swap original paths on restore.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortbox::organizer::UndoRecord;
    /// use sortbox::undo::UndoEngine;
    /// use std::path::Path;
    ///
    /// let mut record = UndoRecord::new();
    /// match UndoEngine::undo(Path::new("/path/to/folder"), &mut record) {
    ///     Some(report) => println!("Restored {} files", report.restored_files),
    ///     None => println!("Nothing to undo"),
    /// }
    /// ```
    pub fn undo(folder: &Path, record: &mut UndoRecord) -> Option<UndoReport> {
        if record.is_empty() {
            return None;
        }

        let mut report = UndoReport::new();
        for (file_name, original_path) in record.iter() {
            match Self::find_by_name(folder, file_name) {
                Some(current_path) => match fs::rename(&current_path, original_path) {
                    Ok(()) => report.restored_files += 1,
                    Err(e) => report.failed_restores.push((current_path, e.to_string())),
                },
                None => report.missed_files.push(file_name.to_string()),
            }
        }

        record.clear();
        Some(report)
    }

    /// First file named `file_name` under `folder`, walking top-down.
    fn find_by_name(folder: &Path, file_name: &str) -> Option<PathBuf> {
        WalkDir::new(folder)
            .into_iter()
            .flatten()
            .find(|entry| {
                entry.file_type().is_file() && entry.file_name().to_string_lossy() == file_name
            })
            .map(|entry| entry.into_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryTable;
    use crate::organizer::{OpenGate, OrganizeOptions, organize};
    use std::fs;
    use tempfile::TempDir;

    fn run_organize(temp_dir: &TempDir) -> UndoRecord {
        let table = CategoryTable::default();
        let options = OrganizeOptions {
            sort_by_date: false,
            size_limit_mib: 100,
        };
        let folder = temp_dir.path().to_string_lossy().into_owned();
        organize(&folder, &table, &options, &mut OpenGate)
            .expect("organize")
            .undo
    }

    #[test]
    fn test_undo_empty_record_performs_no_io() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut record = UndoRecord::new();
        assert!(UndoEngine::undo(temp_dir.path(), &mut record).is_none());
    }

    #[test]
    fn test_undo_restores_moved_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("report.pdf"), "content").expect("Failed to write file");

        let mut record = run_organize(&temp_dir);
        assert!(
            temp_dir
                .path()
                .join("Documents")
                .join("report.pdf")
                .exists()
        );

        let report = UndoEngine::undo(temp_dir.path(), &mut record).expect("report");

        assert_eq!(report.restored_files, 1);
        assert!(report.is_complete_success());
        assert!(temp_dir.path().join("report.pdf").exists());
        assert!(
            !temp_dir
                .path()
                .join("Documents")
                .join("report.pdf")
                .exists()
        );
        assert!(record.is_empty());
    }

    #[test]
    fn test_undo_twice_reports_nothing_to_undo() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("photo.jpg"), "x").expect("Failed to write file");

        let mut record = run_organize(&temp_dir);
        assert!(UndoEngine::undo(temp_dir.path(), &mut record).is_some());
        assert!(UndoEngine::undo(temp_dir.path(), &mut record).is_none());
    }

    #[test]
    fn test_undo_missing_target_is_skipped_and_record_cleared() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("photo.jpg"), "x").expect("Failed to write file");

        let mut record = run_organize(&temp_dir);
        fs::remove_file(temp_dir.path().join("Images").join("photo.jpg"))
            .expect("Failed to remove file");

        let report = UndoEngine::undo(temp_dir.path(), &mut record).expect("report");

        assert_eq!(report.restored_files, 0);
        assert_eq!(report.missed_files, vec!["photo.jpg".to_string()]);
        assert!(!report.is_complete_success());
        assert!(record.is_empty());
    }

    #[test]
    fn test_undo_leaves_empty_category_dirs_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("photo.jpg"), "x").expect("Failed to write file");

        let mut record = run_organize(&temp_dir);
        UndoEngine::undo(temp_dir.path(), &mut record).expect("report");

        // Pruning the now-empty Images dir is the next pass's job.
        assert!(temp_dir.path().join("Images").exists());
    }

    #[test]
    fn test_undo_restores_multiple_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("photo.jpg"), "img").expect("Failed to write file");
        fs::write(temp_dir.path().join("song.mp3"), "snd").expect("Failed to write file");

        let mut record = run_organize(&temp_dir);
        let report = UndoEngine::undo(temp_dir.path(), &mut record).expect("report");

        assert_eq!(report.restored_files, 2);
        assert!(temp_dir.path().join("photo.jpg").exists());
        assert!(temp_dir.path().join("song.mp3").exists());
    }
}
