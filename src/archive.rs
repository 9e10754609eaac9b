/// Oversized-file interception.
///
/// Files whose size exceeds the configured limit are not classified or
/// moved; they are compressed into a single-entry zip archive next to the
/// original, and the original is deleted. Archival is not undoable.
use crate::organizer::{OrganizeError, OrganizeResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const BYTES_PER_MIB: u64 = 1024 * 1024;

/// True when a file of `size` bytes exceeds the `limit_mib` threshold.
pub fn exceeds_limit(size: u64, limit_mib: u64) -> bool {
    size > limit_mib * BYTES_PER_MIB
}

/// Compresses `file_path` into `<name>.zip` in the same directory and
/// deletes the original.
///
/// The original file is only removed after the archive writer has finished
/// successfully; on any failure the partial archive is cleaned up
/// best-effort, the original is left untouched and the error propagates.
/// Returns the path of the created archive.
pub fn archive_in_place(file_path: &Path) -> OrganizeResult<PathBuf> {
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| OrganizeError::ArchiveFailed {
            path: file_path.to_path_buf(),
            reason: "file has no name component".to_string(),
        })?;

    let mut zip_name = file_path.as_os_str().to_owned();
    zip_name.push(".zip");
    let zip_path = PathBuf::from(zip_name);

    if let Err(e) = write_archive(file_path, &zip_path, &file_name) {
        let _ = fs::remove_file(&zip_path);
        return Err(OrganizeError::ArchiveFailed {
            path: file_path.to_path_buf(),
            reason: e.to_string(),
        });
    }

    fs::remove_file(file_path).map_err(|e| OrganizeError::ArchiveFailed {
        path: file_path.to_path_buf(),
        reason: format!("archive written but original not removed: {}", e),
    })?;

    Ok(zip_path)
}

fn write_archive(file_path: &Path, zip_path: &Path, entry_name: &str) -> io::Result<()> {
    let out = fs::File::create(zip_path)?;
    let mut writer = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file(entry_name, options)?;
    let mut source = fs::File::open(file_path)?;
    io::copy(&mut source, &mut writer)?;
    writer.finish()?;

    Ok(())
}
