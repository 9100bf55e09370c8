//! File system utilities for Assetforge.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use assetforge_common_core::{Error, ErrorCode, Result};

pub mod globs;

pub use globs::{expand_globs, expand_globs_ordered, glob_base, matches_any, GlobSet};

/// Read a file to string.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileSystem {
            code: ErrorCode::FILE_NOT_FOUND,
            message: format!("file not found: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        },
        _ => Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("failed to read file: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        },
    })
}

/// Read a file to bytes.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileSystem {
            code: ErrorCode::FILE_NOT_FOUND,
            message: format!("file not found: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        },
        _ => Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("failed to read file: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        },
    })
}

/// Write to a file atomically (write to temp, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or(Path::new("."));

    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        let temp_name = format!(".{}.tmp", name.to_string_lossy());
        temp_path.set_file_name(temp_name);
    } else {
        temp_path.push(".tmp");
    }

    {
        let mut file = File::create(&temp_path).map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_WRITE_ERROR,
            message: format!("failed to create temporary file: {}", temp_path.display()),
            path: Some(temp_path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        })?;

        file.write_all(contents).map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_WRITE_ERROR,
            message: format!("failed to write to temporary file: {}", temp_path.display()),
            path: Some(temp_path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        })?;

        file.sync_all().map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_WRITE_ERROR,
            message: format!("failed to sync temporary file: {}", temp_path.display()),
            path: Some(temp_path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::FileSystem {
            code: ErrorCode::FILE_WRITE_ERROR,
            message: format!("failed to rename temporary file to target: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        }
    })?;

    Ok(())
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Ensure a directory exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_WRITE_ERROR,
            message: format!("failed to create directory: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        })?;
    }
    Ok(())
}

/// Recursively delete a directory tree. A missing directory is not an error.
pub fn clean_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| Error::FileSystem {
        code: ErrorCode::FILE_WRITE_ERROR,
        message: format!("failed to remove directory: {}", path.display()),
        path: Some(path.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    })?;
    Ok(true)
}

/// Copy a file, creating parent directories as needed.
pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }

    fs::copy(src, dst).map_err(|e| Error::FileSystem {
        code: ErrorCode::FILE_WRITE_ERROR,
        message: format!("failed to copy {} to {}", src.display(), dst.display()),
        path: Some(dst.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    })
}

/// Copy a whole directory tree into `dst`, preserving relative layout.
pub fn copy_tree(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<usize> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    let mut copied = 0;

    for entry in walkdir::WalkDir::new(src) {
        let entry = entry.map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("failed to walk directory: {}", src.display()),
            path: Some(src.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir entry is under its root");
        copy_file(entry.path(), dst.join(rel))?;
        copied += 1;
    }

    Ok(copied)
}

/// List all files under a directory tree, sorted.
pub fn walk_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("failed to walk directory: {}", root.display()),
            path: Some(root.to_string_lossy().to_string()),
            source: Some(Box::new(e)),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Path of `path` relative to `base`, or the file name when `path` is
/// outside `base`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| {
            path.file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.to_path_buf())
        })
}

/// Check if a path exists and is a file.
pub fn is_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Check if a path exists and is a directory.
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// Get the file extension as a lowercase string.
pub fn extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}
