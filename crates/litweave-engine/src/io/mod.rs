use crate::models::SourceFile;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid source directory: {0}")]
    InvalidSourceDir(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a source file as newline-stripped lines (`\n` or `\r\n`), in order.
pub fn read_lines(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Write a generated document, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir(parent)?;
    }

    fs::write(path, content).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn create_dir(path: &Path) -> Result<(), IoError> {
    fs::create_dir_all(path).map_err(|source| IoError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// List the source files directly inside `dir` whose name ends with
/// `extension`, sorted by path. Subdirectories are not searched.
pub fn gather_sources(dir: &Path, extension: &str) -> Result<Vec<SourceFile>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::InvalidSourceDir(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| IoError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IoError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_file() && path.to_string_lossy().ends_with(extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files.into_iter().map(SourceFile::new).collect())
}
