use std::path::{Path, PathBuf};

use relative_path::RelativePathBuf;

use crate::render::Format;

/// An annotated source file and the names derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    stem: String,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let stem = path
            .file_name()
            .map(|name| remove_extension(&name.to_string_lossy()).to_owned())
            .unwrap_or_default();
        Self { path, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its last extension (`01-intro.jsh` → `01-intro`).
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name of the generated document for `format`.
    pub fn output_name(&self, format: Format) -> String {
        format!("{}{}", self.stem, format.extension())
    }

    pub fn output_path(&self, folder: &Path, format: Format) -> PathBuf {
        folder.join(self.output_name(format))
    }

    /// Relative link from the index to the generated document, always with
    /// `/` separators.
    pub fn index_link(&self, folder: &Path, format: Format) -> RelativePathBuf {
        let folder_name = folder
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| folder.to_string_lossy())
            .into_owned();
        RelativePathBuf::from(folder_name).join(self.output_name(format).as_str())
    }
}

impl From<PathBuf> for SourceFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Strip the last `.ext`, keeping the name whole when there is no dot.
pub fn remove_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _ext)| stem)
}

/// Display name for index entries: everything after the first `-`, so
/// ordering prefixes like `01-` disappear.
pub fn short_name(filename: &str) -> &str {
    filename
        .split_once('-')
        .map_or(filename, |(_prefix, rest)| rest)
}
