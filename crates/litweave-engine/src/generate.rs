//! Generation pipeline: every source file rendered in every selected format.
//!
//! Output folders are created up front; the per-file work then runs on the
//! rayon pool. Each task owns its renderers and writes its own output
//! paths, so nothing is shared between tasks.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::io::{self, IoError};
use crate::models::{SourceFile, short_name};
use crate::render::{self, Format, Language, RenderError};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Failed to render {path} as {format}: {source}")]
    Render {
        path: PathBuf,
        format: Format,
        source: RenderError,
    },
}

/// One selected output format and the folder its documents go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub format: Format,
    pub folder: PathBuf,
}

impl Target {
    pub fn new(format: Format, folder: impl Into<PathBuf>) -> Self {
        Self {
            format,
            folder: folder.into(),
        }
    }
}

/// Paths produced (or, in a dry run, that would be produced) per source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub outputs: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Generator {
    targets: Vec<Target>,
    language: Language,
    dry_run: bool,
}

impl Generator {
    pub fn new(targets: Vec<Target>, language: Language) -> Self {
        Self {
            targets,
            language,
            dry_run: false,
        }
    }

    /// Render everything but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Create every target folder.
    pub fn prepare(&self) -> Result<(), GenerateError> {
        if self.dry_run {
            return Ok(());
        }
        for target in &self.targets {
            log::debug!(
                "Creating {} folder {}",
                target.format,
                target.folder.display()
            );
            io::create_dir(&target.folder)?;
        }
        Ok(())
    }

    /// Render one source in every target format and write the results.
    pub fn generate_file(&self, source: &SourceFile) -> Result<Vec<PathBuf>, GenerateError> {
        let lines = io::read_lines(source.path())?;
        let mut outputs = Vec::with_capacity(self.targets.len());

        for target in &self.targets {
            let content =
                render::render(target.format, &lines, &self.language).map_err(|source_err| {
                    GenerateError::Render {
                        path: source.path().to_path_buf(),
                        format: target.format,
                        source: source_err,
                    }
                })?;

            let output = source.output_path(&target.folder, target.format);
            if self.dry_run {
                log::info!("Would write {}", output.display());
            } else {
                log::debug!("Writing {}", output.display());
                io::write_file(&output, &content)?;
            }
            outputs.push(output);
        }

        Ok(outputs)
    }

    /// Prepare folders, then generate all sources in parallel.
    ///
    /// Outputs are reported in source order regardless of scheduling. The
    /// first failure aborts the run.
    pub fn generate(&self, sources: &[SourceFile]) -> Result<Report, GenerateError> {
        self.prepare()?;

        let per_file: Vec<Vec<PathBuf>> = sources
            .par_iter()
            .map(|source| self.generate_file(source))
            .collect::<Result<_, _>>()?;

        let outputs: Vec<PathBuf> = per_file.into_iter().flatten().collect();
        log::info!(
            "Generated {} document(s) from {} source(s)",
            outputs.len(),
            sources.len()
        );
        Ok(Report { outputs })
    }
}

/// Numbered Markdown list linking every source's document in `format`.
///
/// `0. [intro.md](markdown/01-intro.md)`: the label drops everything up to
/// the first `-` of the output file name.
pub fn index_entries(sources: &[SourceFile], folder: &Path, format: Format) -> Vec<String> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let filename = source.output_name(format);
            let link = source.index_link(folder, format);
            format!("{index}. [{}]({link})", short_name(&filename))
        })
        .collect()
}
