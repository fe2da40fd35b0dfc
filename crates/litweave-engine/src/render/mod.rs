//! # Format Renderers
//!
//! Each renderer is an [`EventHandler`](crate::transform::EventHandler) that
//! folds the transformer's event stream into one output document. They
//! share the control flow of the transformer and differ only in what they
//! emit:
//!
//! - [`MarkdownRenderer`]: flat text, code fenced with the language tag
//! - [`NotebookRenderer`]: nbformat cells, one per text or code block
//! - [`SlideshowRenderer`]: notebook cells with section headers starting slides

pub mod markdown;
pub mod notebook;
pub mod slideshow;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transform::{LineClassifier, transform_with};

pub use markdown::MarkdownRenderer;
pub use notebook::{Cell, CellMetadata, Notebook, NotebookRenderer};
pub use slideshow::SlideshowRenderer;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize notebook: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Document ended without producing output")]
    Unfinished,
}

/// An output format the tool can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Markdown,
    Notebook,
    Slideshow,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output format '{0}'")]
pub struct UnknownFormat(pub String);

impl Format {
    pub const ALL: [Format; 3] = [Format::Markdown, Format::Notebook, Format::Slideshow];

    /// Name used in configuration files and as the default output folder.
    pub fn name(self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Notebook => "notebook",
            Format::Slideshow => "slideshow",
        }
    }

    /// Extension of generated files, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Markdown => ".md",
            Format::Notebook | Format::Slideshow => ".ipynb",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| UnknownFormat(s.to_owned()))
    }
}

/// Language of the annotated sources.
///
/// Drives the comment token the classifier looks for, the Markdown fence
/// tag and the notebook kernel metadata. Defaults to Java.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    /// Human-readable name, e.g. `Java`.
    pub name: String,
    /// Tag written after Markdown code fences.
    pub fence: String,
    /// Jupyter kernel and lexer name.
    pub kernel: String,
    /// Line-comment token; prose lines start with this plus a space.
    pub comment: String,
    pub file_extension: String,
    pub mimetype: String,
    pub version: String,
}

impl Language {
    pub fn classifier(&self) -> LineClassifier {
        LineClassifier::new(&self.comment)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self {
            name: "Java".to_owned(),
            fence: "java".to_owned(),
            kernel: "java".to_owned(),
            comment: LineClassifier::DEFAULT_COMMENT.to_owned(),
            file_extension: ".java".to_owned(),
            mimetype: "text/x-java-source".to_owned(),
            version: "15".to_owned(),
        }
    }
}

/// Render one source document, given as newline-stripped lines, in `format`.
pub fn render<S: AsRef<str>>(
    format: Format,
    lines: &[S],
    language: &Language,
) -> Result<String, RenderError> {
    let classifier = language.classifier();
    match format {
        Format::Markdown => {
            let mut renderer = MarkdownRenderer::new(&language.fence);
            transform_with(&classifier, lines, &mut renderer);
            Ok(renderer.finish())
        }
        Format::Notebook => {
            let mut renderer = NotebookRenderer::new(language);
            transform_with(&classifier, lines, &mut renderer);
            renderer.finish()
        }
        Format::Slideshow => {
            let mut renderer = SlideshowRenderer::new(language);
            transform_with(&classifier, lines, &mut renderer);
            renderer.finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("markdown", Format::Markdown, ".md")]
    #[case("notebook", Format::Notebook, ".ipynb")]
    #[case("slideshow", Format::Slideshow, ".ipynb")]
    fn format_names_and_extensions(
        #[case] name: &str,
        #[case] format: Format,
        #[case] extension: &str,
    ) {
        assert_eq!(name.parse::<Format>(), Ok(format));
        assert_eq!(format.name(), name);
        assert_eq!(format.to_string(), name);
        assert_eq!(format.extension(), extension);
    }

    #[test]
    fn unknown_format_name() {
        assert_eq!(
            "pdf".parse::<Format>(),
            Err(UnknownFormat("pdf".to_owned()))
        );
        assert!("Markdown".parse::<Format>().is_err());
    }

    #[test]
    fn render_markdown_round_trip() {
        let out = render(Format::Markdown, &["code();"], &Language::default()).unwrap();
        assert_eq!(out, "```java\ncode();\n```\n");
    }

    #[test]
    fn render_uses_language_comment_token() {
        let python = Language {
            name: "Python".to_owned(),
            fence: "python".to_owned(),
            kernel: "python3".to_owned(),
            comment: "#".to_owned(),
            file_extension: ".py".to_owned(),
            mimetype: "text/x-python".to_owned(),
            version: "3.12".to_owned(),
        };
        let out = render(
            Format::Markdown,
            &["import os", "# # Files", "# List them:", "os.listdir()"],
            &python,
        )
        .unwrap();
        assert_eq!(
            out,
            "```python\nimport os\n```\n# Files\nList them:\n```python\nos.listdir()\n```\n"
        );
    }

    #[test]
    fn render_notebook_formats_produce_json() {
        for format in [Format::Notebook, Format::Slideshow] {
            let out = render(format, &["x();"], &Language::default()).unwrap();
            let value: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(value["cells"].as_array().map(Vec::len), Some(1));
        }
    }
}
