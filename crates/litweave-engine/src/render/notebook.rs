//! Jupyter notebook (nbformat 4.2) model and the plain notebook renderer.
//!
//! Each `Text` block becomes a markdown cell and each `Code` block an
//! executable cell. Blank lines never land in a cell: the transformer closes
//! the open block before forwarding them.

use serde::{Deserialize, Serialize};

use super::{Language, RenderError};
use crate::transform::{BlockKind, EventHandler, LineKind};

pub const NBFORMAT: u32 = 4;
pub const NBFORMAT_MINOR: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "snake_case")]
pub enum Cell {
    Markdown {
        metadata: CellMetadata,
        source: Vec<String>,
    },
    Code {
        execution_count: Option<u32>,
        metadata: CellMetadata,
        outputs: Vec<serde_json::Value>,
        source: Vec<String>,
    },
}

impl Cell {
    pub fn source(&self) -> &[String] {
        match self {
            Cell::Markdown { source, .. } | Cell::Code { source, .. } => source,
        }
    }

    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Cell::Markdown { metadata, .. } | Cell::Code { metadata, .. } => metadata,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Cell::Code { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slideshow: Option<SlideMetadata>,
}

impl CellMetadata {
    /// Metadata marking a cell as the start of a new slide.
    pub fn slide() -> Self {
        Self {
            slideshow: Some(SlideMetadata {
                slide_type: "slide".to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideMetadata {
    pub slide_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celltoolbar: Option<String>,
    pub kernelspec: KernelSpec,
    pub language_info: LanguageInfo,
}

impl NotebookMetadata {
    pub fn for_language(language: &Language) -> Self {
        Self {
            celltoolbar: None,
            kernelspec: KernelSpec {
                display_name: language.name.clone(),
                language: language.kernel.clone(),
                name: language.kernel.clone(),
            },
            language_info: LanguageInfo {
                codemirror_mode: language.kernel.clone(),
                file_extension: language.file_extension.clone(),
                mimetype: language.mimetype.clone(),
                name: language.name.clone(),
                pygments_lexer: language.kernel.clone(),
                version: language.version.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub display_name: String,
    pub language: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub codemirror_mode: String,
    pub file_extension: String,
    pub mimetype: String,
    pub name: String,
    pub pygments_lexer: String,
    pub version: String,
}

impl Notebook {
    pub fn new(cells: Vec<Cell>, metadata: NotebookMetadata) -> Self {
        Self {
            cells,
            metadata,
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Assembles a notebook from the event stream, one cell per closed block.
///
/// Shared by the notebook and slideshow renderers, which differ only in
/// how markdown cells are tagged.
#[derive(Debug, Clone)]
pub(crate) struct NotebookBuilder {
    cells: Vec<Cell>,
    source: Option<Vec<String>>,
    metadata: NotebookMetadata,
    document: Option<Notebook>,
}

impl NotebookBuilder {
    pub(crate) fn new(metadata: NotebookMetadata) -> Self {
        Self {
            cells: Vec::new(),
            source: None,
            metadata,
            document: None,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.source = Some(Vec::new());
    }

    /// Lines arriving with no open buffer are separators and are dropped.
    pub(crate) fn push_line(&mut self, kind: LineKind, content: &str) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        source.push(match kind {
            LineKind::Blank => "\n".to_owned(),
            LineKind::Code | LineKind::Text | LineKind::Section => format!("{content}\n"),
        });
    }

    pub(crate) fn flush_markdown(&mut self, metadata: CellMetadata) {
        let source = self.take_source();
        self.cells.push(Cell::Markdown { metadata, source });
    }

    pub(crate) fn flush_code(&mut self) {
        let source = self.take_source();
        self.cells.push(Cell::Code {
            execution_count: None,
            metadata: CellMetadata::default(),
            outputs: Vec::new(),
            source,
        });
    }

    pub(crate) fn end_document(&mut self) {
        let cells = std::mem::take(&mut self.cells);
        self.document = Some(Notebook::new(cells, self.metadata.clone()));
    }

    pub(crate) fn notebook(&self) -> Option<&Notebook> {
        self.document.as_ref()
    }

    pub(crate) fn finish(self) -> Result<String, RenderError> {
        self.document.ok_or(RenderError::Unfinished)?.to_json()
    }

    fn take_source(&mut self) -> Vec<String> {
        debug_assert!(self.source.is_some(), "cell flushed without being opened");
        self.source.take().unwrap_or_default()
    }
}

/// Renders the event stream as an interactive notebook.
#[derive(Debug, Clone)]
pub struct NotebookRenderer {
    builder: NotebookBuilder,
}

impl NotebookRenderer {
    pub fn new(language: &Language) -> Self {
        Self {
            builder: NotebookBuilder::new(NotebookMetadata::for_language(language)),
        }
    }

    /// The assembled notebook, available once the document has ended.
    pub fn notebook(&self) -> Option<&Notebook> {
        self.builder.notebook()
    }

    pub fn finish(self) -> Result<String, RenderError> {
        self.builder.finish()
    }
}

impl EventHandler for NotebookRenderer {
    fn end_document(&mut self) {
        self.builder.end_document();
    }

    fn open(&mut self, _kind: BlockKind) {
        self.builder.begin();
    }

    fn close_text(&mut self) {
        self.builder.flush_markdown(CellMetadata::default());
    }

    fn close_code(&mut self) {
        self.builder.flush_code();
    }

    fn line(&mut self, kind: LineKind, content: &str) {
        self.builder.push_line(kind, content);
    }
}
