use super::{
    Language, RenderError,
    notebook::{CellMetadata, Notebook, NotebookBuilder, NotebookMetadata},
};
use crate::transform::{BlockKind, EventHandler, LineKind};

/// Renders the event stream as a slide-deck notebook.
///
/// Identical to the notebook renderer except that the markdown cell opened
/// by a section header starts a new slide. The slide tag applies to that
/// one cell only.
#[derive(Debug, Clone)]
pub struct SlideshowRenderer {
    builder: NotebookBuilder,
    text_metadata: CellMetadata,
}

impl SlideshowRenderer {
    pub const CELL_TOOLBAR: &'static str = "Slideshow";

    pub fn new(language: &Language) -> Self {
        let mut metadata = NotebookMetadata::for_language(language);
        metadata.celltoolbar = Some(Self::CELL_TOOLBAR.to_owned());
        Self {
            builder: NotebookBuilder::new(metadata),
            text_metadata: CellMetadata::default(),
        }
    }

    pub fn notebook(&self) -> Option<&Notebook> {
        self.builder.notebook()
    }

    pub fn finish(self) -> Result<String, RenderError> {
        self.builder.finish()
    }
}

impl EventHandler for SlideshowRenderer {
    fn end_document(&mut self) {
        self.builder.end_document();
    }

    fn open(&mut self, kind: BlockKind) {
        self.builder.begin();
        if kind == BlockKind::Section {
            self.open_section();
        }
    }

    fn open_section(&mut self) {
        self.text_metadata = CellMetadata::slide();
    }

    fn close_text(&mut self) {
        let metadata = std::mem::take(&mut self.text_metadata);
        self.builder.flush_markdown(metadata);
    }

    fn close_code(&mut self) {
        self.builder.flush_code();
    }

    fn line(&mut self, kind: LineKind, content: &str) {
        self.builder.push_line(kind, content);
    }
}
