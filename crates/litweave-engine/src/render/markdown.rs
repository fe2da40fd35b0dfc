use crate::transform::{EventHandler, LineKind};

/// Renders the event stream as Markdown.
///
/// Prose and headers pass straight through; code blocks are fenced with the
/// language tag. Blank lines are kept verbatim, so paragraph breaks in the
/// source survive.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    fence_open: String,
    out: String,
}

impl MarkdownRenderer {
    pub const FENCE: &'static str = "```";

    pub fn new(fence_lang: &str) -> Self {
        Self {
            fence_open: format!("{}{fence_lang}", Self::FENCE),
            out: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn push_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }
}

impl EventHandler for MarkdownRenderer {
    fn open_code(&mut self) {
        self.out.push_str(&self.fence_open);
        self.out.push('\n');
    }

    fn close_code(&mut self) {
        self.push_line(Self::FENCE);
    }

    fn line(&mut self, _kind: LineKind, content: &str) {
        self.push_line(content);
    }
}
