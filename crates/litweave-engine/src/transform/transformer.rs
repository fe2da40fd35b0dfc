use super::{
    classify::{LineClassifier, LineKind},
    events::{BlockKind, EventHandler},
};

/// The leaf block currently open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf {
    None,
    Text,
    Code,
}

impl Leaf {
    fn block(self) -> Option<BlockKind> {
        match self {
            Leaf::None => None,
            Leaf::Text => Some(BlockKind::Text),
            Leaf::Code => Some(BlockKind::Code),
        }
    }
}

/// Single forward pass turning classified lines into handler events.
///
/// Block boundaries come only from the kind of the current line compared to
/// the open leaf; there is no lookahead. A section stays open until the
/// next section line or the end of the document.
///
/// Creating the transformer starts the document on the handler, and
/// dropping it ends the document: any open blocks are closed first, so the
/// event stream stays balanced even when [`finish`](Self::finish) is never
/// called.
pub struct DocumentTransformer<'c, 'h, H: EventHandler + ?Sized> {
    classifier: &'c LineClassifier,
    handler: &'h mut H,
    leaf: Leaf,
    in_section: bool,
    /// True while every line so far has been prose. Never re-armed.
    skip_leading: bool,
}

impl<'c, 'h, H: EventHandler + ?Sized> DocumentTransformer<'c, 'h, H> {
    /// Starts a document on `handler`.
    pub fn new(classifier: &'c LineClassifier, handler: &'h mut H) -> Self {
        handler.start_document();
        Self {
            classifier,
            handler,
            leaf: Leaf::None,
            in_section: false,
            skip_leading: true,
        }
    }

    pub fn push(&mut self, line: &str) {
        let class = self.classifier.classify(line);

        self.leaf = match class.kind {
            LineKind::Blank => {
                self.close_leaf();
                Leaf::None
            }
            LineKind::Section => {
                self.close_leaf();
                if self.in_section {
                    self.handler.close(BlockKind::Section);
                }
                self.handler.open(BlockKind::Section);
                self.in_section = true;
                self.handler.open(BlockKind::Text);
                Leaf::Text
            }
            LineKind::Text => {
                if self.leaf == Leaf::Code {
                    self.handler.close(BlockKind::Code);
                }
                if self.leaf != Leaf::Text {
                    self.handler.open(BlockKind::Text);
                }
                Leaf::Text
            }
            LineKind::Code => {
                if self.leaf == Leaf::Text {
                    self.handler.close(BlockKind::Text);
                }
                if self.leaf != Leaf::Code {
                    self.handler.open(BlockKind::Code);
                }
                Leaf::Code
            }
        };

        // The leading run of prose is a file header: structure only, no content.
        self.skip_leading = self.skip_leading && class.kind == LineKind::Text;
        if !self.skip_leading {
            self.handler.line(class.kind, class.content);
        }
    }

    /// Closes whatever is still open and ends the document.
    pub fn finish(self) {
        drop(self);
    }

    fn close_leaf(&mut self) {
        if let Some(kind) = self.leaf.block() {
            self.handler.close(kind);
        }
        self.leaf = Leaf::None;
    }
}

impl<H: EventHandler + ?Sized> Drop for DocumentTransformer<'_, '_, H> {
    fn drop(&mut self) {
        self.close_leaf();
        if self.in_section {
            self.handler.close(BlockKind::Section);
            self.in_section = false;
        }
        self.handler.end_document();
    }
}

/// Transform `lines` with the default `//` classifier.
pub fn transform<I, S, H>(lines: I, handler: &mut H)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    H: EventHandler + ?Sized,
{
    transform_with(&LineClassifier::default(), lines, handler);
}

/// Transform `lines` with a specific classifier.
pub fn transform_with<I, S, H>(classifier: &LineClassifier, lines: I, handler: &mut H)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    H: EventHandler + ?Sized,
{
    let mut transformer = DocumentTransformer::new(classifier, handler);
    for line in lines {
        transformer.push(line.as_ref());
    }
    transformer.finish();
}
