//! # Transformer Events
//!
//! The transformer never builds a tree. It replays the classified lines as
//! a flat stream of events and lets a handler decide what to build:
//!
//! ```text
//! StartDocument
//! Open(Section)        ← "// # Intro"
//!   Open(Text)
//!     Line(Section, "# Intro")
//!     Line(Text, "Some prose")
//!   Close(Text)
//!   Open(Code)
//!     Line(Code, "var x = 1;")
//!   Close(Code)
//! Close(Section)
//! EndDocument
//! ```
//!
//! Only `Text`, `Code` and `Section` ever open or close. Blank lines are
//! separators: they close whatever leaf block is open and reach handlers
//! solely through [`EventHandler::line`].

use serde::Serialize;

use super::classify::LineKind;

/// A structural block the transformer opens and closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    Text,
    Code,
    Section,
}

impl From<BlockKind> for LineKind {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => LineKind::Text,
            BlockKind::Code => LineKind::Code,
            BlockKind::Section => LineKind::Section,
        }
    }
}

/// Receives the event stream produced by [`transform`](super::transform).
///
/// `open` and `close` dispatch to the per-kind hooks by default, so a
/// handler can either override the generic pair or just the hooks it cares
/// about. Every hook is a no-op unless overridden; only [`line`](Self::line)
/// is required.
pub trait EventHandler {
    fn start_document(&mut self) {}

    fn end_document(&mut self) {}

    fn open(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Text => self.open_text(),
            BlockKind::Code => self.open_code(),
            BlockKind::Section => self.open_section(),
        }
    }

    fn close(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Text => self.close_text(),
            BlockKind::Code => self.close_code(),
            BlockKind::Section => self.close_section(),
        }
    }

    fn open_text(&mut self) {}
    fn close_text(&mut self) {}
    fn open_code(&mut self) {}
    fn close_code(&mut self) {}
    fn open_section(&mut self) {}
    fn close_section(&mut self) {}

    /// Called once per emitted line, after any open and before any close
    /// the same line triggers.
    fn line(&mut self, kind: LineKind, content: &str);
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    StartDocument,
    EndDocument,
    Open(BlockKind),
    Close(BlockKind),
    Line(LineKind, String),
}

/// Handler that records every event it receives, in order.
///
/// Handy for debugging a source file's structure and for asserting on the
/// exact stream in tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Content of every `Line` event, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Line(_, content) => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of `Open` events of the given kind.
    pub fn count_opened(&self, kind: BlockKind) -> usize {
        self.events
            .iter()
            .filter(|event| **event == Event::Open(kind))
            .count()
    }
}

impl EventHandler for EventLog {
    fn start_document(&mut self) {
        self.events.push(Event::StartDocument);
    }

    fn end_document(&mut self) {
        self.events.push(Event::EndDocument);
    }

    fn open(&mut self, kind: BlockKind) {
        self.events.push(Event::Open(kind));
    }

    fn close(&mut self, kind: BlockKind) {
        self.events.push(Event::Close(kind));
    }

    fn line(&mut self, kind: LineKind, content: &str) {
        self.events.push(Event::Line(kind, content.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Hooks {
        calls: Vec<&'static str>,
    }

    impl EventHandler for Hooks {
        fn open_text(&mut self) {
            self.calls.push("open_text");
        }
        fn close_code(&mut self) {
            self.calls.push("close_code");
        }
        fn open_section(&mut self) {
            self.calls.push("open_section");
        }
        fn line(&mut self, _kind: LineKind, _content: &str) {}
    }

    #[test]
    fn default_open_close_dispatch_to_hooks() {
        let mut hooks = Hooks::default();
        hooks.open(BlockKind::Section);
        hooks.open(BlockKind::Text);
        hooks.open(BlockKind::Code);
        hooks.close(BlockKind::Text);
        hooks.close(BlockKind::Code);
        assert_eq!(hooks.calls, vec!["open_section", "open_text", "close_code"]);
    }

    #[test]
    fn block_kind_maps_to_line_kind() {
        assert_eq!(LineKind::from(BlockKind::Text), LineKind::Text);
        assert_eq!(LineKind::from(BlockKind::Code), LineKind::Code);
        assert_eq!(LineKind::from(BlockKind::Section), LineKind::Section);
    }

    #[test]
    fn event_log_helpers() {
        let mut log = EventLog::new();
        log.open(BlockKind::Code);
        log.line(LineKind::Code, "a();");
        log.close(BlockKind::Code);
        log.open(BlockKind::Code);
        log.line(LineKind::Code, "b();");

        assert_eq!(log.lines(), vec!["a();", "b();"]);
        assert_eq!(log.count_opened(BlockKind::Code), 2);
        assert_eq!(log.count_opened(BlockKind::Text), 0);
    }
}
