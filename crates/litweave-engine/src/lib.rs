//! # litweave-engine
//!
//! Turns annotated source files into Markdown, notebooks and slide decks.
//!
//! ```text
//! raw lines → LineClassifier → DocumentTransformer → events → Renderer → document
//! ```
//!
//! ```
//! use litweave_engine::render::{Format, Language, render};
//!
//! let md = render(Format::Markdown, &["// header", "code();"], &Language::default()).unwrap();
//! assert_eq!(md, "```java\ncode();\n```\n");
//! ```

pub mod generate;
pub mod io;
pub mod models;
pub mod render;
pub mod transform;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use generate::{GenerateError, Generator, Report, Target, index_entries};
pub use io::IoError;
pub use models::SourceFile;
pub use render::{Format, Language, RenderError, UnknownFormat, render};
pub use transform::{
    BlockKind, Event, EventHandler, EventLog, LineClass, LineClassifier, LineKind, classify,
    transform, transform_with,
};
