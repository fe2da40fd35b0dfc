//! # Document Transformation
//!
//! Two phases, the same split as any line-oriented block parser:
//!
//! 1. **Line Classification** (`classify`): each raw line becomes a
//!    [`LineClass`]: `Section`, `Text`, `Blank` or `Code` plus the content a
//!    renderer should see. Purely local, no neighbour context.
//!
//! 2. **Transformation** (`transformer`): a [`DocumentTransformer`] walks the
//!    classified lines once and emits open/line/close events to an
//!    [`EventHandler`].
//!
//! ## Key Invariants
//!
//! - Every `open(kind)` is matched by exactly one later `close(kind)`
//! - Sections never nest; a section line closes the previous section
//! - A section line always opens a `Text` block carrying the header itself
//! - The leading run of prose lines opens and closes a `Text` block but
//!   none of its lines reach [`EventHandler::line`]

pub mod classify;
pub mod events;
pub mod transformer;

pub use classify::{LineClass, LineClassifier, LineKind, classify};
pub use events::{BlockKind, Event, EventHandler, EventLog};
pub use transformer::{DocumentTransformer, transform, transform_with};
