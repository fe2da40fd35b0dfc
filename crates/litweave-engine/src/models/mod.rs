pub mod source_file;

pub use source_file::{SourceFile, remove_extension, short_name};
