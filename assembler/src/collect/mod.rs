//! Source collection. Discovers matching files and decodes them to lines.
//!
//! Discovery is delegated to [`FileWalker`]; decoding tries UTF-8 first and
//! falls back to GBK. Files that decode under neither are reported as
//! skipped, never as errors.

pub mod extensions;
pub mod file_walker;
pub mod reader;

pub use extensions::{detect_extensions, parse_extensions, ExtensionSet};
pub use file_walker::FileWalker;
pub use reader::{read_source, DecodedText, ReadFailure, SourceEncoding};
