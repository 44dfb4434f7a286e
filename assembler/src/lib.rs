//! Source-code excerpt document assembler
//!
//! Builds the code listing required for software copyright registration:
//! a `.docx` whose pages carry the first and last stretch of a project's
//! source, with the product name and version in the header and the rights
//! holder in the footer.
//!
//! # Pipeline
//!
//! 1. [`collect`] walks the project for files with the requested extensions
//!    and decodes them (UTF-8, then GBK).
//! 2. [`line_index::LineIndex`] concatenates their lines and remembers where
//!    each file starts and ends.
//! 3. [`layout`] selects the head/tail excerpt and cuts it into page
//!    windows, falling back to a denser fixed-chunk layout when the page
//!    estimate overflows the target.
//! 4. [`docx`] writes the package atomically.
//!
//! # Usage
//!
//! ```no_run
//! use assembler::{AssemblerConfig, DocumentAssembler, DocumentMeta, GenerateRequest};
//!
//! # fn main() -> Result<(), assembler::AssembleError> {
//! let meta = DocumentMeta::new("Demo", "V1.0", "Acme Ltd")?;
//! let request = GenerateRequest::new(meta, "./my-project", "rs,toml")?;
//! let report = DocumentAssembler::new(AssemblerConfig::from_env())?.generate(&request)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod collect;
pub mod config;
pub mod docx;
pub mod error;
pub mod layout;
pub mod line_index;

pub use assembler::{DocumentAssembler, GenerateRequest, GenerationReport, SkippedFile};
pub use collect::{detect_extensions, parse_extensions, ExtensionSet};
pub use config::{AssemblerConfig, ConfigOverrides, DocumentMeta, PageBudget};
pub use error::{AssembleError, AssembleResult};
pub use layout::{LayoutKind, PagePlan, PageWindow};
pub use line_index::{Excerpt, FileBoundary, LineIndex, SourceFile};
