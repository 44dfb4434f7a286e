//! Word (.docx) output.
//!
//! [`builder`] maps pages onto a `docx_rs::Docx` (body, header with a live
//! page number, footer, page setup); [`DocxWriter`] packages it atomically.

pub mod builder;
pub mod writer;

pub use writer::DocxWriter;

use crate::config::DocumentMeta;

/// Everything that goes into one generated document.
#[derive(Debug, Clone)]
pub struct DocxDocument<'a> {
    pub meta: &'a DocumentMeta,
    /// Page count printed in the header ("共 N 页")
    pub target_pages: usize,
    /// One entry per page; each page is a block of source lines.
    pub pages: Vec<&'a [String]>,
}
