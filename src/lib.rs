//! cnki-bibtex: convert CNKI-style Chinese citations into BibTeX.
//!
//! This library provides functionality to:
//! - Parse a free-text reference (`作者. 标题[J]. 期刊, 年, 卷(期): 页码.`)
//!   into a structured record
//! - Render the record as a BibTeX `@article` entry or as JSON
//! - Convert whole reference lists, one reference per line

pub mod bibtex;
pub mod parser;
pub mod record;
pub mod refs;

pub use bibtex::{convert, convert_batch, render_bibtex, render_json, render_json_array};
pub use parser::parse_reference;
pub use record::BibliographicRecord;
pub use refs::{load_references, split_references};
