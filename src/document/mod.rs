//! HTML document parsing.
//!
//! Input is parsed with html5ever (through `scraper`), which recovers from
//! malformed markup the way browsers do, and then mirrored into an
//! `sxd-document` DOM so it can be navigated by the XPath evaluator.

pub mod parser;

pub use parser::HtmlDocument;
