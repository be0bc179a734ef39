//! XPath query evaluation over parsed HTML documents.
//!
//! [`XPathEvaluator`] compiles and runs XPath 1.0 expressions (plus a few
//! XPath 2.0 string functions), caching compiled expressions for the
//! lifetime of one evaluator. [`QueryContext`] pairs a document node with an
//! evaluator and is the handle the decoder walks the document with.

pub mod context;
pub mod evaluator;
pub mod functions;

pub use context::QueryContext;
pub use evaluator::{XPathEvaluator, DEFAULT_CACHE_CAPACITY};
