//! Decoding HTML documents into [`Extract`] targets.

mod engine;
pub mod integer;

use crate::config::DecoderConfig;
use crate::document::HtmlDocument;
use crate::error::{Error, Result};
use crate::query::{QueryContext, XPathEvaluator};
use crate::target::{Extract, Shape};
use engine::Walker;
use std::io::Read;

pub use integer::IntegerError;

/// Decodes HTML into typed values according to their XPath annotations.
///
/// A decoder holds only configuration; every call parses its own document
/// and keeps no state afterwards, so one decoder can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Parse `input` and decode it into `target`.
    pub fn decode_str<T: Extract>(&self, input: &str, target: &mut T) -> Result<()> {
        check_target::<T>()?;
        let document = HtmlDocument::parse(input);
        self.run(&document, target)
    }

    /// Parse `input` and decode it into `target`. Invalid UTF-8 is replaced
    /// rather than rejected.
    pub fn decode_slice<T: Extract>(&self, input: &[u8], target: &mut T) -> Result<()> {
        check_target::<T>()?;
        let document = HtmlDocument::from_slice(input);
        self.run(&document, target)
    }

    /// Read and parse all of `reader`, then decode it into `target`.
    pub fn decode_reader<T: Extract, R: Read>(&self, reader: R, target: &mut T) -> Result<()> {
        check_target::<T>()?;
        let document = HtmlDocument::from_reader(reader)?;
        self.run(&document, target)
    }

    /// Decode an already parsed document into `target`.
    pub fn decode_document<T: Extract>(&self, document: &HtmlDocument, target: &mut T) -> Result<()> {
        check_target::<T>()?;
        self.run(document, target)
    }

    fn run<T: Extract>(&self, document: &HtmlDocument, target: &mut T) -> Result<()> {
        tracing::debug!(target_type = std::any::type_name::<T>(), "decoding document");

        let evaluator = XPathEvaluator::with_cache_capacity(self.config.query_cache_capacity);
        let root = QueryContext::new(document.root(), &evaluator);
        let mut walker = Walker::new(&self.config);

        walker
            .decode(root, target.target(), "")
            .map_err(|error| error.at_field(walker.path()))
    }
}

/// The root is decoded against the whole document with no expression, which
/// is only meaningful for structs and custom converters.
fn check_target<T: Extract>() -> Result<()> {
    match T::SHAPE {
        Shape::Struct | Shape::Custom => Ok(()),
        shape => Err(Error::InvalidTarget {
            message: format!(
                "{} has {:?} shape; the root must be a struct or a custom converter",
                std::any::type_name::<T>(),
                shape
            ),
        }),
    }
}

/// Decode `input` into a new `T`.
///
/// ```
/// use xtract::Extract;
///
/// #[derive(Debug, Default, Extract)]
/// struct Page {
///     #[xpath("//h1")]
///     title: String,
///     #[xpath("//ul/li")]
///     items: Vec<String>,
/// }
///
/// let page: Page = xtract::from_str("<h1>Menu</h1><ul><li>tea</li><li>cake</li></ul>").unwrap();
/// assert_eq!(page.title, "Menu");
/// assert_eq!(page.items, ["tea", "cake"]);
/// ```
pub fn from_str<T: Extract + Default>(input: &str) -> Result<T> {
    let mut value = T::default();
    Decoder::new().decode_str(input, &mut value)?;
    Ok(value)
}

/// Decode `input` into a new `T`, replacing invalid UTF-8.
pub fn from_slice<T: Extract + Default>(input: &[u8]) -> Result<T> {
    let mut value = T::default();
    Decoder::new().decode_slice(input, &mut value)?;
    Ok(value)
}

/// Read all of `reader` and decode it into a new `T`.
pub fn from_reader<T: Extract + Default, R: Read>(reader: R) -> Result<T> {
    let mut value = T::default();
    Decoder::new().decode_reader(reader, &mut value)?;
    Ok(value)
}
