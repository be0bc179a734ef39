//! Xtract: declarative HTML extraction with XPath
//!
//! Annotate struct fields with XPath expressions, and xtract populates them
//! from an HTML document, converting each match into the field's type.
//!
//! # Architecture
//!
//! Input is parsed into an [`HtmlDocument`]. The decoder wraps its root in a
//! [`QueryContext`] and walks the target value recursively. Each value
//! exposes itself as a [`Target`], a mutable view tagged with its [`Shape`]:
//!
//! - **Struct**: the struct's expression (if any) selects the first match,
//!   which becomes the context its fields are evaluated against.
//! - **Sequence** (`Vec<T>`): one element per match, in document order.
//! - **Mapping** (`HashMap`, `BTreeMap`): `"<key_xpath>;<value_xpath>"`,
//!   paired by position.
//! - **Scalar** (`String`, integers): the text of the first match.
//! - **Custom**: types implementing [`Convert`] parse the raw text
//!   themselves.
//!
//! `Option<T>` and `Box<T>` resolve to the shape they wrap; an empty
//! `Option` is filled with a default value before decoding.
//!
//! # Untagged fields
//!
//! A struct field without `#[xpath(...)]` is decoded against the enclosing
//! context when it is itself a struct, which promotes its fields into the
//! parent. Any other untagged field is ignored, and by default so is every
//! field declared after it (see [`UntaggedFields`]).
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use xtract::Extract;
//!
//! #[derive(Debug, Default, Extract)]
//! struct Contact {
//!     #[xpath("td[@class='name']")]
//!     name: String,
//!     #[xpath("td[@class='email']")]
//!     email: String,
//! }
//!
//! #[derive(Debug, Default, Extract)]
//! struct Directory {
//!     #[xpath("//h1")]
//!     title: String,
//!     #[xpath("//tr")]
//!     contacts: Vec<Contact>,
//!     #[xpath("//dl/dt; //dl/dd")]
//!     ports: HashMap<String, u16>,
//! }
//!
//! let html = r#"
//!     <h1>Staff</h1>
//!     <table>
//!         <tr><td class="name">Ada</td><td class="email">ada@example.com</td></tr>
//!         <tr><td class="name">Alan</td><td class="email">alan@example.com</td></tr>
//!     </table>
//!     <dl><dt>http</dt><dd>80</dd><dt>https</dt><dd>443</dd></dl>
//! "#;
//!
//! let directory: Directory = xtract::from_str(html).unwrap();
//! assert_eq!(directory.title, "Staff");
//! assert_eq!(directory.contacts[1].email, "alan@example.com");
//! assert_eq!(directory.ports["https"], 443);
//! ```

extern crate self as xtract;

pub mod config;
pub mod decode;
pub mod document;
pub mod error;
pub mod query;
pub mod target;

// Re-exports
pub use config::{ConfigError, DecoderConfig, UntaggedFields};
pub use decode::{from_reader, from_slice, from_str, Decoder, IntegerError};
pub use document::HtmlDocument;
pub use error::{Error, Result};
pub use query::{QueryContext, XPathEvaluator};
pub use target::{
    Convert, Extract, FieldDescriptor, FieldQuery, IntegerSlot, Mapping, Record, Sequence, Shape,
    Target,
};
pub use xtract_derive::Extract;
