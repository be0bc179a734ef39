//! The closed set of shapes a decode target can take.
//!
//! Every type that can be decoded implements [`Extract`], which hands the
//! decoder a [`Target`]: a mutable view of the value tagged with its shape.
//! The decoder matches on that view exhaustively. Structs describe their
//! fields through [`Record`], usually via `#[derive(Extract)]`; collections
//! rebuild themselves through [`Sequence`] and [`Mapping`]; types with their
//! own text format implement [`Convert`].

mod impls;

use crate::error::Result;

/// Structural category of a decode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Struct,
    Sequence,
    Mapping,
    Custom,
}

/// Mutable view of a value, tagged with the shape the decoder dispatches on.
pub enum Target<'t> {
    Struct(&'t mut dyn Record),
    Sequence(&'t mut dyn Sequence),
    Mapping(&'t mut dyn Mapping),
    Text(&'t mut String),
    Integer(IntegerSlot<'t>),
    Custom(&'t mut dyn Convert),
    /// A type that takes part in a target tree but cannot be decoded from
    /// text. Decoding it fails with [`Error::UnsupportedType`].
    ///
    /// [`Error::UnsupportedType`]: crate::Error::UnsupportedType
    Unsupported(&'static str),
}

impl Target<'_> {
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Target::Struct(_) => Some(Shape::Struct),
            Target::Sequence(_) => Some(Shape::Sequence),
            Target::Mapping(_) => Some(Shape::Mapping),
            Target::Text(_) | Target::Integer(_) => Some(Shape::Scalar),
            Target::Custom(_) => Some(Shape::Custom),
            Target::Unsupported(_) => None,
        }
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Unsupported(type_name) => write!(f, "Unsupported({type_name})"),
            Target::Integer(slot) => write!(f, "Integer({})", slot.type_name()),
            other => write!(f, "{:?}", other.shape()),
        }
    }
}

/// A type the decoder can populate from query results.
///
/// Wrapper types (`Option<T>`, `Box<T>`) report the shape of the value they
/// wrap and resolve to it in [`Extract::target`], allocating a default value
/// first when empty.
pub trait Extract {
    const SHAPE: Shape;

    /// Whether the underlying type is a struct, even one decoded through
    /// [`Convert`]. Untagged fields of struct types inherit the enclosing
    /// context instead of going through the untagged field policy.
    const STRUCT_KIND: bool = matches!(Self::SHAPE, Shape::Struct);

    fn target(&mut self) -> Target<'_>;
}

/// A struct whose fields are decoded one by one, in declaration order.
pub trait Record {
    /// Field descriptors in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Target for the field at `index` in [`Record::fields`].
    fn field_mut(&mut self, index: usize) -> Option<Target<'_>>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// An ordered collection rebuilt from a known number of matches.
pub trait Sequence {
    /// Replace the contents with `len` default elements, each passed to
    /// `fill` with its index. The collection is only replaced once every
    /// element was filled successfully.
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Target<'_>) -> Result<()>,
    ) -> Result<()>;
}

/// An associative collection rebuilt from positionally paired matches.
pub trait Mapping {
    /// Replace the contents with `len` entries, each built from a default
    /// key and value passed to `fill` with the entry index. The collection is
    /// only replaced once every entry was filled successfully.
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Target<'_>, Target<'_>) -> Result<()>,
    ) -> Result<()>;
}

/// Custom conversion from matched text, bypassing shape dispatch.
///
/// ```
/// use xtract::{Convert, Extract};
///
/// #[derive(Default, Extract)]
/// #[xpath(convert)]
/// struct Celsius(f64);
///
/// impl Convert for Celsius {
///     fn convert(&mut self, raw: &[u8]) -> anyhow::Result<()> {
///         let text = std::str::from_utf8(raw)?;
///         self.0 = text.trim().trim_end_matches("°C").parse()?;
///         Ok(())
///     }
/// }
///
/// #[derive(Default, Extract)]
/// struct Weather {
///     #[xpath("//td[@class='temp']")]
///     temperature: Celsius,
/// }
///
/// let weather: Weather = xtract::from_str("<td class='temp'>21.5°C</td>").unwrap();
/// assert_eq!(weather.temperature.0, 21.5);
/// ```
pub trait Convert {
    fn convert(&mut self, raw: &[u8]) -> anyhow::Result<()>;
}

/// Static description of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub query: FieldQuery,
    pub shape: Shape,
    /// [`Extract::STRUCT_KIND`] of the field's type.
    pub struct_kind: bool,
}

/// How a field locates its value relative to the enclosing struct's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldQuery {
    /// Evaluate this expression against the enclosing context.
    Expr(&'static str),
    /// Decode against the enclosing context unchanged.
    Inherit,
    /// No annotation. Fields whose type is a struct (converters included)
    /// inherit the enclosing context; for anything else the decoder applies
    /// its untagged field policy.
    Untagged,
}

/// Mutable reference to an integer of any supported width.
#[derive(Debug)]
pub enum IntegerSlot<'t> {
    I8(&'t mut i8),
    I16(&'t mut i16),
    I32(&'t mut i32),
    I64(&'t mut i64),
    I128(&'t mut i128),
    Isize(&'t mut isize),
    U8(&'t mut u8),
    U16(&'t mut u16),
    U32(&'t mut u32),
    U64(&'t mut u64),
    U128(&'t mut u128),
    Usize(&'t mut usize),
}

impl IntegerSlot<'_> {
    pub fn type_name(&self) -> &'static str {
        match self {
            IntegerSlot::I8(_) => "i8",
            IntegerSlot::I16(_) => "i16",
            IntegerSlot::I32(_) => "i32",
            IntegerSlot::I64(_) => "i64",
            IntegerSlot::I128(_) => "i128",
            IntegerSlot::Isize(_) => "isize",
            IntegerSlot::U8(_) => "u8",
            IntegerSlot::U16(_) => "u16",
            IntegerSlot::U32(_) => "u32",
            IntegerSlot::U64(_) => "u64",
            IntegerSlot::U128(_) => "u128",
            IntegerSlot::Usize(_) => "usize",
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            IntegerSlot::I8(_)
                | IntegerSlot::I16(_)
                | IntegerSlot::I32(_)
                | IntegerSlot::I64(_)
                | IntegerSlot::I128(_)
                | IntegerSlot::Isize(_)
        )
    }
}
