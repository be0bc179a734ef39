use super::{Extract, IntegerSlot, Mapping, Sequence, Shape, Target};
use crate::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

impl Extract for String {
    const SHAPE: Shape = Shape::Scalar;

    fn target(&mut self) -> Target<'_> {
        Target::Text(self)
    }
}

macro_rules! integer_targets {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Extract for $ty {
                const SHAPE: Shape = Shape::Scalar;

                fn target(&mut self) -> Target<'_> {
                    Target::Integer(IntegerSlot::$variant(self))
                }
            }
        )*
    };
}

integer_targets! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
}

impl<T> Extract for Option<T>
where
    T: Extract + Default,
{
    const SHAPE: Shape = T::SHAPE;
    const STRUCT_KIND: bool = T::STRUCT_KIND;

    fn target(&mut self) -> Target<'_> {
        self.get_or_insert_with(T::default).target()
    }
}

impl<T> Extract for Box<T>
where
    T: Extract,
{
    const SHAPE: Shape = T::SHAPE;
    const STRUCT_KIND: bool = T::STRUCT_KIND;

    fn target(&mut self) -> Target<'_> {
        (**self).target()
    }
}

impl<T> Extract for Vec<T>
where
    T: Extract + Default,
{
    const SHAPE: Shape = Shape::Sequence;

    fn target(&mut self) -> Target<'_> {
        Target::Sequence(self)
    }
}

impl<T> Sequence for Vec<T>
where
    T: Extract + Default,
{
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Target<'_>) -> Result<()>,
    ) -> Result<()> {
        let mut items = Vec::with_capacity(len);
        for index in 0..len {
            let mut item = T::default();
            fill(index, item.target())?;
            items.push(item);
        }
        *self = items;
        Ok(())
    }
}

impl<K, V, S> Extract for HashMap<K, V, S>
where
    K: Extract + Default + Eq + Hash,
    V: Extract + Default,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Mapping;

    fn target(&mut self) -> Target<'_> {
        Target::Mapping(self)
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Extract + Default + Eq + Hash,
    V: Extract + Default,
    S: BuildHasher + Default,
{
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Target<'_>, Target<'_>) -> Result<()>,
    ) -> Result<()> {
        let mut entries = HashMap::with_capacity_and_hasher(len, S::default());
        for index in 0..len {
            let mut key = K::default();
            let mut value = V::default();
            fill(index, key.target(), value.target())?;
            entries.insert(key, value);
        }
        *self = entries;
        Ok(())
    }
}

impl<K, V> Extract for BTreeMap<K, V>
where
    K: Extract + Default + Ord,
    V: Extract + Default,
{
    const SHAPE: Shape = Shape::Mapping;

    fn target(&mut self) -> Target<'_> {
        Target::Mapping(self)
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Extract + Default + Ord,
    V: Extract + Default,
{
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Target<'_>, Target<'_>) -> Result<()>,
    ) -> Result<()> {
        let mut entries = BTreeMap::new();
        for index in 0..len {
            let mut key = K::default();
            let mut value = V::default();
            fill(index, key.target(), value.target())?;
            entries.insert(key, value);
        }
        *self = entries;
        Ok(())
    }
}
