//! The [`Introspect`] trait and its standard library implementations.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{Shape, ShapeKind};

/// Core trait for types whose shape can be introspected.
///
/// For structs and unit-only enums, use `#[derive(Introspect)]`. For
/// newtypes that should look like an existing type, implement it by hand:
///
/// ```rust
/// use tysig::{Introspect, Shape, ShapeKind};
///
/// struct UserId(u64);
///
/// impl Introspect for UserId {
///     fn shape() -> Shape {
///         Shape::of::<Self>("UserId", ShapeKind::Int)
///     }
/// }
/// ```
pub trait Introspect: 'static {
    /// Returns the static shape of this type.
    fn shape() -> Shape;
}

macro_rules! impl_leaf {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Introspect for $ty {
                fn shape() -> Shape {
                    Shape::of::<Self>(stringify!($ty), ShapeKind::$kind)
                }
            }
        )+
    };
}

// Primitives

impl_leaf!(Bool => bool);
impl_leaf!(Int => i8, i16, i32, i64, isize, u16, u32, u64, usize);
impl_leaf!(Byte => u8);
impl_leaf!(Float => f32, f64);
impl_leaf!(Text => char, ());
impl_leaf!(String => String, PathBuf);

impl Introspect for &'static str {
    fn shape() -> Shape {
        Shape::of::<Self>("str", ShapeKind::String)
    }
}

impl Introspect for Cow<'static, str> {
    fn shape() -> Shape {
        Shape::of::<Self>("str", ShapeKind::String)
    }
}

// Option<T> and pointers

macro_rules! impl_indirect {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Introspect> Introspect for $wrapper<T> {
                fn shape() -> Shape {
                    Shape::of::<Self>("", ShapeKind::Indirect(Box::new(T::shape())))
                }
            }
        )+
    };
}

impl_indirect!(Option, Box, Rc, Arc);

// Sequences

macro_rules! impl_seq {
    ($($seq:ident),+) => {
        $(
            impl<T: Introspect> Introspect for $seq<T> {
                fn shape() -> Shape {
                    Shape::of::<Self>("", ShapeKind::Seq(Box::new(T::shape())))
                }
            }
        )+
    };
}

impl_seq!(Vec, VecDeque, LinkedList, HashSet, BTreeSet);

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn shape() -> Shape {
        Shape::of::<Self>("", ShapeKind::Seq(Box::new(T::shape())))
    }
}

// Maps

macro_rules! impl_map {
    ($($map:ident),+) => {
        $(
            impl<K: 'static, V: Introspect> Introspect for $map<K, V> {
                fn shape() -> Shape {
                    Shape::of::<Self>("", ShapeKind::Map(Box::new(V::shape())))
                }
            }
        )+
    };
}

impl_map!(HashMap, BTreeMap, IndexMap);

impl Introspect for serde_json::Value {
    fn shape() -> Shape {
        Shape::of::<Self>("Value", ShapeKind::Text)
    }
}
