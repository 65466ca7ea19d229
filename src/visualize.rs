use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::ops::Deref;
use std::rc::{self, Rc};
use std::sync::{self, Arc};

use crate::graph::Identity;
use crate::utils::short_type_name;

/// Describes how a value is laid out in memory so it can be drawn as a graph.
///
/// Implementations pick exactly one [`Shape`] per instance. Record types usually
/// go through [`impl_visualize_record!`](crate::impl_visualize_record).
pub trait Visualize: AsDynVisualize {
    fn shape(&self) -> Shape<'_>;

    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    fn identity(&self) -> Identity {
        Identity::of(self)
    }
}

pub trait AsDynVisualize {
    fn as_dyn(&self) -> &dyn Visualize;
}

impl<T: Visualize> AsDynVisualize for T {
    fn as_dyn(&self) -> &dyn Visualize {
        self
    }
}

fn erase<'a, T: Visualize + 'a>(value: &T) -> &(dyn Visualize + 'a) {
    value
}

/// A referent reachable from a pointer, container or field.
pub enum Handle<'a> {
    Borrowed(&'a (dyn Visualize + 'a)),
    /// Held through a `RefCell` borrow for as long as the handle lives.
    Guarded(Ref<'a, dyn Visualize + 'a>),
    /// Upgraded from a `rc::Weak`.
    Rc(Rc<dyn Visualize + 'a>),
    /// Upgraded from a `sync::Weak`.
    Arc(Arc<dyn Visualize + 'a>),
}

impl<'a> Deref for Handle<'a> {
    type Target = dyn Visualize + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Handle::Borrowed(value) => *value,
            Handle::Guarded(value) => &**value,
            Handle::Rc(value) => &**value,
            Handle::Arc(value) => &**value,
        }
    }
}

impl<'a, T: ?Sized + Visualize + 'a> From<&'a T> for Handle<'a> {
    fn from(value: &'a T) -> Self {
        Handle::Borrowed(value.as_dyn())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Drawn inside the cell of the owning node.
    Inline,
    /// Separate node reached through a solid pointer edge.
    PointerEdge,
    /// Separate node reached through a dashed composition edge.
    CompositionEdge,
}

impl DisplayMode {
    pub fn for_shape(shape: &Shape<'_>) -> Self {
        match shape {
            Shape::Scalar(_) => DisplayMode::Inline,
            Shape::Pointer(_) => DisplayMode::PointerEdge,
            Shape::Sequence(_) | Shape::Map(_) | Shape::Record(_) => DisplayMode::CompositionEdge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Contiguous,
    SinglyLinked,
    DoublyLinked,
}

impl SequenceKind {
    pub fn is_linked(self) -> bool {
        !matches!(self, SequenceKind::Contiguous)
    }
}

pub struct Sequence<'a> {
    pub kind: SequenceKind,
    pub elements: Vec<Handle<'a>>,
}

/// A field descriptor, produced per instance.
pub struct Field<'a> {
    pub name: Cow<'a, str>,
    pub value: Handle<'a>,
    /// Overrides the mode derived from the value's shape.
    pub display: Option<DisplayMode>,
    pub visible: bool,
}

impl<'a> Field<'a> {
    pub fn new<T: ?Sized + Visualize + 'a>(name: impl Into<Cow<'a, str>>, value: &'a T) -> Self {
        Self::from_handle(name, Handle::from(value))
    }

    pub fn from_handle(name: impl Into<Cow<'a, str>>, value: Handle<'a>) -> Self {
        Self {
            name: name.into(),
            value,
            display: None,
            visible: true,
        }
    }

    pub fn display(mut self, mode: DisplayMode) -> Self {
        self.display = Some(mode);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// The closed set of categories every visualized value falls into.
pub enum Shape<'a> {
    Scalar(String),
    /// A reference to another value; `None` is a null pointer.
    Pointer(Option<Handle<'a>>),
    Sequence(Sequence<'a>),
    Map(Vec<(Handle<'a>, Handle<'a>)>),
    Record(Vec<Field<'a>>),
}

impl<'a> Shape<'a> {
    pub fn scalar(value: impl ToString) -> Self {
        Shape::Scalar(value.to_string())
    }

    pub fn pointer_to<T: ?Sized + Visualize + 'a>(target: &'a T) -> Self {
        Shape::Pointer(Some(Handle::from(target)))
    }

    pub fn null() -> Self {
        Shape::Pointer(None)
    }

    pub fn sequence<I, T>(kind: SequenceKind, elements: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: Visualize + 'a,
    {
        Shape::Sequence(Sequence {
            kind,
            elements: elements.into_iter().map(Handle::from).collect(),
        })
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: Visualize + 'a,
        V: Visualize + 'a,
    {
        Shape::Map(
            entries
                .into_iter()
                .map(|(key, value)| (Handle::from(key), Handle::from(value)))
                .collect(),
        )
    }
}

/// Implements [`Visualize`] for a struct by listing the fields to display.
///
/// ```
/// use structviz::impl_visualize_record;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl_visualize_record!(Point { x, y });
/// ```
#[macro_export]
macro_rules! impl_visualize_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Visualize for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(::std::vec![
                    $($crate::Field::new(::std::stringify!($field), &self.$field)),*
                ])
            }
        }
    };
}

macro_rules! scalar_impls {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Visualize for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(self.to_string())
                }
            }
        )+
    };
}

scalar_impls!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

impl Visualize for &str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar((*self).to_string())
    }
}

impl Visualize for () {
    fn shape(&self) -> Shape<'_> {
        Shape::scalar("()")
    }
}

impl<T: ?Sized + Visualize> Visualize for &T {
    fn shape(&self) -> Shape<'_> {
        Shape::pointer_to(&**self)
    }
}

impl<T: ?Sized + Visualize> Visualize for &mut T {
    fn shape(&self) -> Shape<'_> {
        Shape::pointer_to(&**self)
    }
}

impl<T: ?Sized + Visualize> Visualize for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::pointer_to(&**self)
    }
}

impl<T: ?Sized + Visualize> Visualize for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::pointer_to(&**self)
    }
}

impl<T: ?Sized + Visualize> Visualize for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::pointer_to(&**self)
    }
}

impl<T: Visualize> Visualize for rc::Weak<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(self.upgrade().map(|strong| Handle::Rc(strong)))
    }
}

impl<T: Visualize> Visualize for sync::Weak<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(self.upgrade().map(|strong| Handle::Arc(strong)))
    }
}

impl<T: Visualize> Visualize for RefCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.try_borrow() {
            Ok(guard) => Shape::Pointer(Some(Handle::Guarded(Ref::map(guard, erase)))),
            Err(_) => Shape::scalar("<mutably borrowed>"),
        }
    }
}

/// `Some` is drawn as the value itself, `None` as a null pointer.
impl<T: Visualize> Visualize for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::null(),
        }
    }
}

impl<T: Visualize> Visualize for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::sequence(SequenceKind::Contiguous, self)
    }
}

impl<T: Visualize, const N: usize> Visualize for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::sequence(SequenceKind::Contiguous, self)
    }
}

impl<T: Visualize> Visualize for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::sequence(SequenceKind::Contiguous, self)
    }
}

impl<T: Visualize> Visualize for LinkedList<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::sequence(SequenceKind::DoublyLinked, self)
    }
}

impl<T: Visualize, S> Visualize for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::sequence(SequenceKind::Contiguous, self)
    }
}

impl<T: Visualize> Visualize for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::sequence(SequenceKind::Contiguous, self)
    }
}

impl<K: Visualize, V: Visualize, S> Visualize for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::map(self)
    }
}

impl<K: Visualize, V: Visualize> Visualize for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::map(self)
    }
}

impl<A: Visualize, B: Visualize> Visualize for (A, B) {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(vec![Field::new("0", &self.0), Field::new("1", &self.1)])
    }
}

impl<A: Visualize, B: Visualize, C: Visualize> Visualize for (A, B, C) {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(vec![
            Field::new("0", &self.0),
            Field::new("1", &self.1),
            Field::new("2", &self.2),
        ])
    }
}
