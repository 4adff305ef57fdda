use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};

use crate::info::PropertyInfo;

// -----------------------------------------------------------------------------
// Typed

/// A type with a static property table.
///
/// Implemented by `#[derive(Inspect)]`; the table is built once and kept for
/// the rest of the process, see [`TableCell`](crate::info::TableCell).
pub trait Typed: Any {
    /// Returns the property table of `Self`.
    fn property_table() -> &'static PropertyTable;
}

// -----------------------------------------------------------------------------
// PropertyTable

/// The declared properties of one concrete type, in declaration order.
///
/// Names are not required to be unique; the accessors define which duplicate
/// they pick (the first readable one for reads, the last writable one for
/// writes).
///
/// # Examples
///
/// ```rust
/// use vc_props::{derive::Inspect, info::Typed};
///
/// #[derive(Inspect)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// let table = Point::property_table();
/// assert!(table.type_is::<Point>());
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.names().collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[derive(Debug, Clone)]
pub struct PropertyTable {
    type_id: TypeId,
    type_name: &'static str,
    properties: Box<[PropertyInfo]>,
}

impl PropertyTable {
    /// Creates the table of `T`; the order of `properties` is kept.
    pub fn new<T: Any>(properties: impl Into<Box<[PropertyInfo]>>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            properties: properties.into(),
        }
    }

    /// Creates the table of a type without properties.
    #[inline]
    pub fn empty<T: Any>() -> Self {
        Self::new::<T>(Box::<[PropertyInfo]>::default())
    }

    /// Returns the `TypeId` of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name of the described type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the property at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PropertyInfo> {
        self.properties.get(index)
    }

    /// Iterates over the properties in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, PropertyInfo> {
        self.properties.iter()
    }

    /// Iterates over the declared names, duplicates included.
    #[inline]
    pub fn names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.properties.iter().map(PropertyInfo::name)
    }

    /// Returns the number of declared properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = &'a PropertyInfo;
    type IntoIter = core::slice::Iter<'a, PropertyInfo>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
