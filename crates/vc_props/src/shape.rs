use core::fmt;

use crate::dynamic::DynamicShape;
use crate::error::AccessError;
use crate::info::DescriptorShape;
use crate::inspect::{Inspect, Target};

// -----------------------------------------------------------------------------
// ShapeKind

/// The three ways an object can expose its properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    /// Members only known at runtime.
    Dynamic,
    /// An explicit descriptor list supplied by the object.
    Descriptor,
    /// The property table of the object's concrete type.
    Static,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dynamic => "dynamic",
            Self::Descriptor => "descriptor",
            Self::Static => "static",
        })
    }
}

// -----------------------------------------------------------------------------
// ShapeRef

/// An object viewed through the shape its accessors dispatch on.
///
/// The static variant keeps the object itself: its property table is only
/// fetched once an accessor needs it, which lets cached getters skip the
/// fetch entirely.
#[derive(Clone, Copy)]
pub enum ShapeRef<'a> {
    Dynamic(&'a dyn DynamicShape),
    Descriptor(&'a dyn DescriptorShape),
    Static(&'a dyn Inspect),
}

impl<'a> ShapeRef<'a> {
    /// Classifies `item`.
    ///
    /// The dynamic shape wins over the descriptor shape, which wins over the
    /// static shape. Every object has a static shape, so this never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_props::{Expando, ShapeKind, ShapeRef, Value};
    ///
    /// let mut bag = Expando::new();
    /// bag.insert("Id", Value::new(1_u64));
    /// assert_eq!(ShapeRef::of(&bag).kind(), ShapeKind::Dynamic);
    /// assert_eq!(ShapeRef::of(&1_u64).kind(), ShapeKind::Static);
    /// ```
    pub fn of(item: &'a dyn Inspect) -> Self {
        if let Some(dynamic) = item.as_dynamic() {
            Self::Dynamic(dynamic)
        } else if let Some(descriptor) = item.as_descriptor() {
            Self::Descriptor(descriptor)
        } else {
            Self::Static(item)
        }
    }

    /// Returns the shape tag.
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Dynamic(_) => ShapeKind::Dynamic,
            Self::Descriptor(_) => ShapeKind::Descriptor,
            Self::Static(_) => ShapeKind::Static,
        }
    }
}

impl fmt::Debug for ShapeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeRef").field(&self.kind()).finish()
    }
}

/// Classifies a possibly absent target.
///
/// Fails with [`AccessError::NullTarget`] when the target is absent.
#[inline]
pub fn classify<'a>(target: impl Into<Target<'a>>) -> Result<ShapeRef<'a>, AccessError> {
    target.into().require().map(ShapeRef::of)
}
