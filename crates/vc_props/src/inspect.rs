use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::dynamic::DynamicShape;
use crate::error::AccessError;
use crate::info::{DescriptorShape, PropertyTable};

// -----------------------------------------------------------------------------
// Inspect

/// An object whose named properties can be read, written and enumerated.
///
/// Every inspectable object has a static shape: the [`PropertyTable`] of its
/// concrete type, which may be empty. On top of that an object can expose a
/// richer shape by returning `Some` from the probing methods:
///
/// - [`as_dynamic`](Inspect::as_dynamic): members that only exist at runtime;
/// - [`as_descriptor`](Inspect::as_descriptor): an explicit descriptor list.
///
/// The probes are checked in that order, see [`ShapeRef::of`].
///
/// # Implementing
///
/// Prefer the derive macro, which builds the property table from the fields:
///
/// ```
/// use vc_props::{AccessOptions, derive::Inspect, get_property};
///
/// #[derive(Inspect)]
/// struct Person {
///     name: String,
///     #[inspect(rename = "Age")]
///     age: u32,
/// }
///
/// let ada = Person { name: "Ada".into(), age: 36 };
/// let age = get_property(&ada, "Age", AccessOptions::STRICT).unwrap().unwrap();
/// assert_eq!(age.downcast_ref::<u32>(), Some(&36));
/// ```
///
/// Manual implementations only need [`property_table`](Inspect::property_table),
/// usually forwarding to [`Typed::property_table`](crate::info::Typed::property_table).
///
/// [`ShapeRef::of`]: crate::ShapeRef::of
pub trait Inspect: Any {
    /// Returns the property table of the concrete type.
    fn property_table(&self) -> &'static PropertyTable;

    /// Probes for the dynamic shape.
    #[inline]
    fn as_dynamic(&self) -> Option<&dyn DynamicShape> {
        None
    }

    /// Probes for the descriptor shape.
    #[inline]
    fn as_descriptor(&self) -> Option<&dyn DescriptorShape> {
        None
    }

    /// Returns the name of the concrete type, used in error messages.
    #[inline]
    fn type_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Returns the `TypeId` of the concrete type.
    ///
    /// Unlike `Any::type_id` on a smart pointer, this always reports the
    /// inspected value itself.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

impl fmt::Debug for dyn Inspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("dyn Inspect")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Target

/// A possibly absent, borrowed object to read from.
///
/// Public entry points accept `impl Into<Target>`, so both present and
/// optional references can be passed directly:
///
/// ```
/// use vc_props::{AccessError, AccessOptions, get_property};
///
/// let missing: Option<&String> = None;
/// let err = get_property(missing, "len", AccessOptions::STRICT).unwrap_err();
/// assert!(matches!(err, AccessError::NullTarget));
/// ```
#[derive(Clone, Copy)]
pub struct Target<'a>(Option<&'a dyn Inspect>);

impl<'a> Target<'a> {
    /// The absent target.
    pub const NULL: Self = Self(None);

    /// Returns the object, or [`AccessError::NullTarget`].
    #[inline]
    pub fn require(self) -> Result<&'a dyn Inspect, AccessError> {
        self.0.ok_or(AccessError::NullTarget)
    }

    /// Returns `true` for the absent target.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl<'a, T: Inspect> From<&'a T> for Target<'a> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Self(Some(value))
    }
}

impl<'a, T: Inspect> From<Option<&'a T>> for Target<'a> {
    #[inline]
    fn from(value: Option<&'a T>) -> Self {
        Self(value.map(|v| v as &dyn Inspect))
    }
}

impl<'a> From<&'a dyn Inspect> for Target<'a> {
    #[inline]
    fn from(value: &'a dyn Inspect) -> Self {
        Self(Some(value))
    }
}

impl<'a> From<Option<&'a dyn Inspect>> for Target<'a> {
    #[inline]
    fn from(value: Option<&'a dyn Inspect>) -> Self {
        Self(value)
    }
}

// -----------------------------------------------------------------------------
// TargetMut

/// A possibly absent, mutably borrowed object to write to.
///
/// The mutable counterpart of [`Target`].
pub struct TargetMut<'a>(Option<&'a mut dyn Inspect>);

impl<'a> TargetMut<'a> {
    /// The absent target.
    pub const NULL: Self = Self(None);

    /// Returns the object, or [`AccessError::NullTarget`].
    #[inline]
    pub fn require(self) -> Result<&'a mut dyn Inspect, AccessError> {
        self.0.ok_or(AccessError::NullTarget)
    }
}

impl<'a, T: Inspect> From<&'a mut T> for TargetMut<'a> {
    #[inline]
    fn from(value: &'a mut T) -> Self {
        Self(Some(value))
    }
}

impl<'a, T: Inspect> From<Option<&'a mut T>> for TargetMut<'a> {
    #[inline]
    fn from(value: Option<&'a mut T>) -> Self {
        Self(value.map(|v| v as &mut dyn Inspect))
    }
}

impl<'a> From<&'a mut dyn Inspect> for TargetMut<'a> {
    #[inline]
    fn from(value: &'a mut dyn Inspect) -> Self {
        Self(Some(value))
    }
}

impl<'a> From<Option<&'a mut dyn Inspect>> for TargetMut<'a> {
    #[inline]
    fn from(value: Option<&'a mut dyn Inspect>) -> Self {
        Self(value)
    }
}
