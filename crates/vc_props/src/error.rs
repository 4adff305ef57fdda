use alloc::boxed::Box;
use core::any::type_name;
use core::error::Error;
use core::fmt;

use thiserror::Error;

use crate::shape::ShapeKind;
use crate::value::Value;

// -----------------------------------------------------------------------------
// AccessKind

/// The direction of a property access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Reading through a getter.
    Read,
    /// Writing through a setter.
    Write,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "getter",
            Self::Write => "setter",
        })
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// Errors reported by the property accessors.
///
/// Every error is raised at the point of detection. Misses only become
/// [`PropertyNotFound`] or [`InaccessibleProperty`] under
/// [`NotFoundPolicy::Fail`]; the lenient policy reports them as `Ok(None)`.
///
/// [`PropertyNotFound`]: AccessError::PropertyNotFound
/// [`InaccessibleProperty`]: AccessError::InaccessibleProperty
/// [`NotFoundPolicy::Fail`]: crate::NotFoundPolicy::Fail
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("the target object reference is absent")]
    NullTarget,

    #[error("the property name is empty")]
    InvalidName,

    #[error("`{name}` does not name a property on `{type_name}`")]
    PropertyNotFound {
        name: Box<str>,
        type_name: &'static str,
    },

    #[error("property `{name}` on `{type_name}` has no accessible {access}")]
    InaccessibleProperty {
        name: Box<str>,
        type_name: &'static str,
        access: AccessKind,
    },

    #[error("{shape} objects of type `{type_name}` do not support writing properties")]
    UnsupportedShape {
        shape: ShapeKind,
        type_name: &'static str,
    },

    #[error("accessor for `{expected}` was invoked on a value of another type")]
    ReceiverMismatch { expected: &'static str },

    #[error("property `{name}` expects a `{expected}` value, found `{found}`")]
    ValueMismatch {
        name: Box<str>,
        expected: &'static str,
        found: &'static str,
    },

    /// A getter, setter or dynamic member failed; the inner error is
    /// reported unchanged.
    #[error(transparent)]
    Invocation(Box<dyn Error + Send + Sync>),
}

impl AccessError {
    #[cold]
    pub(crate) fn not_found(name: &str, type_name: &'static str) -> Self {
        Self::PropertyNotFound {
            name: name.into(),
            type_name,
        }
    }

    #[cold]
    pub(crate) fn inaccessible(name: &str, type_name: &'static str, access: AccessKind) -> Self {
        Self::InaccessibleProperty {
            name: name.into(),
            type_name,
            access,
        }
    }

    /// A getter or setter for `T` received an object of another type.
    #[cold]
    pub fn receiver_mismatch<T: ?Sized>() -> Self {
        Self::ReceiverMismatch {
            expected: type_name::<T>(),
        }
    }

    /// A setter for `name` expected a `T` but received `value`.
    #[cold]
    pub fn value_mismatch<T: ?Sized>(name: &str, value: &Value) -> Self {
        Self::ValueMismatch {
            name: name.into(),
            expected: type_name::<T>(),
            found: value.type_name(),
        }
    }

    /// Wraps a failure raised by a collaborator.
    #[cold]
    pub fn invocation(error: impl Error + Send + Sync + 'static) -> Self {
        Self::Invocation(Box::new(error))
    }

    /// Returns `true` for [`AccessError::PropertyNotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }
}

// -----------------------------------------------------------------------------
// Tests
