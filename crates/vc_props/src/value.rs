use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;

// -----------------------------------------------------------------------------
// Value

/// A shared, type-erased property value.
///
/// Getters hand out `Value`s and setters consume them. Cloning a `Value` only
/// bumps a reference count, the payload is never copied.
///
/// A property that legitimately stores "nothing" still produces a `Value`
/// (e.g. one holding `Option::<T>::None`). Absence of a property is reported
/// separately, as `Ok(None)` from the lenient accessors.
///
/// # Examples
///
/// ```
/// use vc_props::Value;
///
/// let value = Value::new(String::from("Ada"));
/// assert!(value.is::<String>());
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "Ada");
/// assert_eq!(value.type_name(), "alloc::string::String");
///
/// let name: String = value.take().unwrap();
/// assert_eq!(name, "Ada");
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wraps `value`.
    #[inline]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wraps an already shared value without copying it.
    #[inline]
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: type_name::<T>(),
        }
    }

    /// Returns the name of the stored type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the `TypeId` of the stored type.
    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Returns `true` if the stored value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns a reference to the stored value if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Converts into the shared `T`, or gives `self` back on a type mismatch.
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Arc<T>, Self> {
        if self.is::<T>() {
            let type_name = self.type_name;
            self.inner
                .downcast::<T>()
                .map_err(|inner| Self { inner, type_name })
        } else {
            Err(self)
        }
    }

    /// Extracts an owned `T`.
    ///
    /// Moves the value out when this is the only handle, clones it otherwise.
    pub fn take<T: Any + Send + Sync + Clone>(self) -> Result<T, Self> {
        self.downcast::<T>()
            .map(|arc| Arc::try_unwrap(arc).unwrap_or_else(|shared| T::clone(&shared)))
    }

    /// Returns `true` if both values share the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.type_name).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Value;
    use alloc::string::String;
    use alloc::sync::Arc;

    #[test]
    fn stored_none_is_still_a_value() {
        let value = Value::new(Option::<i32>::None);
        assert_eq!(value.downcast_ref::<Option<i32>>(), Some(&None));
        assert!(value.downcast_ref::<i32>().is_none());
    }

    #[test]
    fn downcast_mismatch_returns_the_value() {
        let value = Value::new(7_u8);
        let value = value.downcast::<u16>().unwrap_err();
        assert_eq!(*value.downcast::<u8>().unwrap(), 7);
    }

    #[test]
    fn take_clones_shared_payloads() {
        let shared = Arc::new(String::from("shared"));
        let value = Value::from_arc(shared.clone());
        let other = value.clone();
        assert!(value.ptr_eq(&other));

        let taken: String = value.take().unwrap();
        assert_eq!(taken, "shared");
        assert_eq!(Arc::strong_count(&shared), 2);
    }
}
