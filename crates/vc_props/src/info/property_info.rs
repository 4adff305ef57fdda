use core::any::Any;
use core::fmt;

use crate::error::AccessError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Accessor handles

/// A type-erased getter: reads one property from the object it is given.
///
/// Plain function pointers keep resolved getters `Copy + Send + Sync`, so the
/// accessor cache can hand them out freely.
pub type GetFn = fn(&dyn Any) -> Result<Value, AccessError>;

/// A type-erased setter: writes one property on the object it is given.
pub type SetFn = fn(&mut dyn Any, Value) -> Result<(), AccessError>;

// -----------------------------------------------------------------------------
// PropertyInfo

/// Static metadata of one declared property.
///
/// A property without a getter is write-only, one without a setter is
/// read-only.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use vc_props::{AccessError, Value, info::PropertyInfo};
///
/// struct Meters(f64);
///
/// let info = PropertyInfo::new("Value").with_getter(|item: &dyn Any| {
///     let this = item
///         .downcast_ref::<Meters>()
///         .ok_or_else(AccessError::receiver_mismatch::<Meters>)?;
///     Ok(Value::new(this.0))
/// });
///
/// assert!(info.is_readable() && !info.is_writable());
/// let value = info.getter().unwrap()(&Meters(2.5)).unwrap();
/// assert_eq!(value.downcast_ref::<f64>(), Some(&2.5));
/// ```
#[derive(Clone, Copy)]
pub struct PropertyInfo {
    name: &'static str,
    getter: Option<GetFn>,
    setter: Option<SetFn>,
}

impl PropertyInfo {
    /// Creates a property with neither getter nor setter.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            getter: None,
            setter: None,
        }
    }

    /// Sets the getter.
    #[inline]
    pub const fn with_getter(mut self, getter: GetFn) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Sets the setter.
    #[inline]
    pub const fn with_setter(mut self, setter: SetFn) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Returns the declared name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the getter, if any.
    #[inline]
    pub const fn getter(&self) -> Option<GetFn> {
        self.getter
    }

    /// Returns the setter, if any.
    #[inline]
    pub const fn setter(&self) -> Option<SetFn> {
        self.setter
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}
