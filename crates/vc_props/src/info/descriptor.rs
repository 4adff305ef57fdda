use alloc::borrow::Cow;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::error::AccessError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// DescriptorShape

/// An object that describes its own properties.
///
/// Unlike a [`PropertyTable`](crate::info::PropertyTable), the list is
/// produced per object and may differ between instances of one type. Names
/// are expected to be unique within one list; accessors use the first match.
pub trait DescriptorShape {
    /// Returns the current descriptor list.
    fn property_descriptors(&self) -> Vec<PropertyDescriptor>;
}

// -----------------------------------------------------------------------------
// PropertyDescriptor

type DescriptorGetter = Arc<dyn Fn(&dyn Any) -> Result<Value, AccessError> + Send + Sync>;
type DescriptorSetter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<(), AccessError> + Send + Sync>;

/// A runtime handle describing one property of a [`DescriptorShape`] object.
///
/// The getter and setter receive the described object and may capture state,
/// e.g. the index of a column.
///
/// # Examples
///
/// ```
/// use vc_props::{Value, info::PropertyDescriptor};
///
/// struct Row(Vec<i64>);
///
/// let column = 1;
/// let descriptor = PropertyDescriptor::new("B")
///     .with_getter(move |row: &Row| Ok(Value::new(row.0[column])))
///     .with_setter(move |row: &mut Row, value| {
///         row.0[column] = *value.downcast_ref::<i64>().unwrap();
///         Ok(())
///     });
///
/// let mut row = Row(vec![1, 2, 3]);
/// descriptor.set_value(&mut row, Value::new(20_i64)).unwrap().unwrap();
/// let value = descriptor.get_value(&row).unwrap().unwrap();
/// assert_eq!(value.downcast_ref::<i64>(), Some(&20));
/// ```
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: Cow<'static, str>,
    getter: Option<DescriptorGetter>,
    setter: Option<DescriptorSetter>,
}

impl PropertyDescriptor {
    /// Creates a descriptor with neither getter nor setter.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            getter: None,
            setter: None,
        }
    }

    /// Sets a getter reading from a `T`.
    ///
    /// Invoking it on anything but a `T` fails with
    /// [`AccessError::ReceiverMismatch`].
    pub fn with_getter<T: Any>(
        mut self,
        getter: impl Fn(&T) -> Result<Value, AccessError> + Send + Sync + 'static,
    ) -> Self {
        self.getter = Some(Arc::new(move |item: &dyn Any| {
            let this = item
                .downcast_ref::<T>()
                .ok_or_else(AccessError::receiver_mismatch::<T>)?;
            getter(this)
        }));
        self
    }

    /// Sets a setter writing to a `T`.
    pub fn with_setter<T: Any>(
        mut self,
        setter: impl Fn(&mut T, Value) -> Result<(), AccessError> + Send + Sync + 'static,
    ) -> Self {
        self.setter = Some(Arc::new(move |item: &mut dyn Any, value| {
            let this = item
                .downcast_mut::<T>()
                .ok_or_else(AccessError::receiver_mismatch::<T>)?;
            setter(this, value)
        }));
        self
    }

    /// Returns the described name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the described name, consuming the descriptor.
    #[inline]
    pub fn into_name(self) -> Cow<'static, str> {
        self.name
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the value from `item`.
    ///
    /// Returns `None` if the descriptor has no getter.
    pub fn get_value(&self, item: &dyn Any) -> Option<Result<Value, AccessError>> {
        self.getter.as_ref().map(|getter| getter(item))
    }

    /// Writes `value` to `item`.
    ///
    /// Returns `None` if the descriptor has no setter.
    pub fn set_value(&self, item: &mut dyn Any, value: Value) -> Option<Result<(), AccessError>> {
        self.setter.as_ref().map(|setter| setter(item, value))
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}
