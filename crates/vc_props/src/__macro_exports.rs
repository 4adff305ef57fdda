//! Items used by code generated with `#[derive(Inspect)]`.
//!
//! Not part of the public API.

use core::any::Any;

use crate::error::AccessError;
use crate::value::Value;

#[inline]
pub fn downcast_receiver<T: Any>(item: &dyn Any) -> Result<&T, AccessError> {
    item.downcast_ref::<T>()
        .ok_or_else(AccessError::receiver_mismatch::<T>)
}

#[inline]
pub fn downcast_receiver_mut<T: Any>(item: &mut dyn Any) -> Result<&mut T, AccessError> {
    item.downcast_mut::<T>()
        .ok_or_else(AccessError::receiver_mismatch::<T>)
}

/// Extracts the new value of the property `name`.
#[inline]
pub fn take_value<T: Any + Send + Sync + Clone>(name: &str, value: Value) -> Result<T, AccessError> {
    value
        .take::<T>()
        .map_err(|value| AccessError::value_mismatch::<T>(name, &value))
}
