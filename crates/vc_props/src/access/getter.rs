use alloc::boxed::Box;
use core::fmt;

use crate::access::{read_shape, table};
use crate::cache::AccessorCache;
use crate::error::AccessError;
use crate::inspect::Target;
use crate::options::AccessOptions;
use crate::shape::ShapeRef;
use crate::value::Value;

/// A reusable reader of one named property.
///
/// Created by [`make_getter`](crate::make_getter) or
/// [`AccessorCache::getter`]. Every call classifies the target again, so one
/// getter works for objects of any shape and type. For the static shape, the
/// getter is looked up in the cache by the target's type and the property
/// table is only scanned the first time a type is seen.
///
/// The miss policy is applied per call, the cache stores misses as such.
pub struct PropertyGetter<'c> {
    name: Box<str>,
    options: AccessOptions,
    cache: &'c AccessorCache,
}

impl<'c> PropertyGetter<'c> {
    pub(crate) fn new(
        cache: &'c AccessorCache,
        name: &str,
        options: AccessOptions,
    ) -> Result<Self, AccessError> {
        if name.is_empty() {
            return Err(AccessError::InvalidName);
        }
        Ok(Self {
            name: name.into(),
            options,
            cache,
        })
    }

    /// Returns the property name this getter reads.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the options this getter was created with.
    #[inline]
    pub fn options(&self) -> AccessOptions {
        self.options
    }

    /// Returns the cache backing this getter.
    #[inline]
    pub fn cache(&self) -> &'c AccessorCache {
        self.cache
    }

    /// Reads the property from `target`.
    ///
    /// Returns `Ok(None)` for a missing property under the lenient policy.
    pub fn get<'a>(&self, target: impl Into<Target<'a>>) -> Result<Option<Value>, AccessError> {
        let item = target.into().require()?;
        match ShapeRef::of(item) {
            ShapeRef::Static(item) => {
                let getter = self.cache.resolve_getter(
                    item.ty_id(),
                    &self.name,
                    self.options.case_sensitive,
                    || item.property_table(),
                );
                table::invoke_getter(item, getter, &self.name, self.options)
            }
            shape => read_shape(item, shape, &self.name, self.options),
        }
    }
}

impl fmt::Debug for PropertyGetter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyGetter")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
