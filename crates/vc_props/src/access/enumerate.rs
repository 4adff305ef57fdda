use alloc::borrow::Cow;
use core::any::Any;
use core::fmt;

use crate::dynamic::DynamicShape;
use crate::error::AccessError;
use crate::info::{PropertyDescriptor, PropertyInfo};
use crate::inspect::{Inspect, Target};
use crate::shape::ShapeRef;
use crate::value::Value;

// -----------------------------------------------------------------------------
// PropertyPair

/// One enumerated property.
#[derive(Debug, Clone)]
pub struct PropertyPair<'a> {
    pub name: Cow<'a, str>,
    pub value: Value,
}

// -----------------------------------------------------------------------------
// PropertyPairs

enum Source<'a> {
    Dynamic {
        shape: &'a dyn DynamicShape,
        names: alloc::vec::IntoIter<Cow<'a, str>>,
    },
    Descriptor {
        item: &'a dyn Any,
        descriptors: alloc::vec::IntoIter<PropertyDescriptor>,
    },
    Static {
        item: &'a dyn Any,
        properties: core::slice::Iter<'static, PropertyInfo>,
    },
}

/// A lazy iterator over the readable properties of one object.
///
/// The list of names is taken once when the iterator is created; each value
/// is read only when its pair is produced. Reading a value can fail, so
/// items are `Result`s.
///
/// - static shape: properties with a getter, in table order;
/// - descriptor shape: descriptors with a getter, in list order;
/// - dynamic shape: members in listing order. A member removed after the
///   listing is skipped.
///
/// Created by [`enumerate_properties`].
pub struct PropertyPairs<'a> {
    source: Source<'a>,
}

impl<'a> Iterator for PropertyPairs<'a> {
    type Item = Result<PropertyPair<'a>, AccessError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Dynamic { shape, names } => names.find_map(|name| {
                match shape.invoke_get(&name) {
                    Ok(Some(value)) => Some(Ok(PropertyPair { name, value })),
                    Ok(None) => None,
                    Err(err) => Some(Err(err)),
                }
            }),
            Source::Descriptor { item, descriptors } => descriptors.find_map(|descriptor| {
                let value = descriptor.get_value(*item)?;
                Some(value.map(|value| PropertyPair {
                    name: descriptor.into_name(),
                    value,
                }))
            }),
            Source::Static { item, properties } => properties.find_map(|info| {
                let getter = info.getter()?;
                Some(getter(*item).map(|value| PropertyPair {
                    name: Cow::Borrowed(info.name()),
                    value,
                }))
            }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = match &self.source {
            Source::Dynamic { names, .. } => names.len(),
            Source::Descriptor { descriptors, .. } => descriptors.len(),
            Source::Static { properties, .. } => properties.len(),
        };
        (0, Some(upper))
    }
}

impl fmt::Debug for PropertyPairs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.source {
            Source::Dynamic { .. } => "dynamic",
            Source::Descriptor { .. } => "descriptor",
            Source::Static { .. } => "static",
        };
        f.debug_struct("PropertyPairs")
            .field("shape", &kind)
            .field("remaining", &self.size_hint().1)
            .finish()
    }
}

/// Enumerates the readable properties of `target`.
///
/// Fails with [`AccessError::NullTarget`] when the target is absent; errors
/// raised while reading a value are yielded by the iterator.
///
/// # Examples
///
/// ```
/// use vc_props::{derive::Inspect, enumerate_properties};
///
/// #[derive(Inspect)]
/// struct Point {
///     x: i32,
///     y: i32,
///     #[inspect(write_only)]
///     tag: u8,
/// }
///
/// let point = Point { x: 1, y: 2, tag: 0 };
/// let names: Vec<_> = enumerate_properties(&point)
///     .unwrap()
///     .map(|pair| pair.unwrap().name)
///     .collect();
/// assert_eq!(names, ["x", "y"]);
/// ```
pub fn enumerate_properties<'a>(
    target: impl Into<Target<'a>>,
) -> Result<PropertyPairs<'a>, AccessError> {
    let item: &'a dyn Inspect = target.into().require()?;
    let source = match ShapeRef::of(item) {
        ShapeRef::Dynamic(shape) => Source::Dynamic {
            shape,
            names: shape.member_names().into_iter(),
        },
        ShapeRef::Descriptor(shape) => Source::Descriptor {
            item,
            descriptors: shape.property_descriptors().into_iter(),
        },
        ShapeRef::Static(item) => Source::Static {
            item,
            properties: item.property_table().iter(),
        },
    };
    Ok(PropertyPairs { source })
}
