//! Read, write and enumerate named properties of any shape.
//!
//! The entry points classify the target once (see [`ShapeRef::of`]) and
//! dispatch to the accessor of that shape:
//!
//! | shape      | read                          | write                          |
//! |------------|-------------------------------|--------------------------------|
//! | dynamic    | first member whose name matches | unsupported                  |
//! | descriptor | first matching descriptor     | first matching descriptor      |
//! | static     | first matching readable property | last matching writable property |
//!
//! Names are compared with [`NameMatcher`](crate::NameMatcher) under the
//! case policy of the [`AccessOptions`]. When nothing usable matches, the
//! [`NotFoundPolicy`](crate::NotFoundPolicy) decides between an error and an
//! absent result.
//!
//! [`get_property`] rescans metadata on every call; use [`make_getter`] to
//! read the same property from many objects.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod dynamic;
mod enumerate;
mod getter;
mod resolved;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use enumerate::{PropertyPair, PropertyPairs, enumerate_properties};
pub use getter::PropertyGetter;
pub use resolved::Resolved;
pub use table::{resolve_getter, resolve_setter};

// -----------------------------------------------------------------------------
// Entry points

use crate::cache::AccessorCache;
use crate::error::AccessError;
use crate::inspect::{Inspect, Target, TargetMut};
use crate::options::AccessOptions;
use crate::shape::{ShapeKind, ShapeRef};
use crate::value::Value;

#[inline]
fn check_name(name: &str) -> Result<(), AccessError> {
    if name.is_empty() {
        Err(AccessError::InvalidName)
    } else {
        Ok(())
    }
}

/// Reads through an already classified shape without the cache.
pub(crate) fn read_shape(
    item: &dyn Inspect,
    shape: ShapeRef<'_>,
    name: &str,
    options: AccessOptions,
) -> Result<Option<Value>, AccessError> {
    match shape {
        ShapeRef::Dynamic(shape) => dynamic::get(shape, item.type_name(), name, options),
        ShapeRef::Descriptor(shape) => descriptor::get(item, shape, name, options),
        ShapeRef::Static(item) => table::get(item, name, options),
    }
}

/// Reads the property `name` of `target`.
///
/// Returns `Ok(None)` when nothing matches under the lenient policy. A
/// property whose value is itself empty, e.g. `Option::<T>::None`, is
/// returned as a [`Value`] holding that empty value.
///
/// # Errors
///
/// - [`AccessError::NullTarget`] if `target` is absent;
/// - [`AccessError::InvalidName`] if `name` is empty;
/// - [`AccessError::PropertyNotFound`] and
///   [`AccessError::InaccessibleProperty`] under the failing policy;
/// - any error raised by the getter itself.
///
/// # Examples
///
/// ```
/// use vc_props::{AccessError, AccessOptions, derive::Inspect, get_property};
///
/// #[derive(Inspect)]
/// struct Person {
///     #[inspect(rename = "Name")]
///     name: String,
/// }
///
/// let ada = Person { name: "Ada".into() };
///
/// let exact = get_property(&ada, "Name", AccessOptions::STRICT).unwrap().unwrap();
/// let folded = get_property(&ada, "name", AccessOptions::STRICT.ignore_case()).unwrap().unwrap();
/// assert_eq!(exact.downcast_ref::<String>(), folded.downcast_ref::<String>());
///
/// let err = get_property(&ada, "name", AccessOptions::STRICT).unwrap_err();
/// assert!(matches!(err, AccessError::PropertyNotFound { .. }));
/// ```
pub fn get_property<'a>(
    target: impl Into<Target<'a>>,
    name: &str,
    options: AccessOptions,
) -> Result<Option<Value>, AccessError> {
    let item = target.into().require()?;
    check_name(name)?;
    read_shape(item, ShapeRef::of(item), name, options)
}

/// Writes `value` to the property `name` of `target`.
///
/// Under the lenient policy a write to a missing property does nothing.
///
/// # Errors
///
/// As for [`get_property`], plus [`AccessError::UnsupportedShape`] for
/// dynamic targets, which cannot be written through this interface.
///
/// # Examples
///
/// ```
/// use vc_props::{AccessOptions, Value, derive::Inspect, set_property};
///
/// #[derive(Inspect)]
/// struct Counter {
///     hits: u32,
/// }
///
/// let mut counter = Counter { hits: 0 };
/// set_property(&mut counter, "hits", Value::new(3_u32), AccessOptions::STRICT).unwrap();
/// assert_eq!(counter.hits, 3);
/// ```
pub fn set_property<'a>(
    target: impl Into<TargetMut<'a>>,
    name: &str,
    value: Value,
    options: AccessOptions,
) -> Result<(), AccessError> {
    let item = target.into().require()?;
    check_name(name)?;

    let kind = ShapeRef::of(&*item).kind();
    match kind {
        ShapeKind::Dynamic => Err(AccessError::UnsupportedShape {
            shape: ShapeKind::Dynamic,
            type_name: item.type_name(),
        }),
        ShapeKind::Descriptor => descriptor::set(item, name, value, options),
        ShapeKind::Static => table::set(item, name, value, options),
    }
}

/// Creates a reusable getter for `name` backed by [`AccessorCache::global`].
///
/// Fails with [`AccessError::InvalidName`] if `name` is empty.
///
/// # Examples
///
/// ```
/// use vc_props::{AccessOptions, derive::Inspect, make_getter};
///
/// #[derive(Inspect)]
/// struct Order {
///     total: u64,
/// }
///
/// let total = make_getter("total", AccessOptions::STRICT).unwrap();
/// let orders = [Order { total: 5 }, Order { total: 7 }];
/// let sum: u64 = orders
///     .iter()
///     .map(|order| *total.get(order).unwrap().unwrap().downcast_ref::<u64>().unwrap())
///     .sum();
/// assert_eq!(sum, 12);
/// ```
#[inline]
pub fn make_getter(name: &str, options: AccessOptions) -> Result<PropertyGetter<'static>, AccessError> {
    AccessorCache::global().getter(name, options)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{PropertyPair, enumerate_properties, get_property, make_getter, set_property};
    use crate::derive::Inspect;
    use crate::info::{PropertyInfo, PropertyTable, TableCell, Typed};
    use crate::{AccessError, AccessOptions, Expando, Inspect, Target, Value};
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    #[derive(Inspect, Clone, Debug, PartialEq)]
    struct Person {
        #[inspect(rename = "Name")]
        name: String,
        #[inspect(rename = "Age")]
        age: u32,
        #[inspect(rename = "Nickname")]
        nickname: Option<String>,
    }

    fn ada() -> Person {
        Person {
            name: "Ada".into(),
            age: 36,
            nickname: None,
        }
    }

    fn read<T: Clone + Send + Sync + 'static>(value: Option<Value>) -> T {
        value.unwrap().take::<T>().unwrap()
    }

    #[test]
    fn reads_match_the_declared_getters() {
        let person = ada();
        let table = <Person as Typed>::property_table();

        for info in table {
            let direct = info.getter().unwrap()(&person).unwrap();
            let read = get_property(&person, info.name(), AccessOptions::STRICT)
                .unwrap()
                .unwrap();
            assert_eq!(direct.value_type_id(), read.value_type_id());
        }
        assert_eq!(read::<String>(get_property(&person, "Name", AccessOptions::STRICT).unwrap()), "Ada");
        assert_eq!(read::<u32>(get_property(&person, "Age", AccessOptions::STRICT).unwrap()), 36);
    }

    #[test]
    fn stored_none_is_not_absence() {
        let person = ada();
        let value = get_property(&person, "Nickname", AccessOptions::STRICT.lenient()).unwrap();
        assert_eq!(read::<Option<String>>(value), None);
    }

    #[test]
    fn name_case_rules() {
        let person = ada();
        let folded = get_property(&person, "name", AccessOptions::STRICT.ignore_case()).unwrap();
        let exact = get_property(&person, "Name", AccessOptions::STRICT).unwrap();
        assert_eq!(read::<String>(folded), read::<String>(exact));

        let err = get_property(&person, "name", AccessOptions::STRICT).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn policies_agree_on_absence() {
        let person = ada();
        let mut bag = Expando::new();
        bag.insert("Name", Value::new("bag"));

        for options in [AccessOptions::STRICT, AccessOptions::STRICT.ignore_case()] {
            for name in ["Missing", "NAME ", "Nam"] {
                let lenient = get_property(&person, name, options.lenient()).unwrap();
                let failing = get_property(&person, name, options);
                assert!(lenient.is_none());
                assert!(failing.unwrap_err().is_not_found());

                let lenient = get_property(&bag, name, options.lenient()).unwrap();
                let failing = get_property(&bag, name, options);
                assert!(lenient.is_none());
                assert!(failing.unwrap_err().is_not_found());
            }
        }
    }

    #[test]
    fn absent_targets_and_empty_names() {
        let missing: Option<&Person> = None;
        assert!(matches!(
            get_property(missing, "Name", AccessOptions::STRICT),
            Err(AccessError::NullTarget)
        ));
        assert!(matches!(
            get_property(Target::NULL, "", AccessOptions::STRICT),
            Err(AccessError::NullTarget)
        ));
        assert!(matches!(
            get_property(&ada(), "", AccessOptions::STRICT.lenient()),
            Err(AccessError::InvalidName)
        ));
        assert!(matches!(
            make_getter("", AccessOptions::STRICT),
            Err(AccessError::InvalidName)
        ));

        let mut person = ada();
        assert!(matches!(
            set_property(&mut person, "", Value::new(1_u32), AccessOptions::STRICT),
            Err(AccessError::InvalidName)
        ));
    }

    #[test]
    fn writes_check_the_value_type() {
        let mut person = ada();
        set_property(&mut person, "age", Value::new(37_u32), AccessOptions::STRICT.ignore_case())
            .unwrap();
        assert_eq!(person.age, 37);

        let err = set_property(&mut person, "Age", Value::new("old"), AccessOptions::STRICT)
            .unwrap_err();
        assert!(matches!(err, AccessError::ValueMismatch { .. }));
        assert_eq!(person.age, 37);
    }

    #[test]
    fn cached_getters_agree_with_direct_reads() {
        let getter = make_getter("Age", AccessOptions::STRICT).unwrap();
        let again = make_getter("Age", AccessOptions::STRICT).unwrap();
        let person = ada();

        assert_eq!(read::<u32>(getter.get(&person).unwrap()), 36);
        assert_eq!(read::<u32>(again.get(&person).unwrap()), 36);

        let mut bag = Expando::new();
        bag.insert("Age", Value::new(3_u32));
        assert_eq!(read::<u32>(getter.get(&bag).unwrap()), 3);

        let lenient = make_getter("Height", AccessOptions::STRICT.lenient()).unwrap();
        assert!(lenient.get(&person).unwrap().is_none());
        let failing = make_getter("Height", AccessOptions::STRICT).unwrap();
        assert!(failing.get(&person).unwrap_err().is_not_found());
    }

    #[test]
    fn enumeration_is_complete() {
        let person = ada();
        let pairs: Vec<PropertyPair<'_>> = enumerate_properties(&person)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        let table = <Person as Typed>::property_table();
        assert_eq!(pairs.len(), table.len());
        for (pair, info) in pairs.iter().zip(table) {
            assert_eq!(pair.name, info.name());
            let direct = info.getter().unwrap()(&person).unwrap();
            assert_eq!(pair.value.value_type_id(), direct.value_type_id());
        }
        assert_eq!(pairs[1].value.downcast_ref::<u32>(), Some(&36));
    }

    #[test]
    fn enumeration_of_dynamic_members() {
        let mut bag = Expando::new();
        bag.insert("b", Value::new(2_u8));
        bag.insert("a", Value::new(1_u8));

        let pairs: Vec<_> = enumerate_properties(&bag)
            .unwrap()
            .map(|pair| {
                let pair = pair.unwrap();
                (pair.name.into_owned(), *pair.value.downcast_ref::<u8>().unwrap())
            })
            .collect();
        assert_eq!(pairs, [(String::from("b"), 2), (String::from("a"), 1)]);

        assert!(matches!(
            enumerate_properties(Option::<&Expando>::None),
            Err(AccessError::NullTarget)
        ));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("sensor offline")]
    struct Offline;

    /// `Reading` always fails; `Id` always succeeds.
    struct Sensor;

    impl Typed for Sensor {
        fn property_table() -> &'static PropertyTable {
            static CELL: TableCell = TableCell::new();
            CELL.get_or_init(|| {
                PropertyTable::new::<Self>([
                    PropertyInfo::new("Id").with_getter(|_| Ok(Value::new(7_u8))),
                    PropertyInfo::new("Reading")
                        .with_getter(|_| Err(AccessError::invocation(Offline))),
                ])
            })
        }
    }

    impl Inspect for Sensor {
        fn property_table(&self) -> &'static PropertyTable {
            <Self as Typed>::property_table()
        }
    }

    fn is_offline(err: &AccessError) -> bool {
        matches!(err, AccessError::Invocation(_)) && err.to_string() == "sensor offline"
    }

    #[test]
    fn getter_errors_reach_the_caller() {
        for options in [
            AccessOptions::STRICT,
            AccessOptions::STRICT.lenient(),
            AccessOptions::STRICT.ignore_case().lenient(),
        ] {
            let err = get_property(&Sensor, "Reading", options).unwrap_err();
            assert!(is_offline(&err));

            let getter = make_getter("Reading", options).unwrap();
            assert!(is_offline(&getter.get(&Sensor).unwrap_err()));
            assert!(is_offline(&getter.get(&Sensor).unwrap_err()));
        }

        let mut pairs = enumerate_properties(&Sensor).unwrap();
        let first = pairs.next().unwrap().unwrap();
        assert_eq!(first.name, "Id");
        assert!(is_offline(&pairs.next().unwrap().unwrap_err()));
        assert!(pairs.next().is_none());
    }
}
