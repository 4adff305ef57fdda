//! Access through the descriptor list an object supplies.

use alloc::vec::Vec;
use core::any::Any;

use crate::error::{AccessError, AccessKind};
use crate::info::{DescriptorShape, PropertyDescriptor};
use crate::inspect::Inspect;
use crate::matcher::NameMatcher;
use crate::options::AccessOptions;
use crate::value::Value;

/// Picks the first descriptor whose name matches, for reads and for writes.
///
/// Later descriptors are not consulted, even if the first one lacks the
/// requested accessor.
fn find(
    descriptors: Vec<PropertyDescriptor>,
    name: &str,
    matcher: NameMatcher,
) -> Option<PropertyDescriptor> {
    descriptors
        .into_iter()
        .find(|descriptor| matcher.matches(descriptor.name(), name))
}

pub(crate) fn get(
    item: &dyn Inspect,
    shape: &dyn DescriptorShape,
    name: &str,
    options: AccessOptions,
) -> Result<Option<Value>, AccessError> {
    let type_name = item.type_name();
    let matcher = NameMatcher::new(options.case_sensitive);
    let Some(descriptor) = find(shape.property_descriptors(), name, matcher) else {
        return options.not_found.miss(|| AccessError::not_found(name, type_name));
    };

    let item: &dyn Any = item;
    match descriptor.get_value(item) {
        Some(value) => value.map(Some),
        None => options
            .not_found
            .miss(|| AccessError::inaccessible(name, type_name, AccessKind::Read)),
    }
}

pub(crate) fn set(
    item: &mut dyn Inspect,
    name: &str,
    value: Value,
    options: AccessOptions,
) -> Result<(), AccessError> {
    let type_name = item.type_name();
    let descriptors = match item.as_descriptor() {
        Some(shape) => shape.property_descriptors(),
        None => Vec::new(),
    };

    let matcher = NameMatcher::new(options.case_sensitive);
    let Some(descriptor) = find(descriptors, name, matcher) else {
        return options
            .not_found
            .miss::<()>(|| AccessError::not_found(name, type_name))
            .map(drop);
    };

    let item: &mut dyn Any = item;
    match descriptor.set_value(item, value) {
        Some(result) => result,
        None => options
            .not_found
            .miss::<()>(|| AccessError::inaccessible(name, type_name, AccessKind::Write))
            .map(drop),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{DescriptorShape, PropertyDescriptor, PropertyTable, TableCell, Typed};
    use crate::{
        AccessError, AccessKind, AccessOptions, Inspect, ShapeKind, ShapeRef, Value,
        enumerate_properties, get_property, set_property,
    };
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    /// A row whose columns are described at runtime.
    struct Row {
        columns: Vec<&'static str>,
        cells: Vec<i64>,
    }

    impl Typed for Row {
        fn property_table() -> &'static PropertyTable {
            static CELL: TableCell = TableCell::new();
            CELL.get_or_init(PropertyTable::empty::<Self>)
        }
    }

    impl Inspect for Row {
        fn property_table(&self) -> &'static PropertyTable {
            <Self as Typed>::property_table()
        }

        fn as_descriptor(&self) -> Option<&dyn DescriptorShape> {
            Some(self)
        }
    }

    impl DescriptorShape for Row {
        fn property_descriptors(&self) -> Vec<PropertyDescriptor> {
            let mut descriptors: Vec<_> = self
                .columns
                .iter()
                .enumerate()
                .map(|(index, &column)| {
                    PropertyDescriptor::new(column)
                        .with_getter(move |row: &Row| Ok(Value::new(row.cells[index])))
                        .with_setter(move |row: &mut Row, value| {
                            row.cells[index] = value
                                .take::<i64>()
                                .map_err(|value| AccessError::value_mismatch::<i64>(column, &value))?;
                            Ok(())
                        })
                })
                .collect();
            descriptors.push(PropertyDescriptor::new("Total").with_getter(|row: &Row| {
                Ok(Value::new(row.cells.iter().sum::<i64>()))
            }));
            descriptors.push(
                PropertyDescriptor::new("Locked")
                    .with_getter(|_: &Row| Err(AccessError::invocation(Locked)))
                    .with_setter(|_: &mut Row, _| Err(AccessError::invocation(Locked))),
            );
            descriptors
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("row is locked")]
    struct Locked;

    fn row() -> Row {
        Row {
            columns: vec!["A", "a", "B"],
            cells: vec![1, 2, 3],
        }
    }

    #[test]
    fn classified_as_descriptor() {
        assert_eq!(ShapeRef::of(&row()).kind(), ShapeKind::Descriptor);
    }

    #[test]
    fn first_match_wins_for_both_directions() {
        let mut row = row();
        let ignore_case = AccessOptions::STRICT.ignore_case();

        let value = get_property(&row, "a", ignore_case).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<i64>(), Some(&1));

        set_property(&mut row, "a", Value::new(10_i64), ignore_case).unwrap();
        assert_eq!(row.cells, [10, 2, 3]);

        set_property(&mut row, "a", Value::new(20_i64), AccessOptions::STRICT).unwrap();
        assert_eq!(row.cells, [10, 20, 3]);
    }

    #[test]
    fn read_only_descriptor() {
        let mut row = row();
        let total = get_property(&row, "Total", AccessOptions::STRICT).unwrap().unwrap();
        assert_eq!(total.downcast_ref::<i64>(), Some(&6));

        let err = set_property(&mut row, "Total", Value::new(0_i64), AccessOptions::STRICT)
            .unwrap_err();
        assert!(matches!(
            err,
            AccessError::InaccessibleProperty {
                access: AccessKind::Write,
                ..
            }
        ));

        set_property(&mut row, "Total", Value::new(0_i64), AccessOptions::STRICT.lenient())
            .unwrap();
        assert_eq!(row.cells, [1, 2, 3]);
    }

    #[test]
    fn misses_follow_the_policy() {
        let mut row = row();
        let err = get_property(&row, "C", AccessOptions::STRICT).unwrap_err();
        assert!(err.is_not_found());
        assert!(get_property(&row, "C", AccessOptions::STRICT.lenient()).unwrap().is_none());

        let ignore_case = AccessOptions::STRICT.ignore_case();
        let err = get_property(&row, "c", ignore_case).unwrap_err();
        assert!(err.is_not_found());
        assert!(get_property(&row, "c", ignore_case.lenient()).unwrap().is_none());

        let err = set_property(&mut row, "C", Value::new(4_i64), AccessOptions::STRICT)
            .unwrap_err();
        assert!(err.is_not_found());
        set_property(&mut row, "C", Value::new(4_i64), AccessOptions::STRICT.lenient()).unwrap();
        set_property(&mut row, "c", Value::new(4_i64), ignore_case.lenient()).unwrap();
        assert_eq!(row.cells, [1, 2, 3]);
    }

    #[test]
    fn accessor_errors_reach_the_caller() {
        let mut row = row();
        for options in [AccessOptions::STRICT, AccessOptions::STRICT.lenient()] {
            let err = get_property(&row, "Locked", options).unwrap_err();
            assert!(matches!(err, AccessError::Invocation(_)));
            assert_eq!(err.to_string(), "row is locked");

            let err = set_property(&mut row, "locked", Value::new(0_i64), options.ignore_case())
                .unwrap_err();
            assert_eq!(err.to_string(), "row is locked");
        }

        let failures = enumerate_properties(&row)
            .unwrap()
            .filter(Result::is_err)
            .count();
        assert_eq!(failures, 1);
    }
}
