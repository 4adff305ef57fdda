//! Access through the property table of the concrete type.

use core::any::Any;

use crate::access::Resolved;
use crate::error::{AccessError, AccessKind};
use crate::info::{GetFn, PropertyTable, SetFn};
use crate::inspect::Inspect;
use crate::matcher::NameMatcher;
use crate::options::AccessOptions;
use crate::value::Value;

/// Resolves the getter for `name` in `table`.
///
/// The first property in declaration order whose name matches and which has a
/// getter wins. Matching properties without a getter are skipped and only
/// make the result [`Resolved::Inaccessible`] if nothing else matches.
pub fn resolve_getter(table: &PropertyTable, name: &str, matcher: NameMatcher) -> Resolved<GetFn> {
    let mut resolved = Resolved::NotFound;
    for info in table {
        if !matcher.matches(info.name(), name) {
            continue;
        }
        match info.getter() {
            Some(getter) => return Resolved::Found(getter),
            None => resolved = Resolved::Inaccessible,
        }
    }
    resolved
}

/// Resolves the setter for `name` in `table`.
///
/// Unlike [`resolve_getter`], the **last** matching property with a setter
/// wins: every match overwrites the previous one. A type that declares the
/// same name twice is therefore read through its first declaration and
/// written through its last.
pub fn resolve_setter(table: &PropertyTable, name: &str, matcher: NameMatcher) -> Resolved<SetFn> {
    let mut resolved = Resolved::NotFound;
    let mut writable = 0_usize;
    for info in table {
        if !matcher.matches(info.name(), name) {
            continue;
        }
        match info.setter() {
            Some(setter) => {
                writable += 1;
                resolved = Resolved::Found(setter);
            }
            None if !resolved.is_found() => resolved = Resolved::Inaccessible,
            None => {}
        }
    }
    if writable > 1 {
        log::debug!(
            "`{name}` matches {writable} writable properties on `{}`, writing through the last one",
            table.type_name(),
        );
    }
    resolved
}

pub(crate) fn get(
    item: &dyn Inspect,
    name: &str,
    options: AccessOptions,
) -> Result<Option<Value>, AccessError> {
    let table = item.property_table();
    let getter = resolve_getter(table, name, NameMatcher::new(options.case_sensitive));
    invoke_getter(item, getter, name, options)
}

/// Runs a resolved getter on `item`, applying the miss policy.
pub(crate) fn invoke_getter(
    item: &dyn Inspect,
    getter: Resolved<GetFn>,
    name: &str,
    options: AccessOptions,
) -> Result<Option<Value>, AccessError> {
    match getter.into_access(name, item.type_name(), AccessKind::Read, options.not_found)? {
        Some(getter) => {
            let item: &dyn Any = item;
            getter(item).map(Some)
        }
        None => Ok(None),
    }
}

pub(crate) fn set(
    item: &mut dyn Inspect,
    name: &str,
    value: Value,
    options: AccessOptions,
) -> Result<(), AccessError> {
    let table = item.property_table();
    let setter = resolve_setter(table, name, NameMatcher::new(options.case_sensitive));
    match setter.into_access(name, item.type_name(), AccessKind::Write, options.not_found)? {
        Some(setter) => {
            let item: &mut dyn Any = item;
            setter(item, value)
        }
        None => Ok(()),
    }
}

// -----------------------------------------------------------------------------
// Tests
