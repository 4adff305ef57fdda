use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::info::PropertyTable;

// -----------------------------------------------------------------------------
// TableCell

/// Lazily built storage for the [`PropertyTable`] of a non-generic type.
///
/// ```
/// use vc_props::info::{PropertyTable, TableCell, Typed};
///
/// struct Unit;
///
/// impl Typed for Unit {
///     fn property_table() -> &'static PropertyTable {
///         static CELL: TableCell = TableCell::new();
///         CELL.get_or_init(PropertyTable::empty::<Self>)
///     }
/// }
///
/// assert!(core::ptr::eq(Unit::property_table(), Unit::property_table()));
/// ```
pub struct TableCell(OnceLock<PropertyTable>);

impl TableCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the table, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&'static self, f: impl FnOnce() -> PropertyTable) -> &'static PropertyTable {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTableCell

/// Lazily built storage for the tables of a generic type.
///
/// A `static` inside a generic function is shared by every instantiation, so
/// the tables are kept per `TypeId`. Each table is leaked once and lives for
/// the rest of the process.
pub struct GenericTableCell(RwLock<TypeIdMap<&'static PropertyTable>>);

impl GenericTableCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the table of `T`, building it with `f` on first use.
    ///
    /// `f` runs under the write lock, so it runs at most once per type and
    /// must not query this cell itself.
    pub fn get_or_insert<T: Any>(
        &'static self,
        f: impl FnOnce() -> PropertyTable,
    ) -> &'static PropertyTable {
        let type_id = TypeId::of::<T>();

        if let Some(&table) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return table;
        }

        let mut tables = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *tables.get_or_insert_with(type_id, || &*Box::leak(Box::new(f())))
    }
}

// -----------------------------------------------------------------------------
// Tests
