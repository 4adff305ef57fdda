//! Opaque [`Inspect`] implementations for primitive and standard types.
//!
//! These types have the static shape with an empty property table: every
//! named access misses.

use alloc::string::String;

use crate::info::{PropertyTable, TableCell, Typed};
use crate::inspect::Inspect;

macro_rules! impl_inspect_opaque {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn property_table() -> &'static PropertyTable {
                static CELL: TableCell = TableCell::new();
                CELL.get_or_init(PropertyTable::empty::<Self>)
            }
        }

        impl Inspect for $ty {
            #[inline]
            fn property_table(&self) -> &'static PropertyTable {
                <Self as Typed>::property_table()
            }
        }
    )*};
}

impl_inspect_opaque!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

#[cfg(test)]
mod tests {
    use crate::{AccessOptions, ShapeKind, ShapeRef, enumerate_properties, get_property};
    use alloc::string::String;

    #[test]
    fn primitives_have_no_properties() {
        assert_eq!(ShapeRef::of(&1_u8).kind(), ShapeKind::Static);
        assert_eq!(enumerate_properties(&String::new()).unwrap().count(), 0);
        assert!(get_property(&true, "len", AccessOptions::STRICT).unwrap_err().is_not_found());
    }
}
