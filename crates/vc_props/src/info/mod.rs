//! Property metadata: static tables and runtime descriptors.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod property_info;
mod property_table;
mod table_cell;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{DescriptorShape, PropertyDescriptor};
pub use property_info::{GetFn, PropertyInfo, SetFn};
pub use property_table::{PropertyTable, Typed};
pub use table_cell::{GenericTableCell, TableCell};

#[cfg(test)]
mod tests;
