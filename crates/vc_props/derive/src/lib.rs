//! Provides `#[derive(Inspect)]`, see [`Inspect`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static INSPECT_ATTRIBUTE_NAME: &str = "inspect";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod inspect_derive;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `Inspect`
///
/// Implements `Typed` and `Inspect` for a struct with named fields. Every
/// field becomes a property of the same name, in declaration order. The
/// getter returns a clone of the field, the setter replaces it.
///
/// ```rust, ignore
/// #[derive(Inspect)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
/// ```
///
/// Readable and writable field types must be `Clone + Send + Sync + 'static`.
///
/// ## Field attributes
///
/// - `#[inspect(skip)]`: no property for this field.
/// - `#[inspect(rename = "Name")]`: use another property name.
/// - `#[inspect(read_only)]`: no setter.
/// - `#[inspect(write_only)]`: no getter.
///
/// ## Type attributes
///
/// - `#[inspect(opaque)]`: an empty property table, the fields are not
///   looked at. Required for tuple structs, enums and unions.
/// - `#[inspect(dynamic)]`: the type also implements `DynamicShape`, which
///   takes precedence over its table.
/// - `#[inspect(descriptor)]`: the type also implements `DescriptorShape`.
///
/// ```rust, ignore
/// #[derive(Inspect)]
/// #[inspect(descriptor)]
/// struct Row {
///     #[inspect(skip)]
///     cells: Vec<i64>,
/// }
///
/// impl DescriptorShape for Row { /* ... */ }
/// ```
///
/// Unit structs get an empty table. Generic types are supported; their
/// tables are built per instantiation. Types with lifetime parameters cannot
/// be inspected.
#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn derive_inspect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match inspect_derive::expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
